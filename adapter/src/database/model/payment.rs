use chrono::{DateTime, Utc};
use kernel::model::{
    id::{PaymentId, ReservationId, UserId},
    payment::{Payment, PaymentMethod, PaymentStatus},
};
use rust_decimal::Decimal;

#[derive(sqlx::FromRow)]
pub struct PaymentRow {
    pub payment_id: PaymentId,
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<PaymentRow> for Payment {
    fn from(value: PaymentRow) -> Self {
        let PaymentRow {
            payment_id,
            reservation_id,
            user_id,
            amount,
            method,
            transaction_id,
            status,
            created_at,
        } = value;
        Payment {
            payment_id,
            reservation_id,
            user_id,
            amount,
            method,
            transaction_id,
            status,
            created_at,
        }
    }
}
