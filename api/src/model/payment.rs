use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{PaymentId, ReservationId, UserId},
    payment::{Payment, PaymentMethod, PaymentStatus},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[garde(skip)]
    pub reservation_id: ReservationId,
    #[garde(skip)]
    pub method: PaymentMethod,
    #[garde(inner(length(min = 1, max = 255)))]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub payment_id: PaymentId,
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(value: Payment) -> Self {
        let Payment {
            payment_id,
            reservation_id,
            user_id,
            amount,
            method,
            transaction_id,
            status,
            created_at,
        } = value;
        Self {
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
