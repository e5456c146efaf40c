use derive_new::new;

use crate::model::{
    id::{ReservationId, UserId},
    payment::PaymentMethod,
};

/// Command to record a payment for an existing reservation. The amount is
/// taken from the reservation's total price, not supplied by the caller.
#[derive(Debug, new)]
pub struct CreatePayment {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub method: PaymentMethod,
    pub transaction_id: Option<String>,
}
