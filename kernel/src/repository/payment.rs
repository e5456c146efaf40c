use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{PaymentId, ReservationId},
    payment::{event::CreatePayment, Payment},
};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Record a payment for a reservation.
    ///
    /// Implementations must enforce the one-to-one relation (at most one
    /// payment per reservation, `DuplicatePayment` otherwise) and reject
    /// payments against terminal reservations, all inside one transaction
    /// with the reservation's confirmation.
    async fn create(&self, event: CreatePayment) -> AppResult<Payment>;

    async fn find_by_id(&self, payment_id: PaymentId) -> AppResult<Option<Payment>>;

    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Option<Payment>>;
}
