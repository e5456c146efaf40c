use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{ReservationId, SpaceId},
    reservation::{event::CreateReservation, Reservation},
};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation with status PENDING.
    ///
    /// Implementations must serialize the conflict re-check with the insert
    /// for the same space (the facade's read-side check alone is racy), and
    /// return `ReservationConflict` when a concurrent booking wins the slot.
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;

    /// Reservations with status PENDING or CONFIRMED for one space; the
    /// comparison set for conflict checks.
    async fn find_active_for_space(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>>;

    /// Full booking history of a space, newest start first. Terminal
    /// reservations are retained, never deleted.
    async fn find_for_space(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>>;

    /// PENDING -> CONFIRMED by an administrator.
    async fn confirm(&self, reservation_id: ReservationId) -> AppResult<Reservation>;

    /// Active -> CANCELLED. If a payment exists it is marked REFUNDED in the
    /// same transaction; both changes become visible together or not at all.
    async fn cancel(&self, reservation_id: ReservationId) -> AppResult<Reservation>;

    /// CONFIRMED -> COMPLETED once the booked period is over.
    async fn complete(&self, reservation_id: ReservationId) -> AppResult<Reservation>;
}
