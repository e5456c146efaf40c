use std::sync::Arc;

use chrono::{DateTime, Utc};
use derive_new::new;
use shared::error::{AppError, AppResult, ConflictingSlot};

use crate::{
    model::{
        id::{SpaceId, UserId},
        period::Period,
        reservation::{event::CreateReservation, Reservation},
    },
    repository::{reservation::ReservationRepository, space::SpaceRepository},
};

pub mod conflict;
pub mod lifecycle;
pub mod pricing;

/// Booking request as received from a request handler, before any
/// validation has happened.
#[derive(Debug, new)]
pub struct BookSpace {
    pub space_id: SpaceId,
    pub user_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Entry point for creating reservations: validates the requested period,
/// checks the space, runs the conflict check and pricing, then persists.
///
/// The repository serializes its own conflict re-check with the insert, so
/// a concurrent booking that slips in between our read and the write still
/// surfaces as `ReservationConflict` rather than a double booking.
#[derive(new)]
pub struct BookingService {
    space_repository: Arc<dyn SpaceRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
}

impl BookingService {
    pub async fn create_reservation(&self, cmd: BookSpace) -> AppResult<Reservation> {
        let period = Period::new(cmd.start_time, cmd.end_time)?;
        if period.start() < Utc::now() {
            return Err(AppError::ValidationError(
                "reservation cannot start in the past".into(),
            ));
        }

        let space = self
            .space_repository
            .find_by_id(cmd.space_id)
            .await?
            .filter(|space| space.is_active)
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "space {} was not found or is unavailable",
                    cmd.space_id
                ))
            })?;

        let active = self
            .reservation_repository
            .find_active_for_space(cmd.space_id)
            .await?;
        let conflicts = conflict::find_conflicts(&period, &active);
        if !conflicts.is_empty() {
            return Err(AppError::ReservationConflict {
                space_id: cmd.space_id.raw(),
                conflicts: conflicts
                    .into_iter()
                    .map(|r| ConflictingSlot {
                        reservation_id: r.reservation_id.raw(),
                        start_time: r.period.start(),
                        end_time: r.period.end(),
                    })
                    .collect(),
            });
        }

        let total_price = pricing::quote(space.hourly_rate, period.start(), period.end())?;
        let event = CreateReservation::new(cmd.space_id, cmd.user_id, period, total_price, cmd.notes);
        let reservation = self.reservation_repository.create(event).await?;

        tracing::info!(
            reservation_id = %reservation.reservation_id,
            space_id = %reservation.space_id,
            total_price = %reservation.total_price,
            "reservation created"
        );
        Ok(reservation)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory repositories honoring the repository contracts, used by the
    //! scheduling and lifecycle service tests.

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use crate::model::{
        id::{PaymentId, ReservationId, SpaceId},
        payment::{event::CreatePayment, Payment, PaymentStatus},
        reservation::ReservationStatus,
        space::Space,
    };
    use crate::repository::payment::PaymentRepository;

    use super::*;

    #[derive(Default)]
    struct State {
        spaces: Vec<Space>,
        reservations: Vec<Reservation>,
        payments: Vec<Payment>,
    }

    #[derive(Default)]
    pub struct FakeStore {
        state: Mutex<State>,
    }

    impl FakeStore {
        pub fn with_space(space: Space) -> Arc<Self> {
            let store = Self::default();
            store.state.lock().unwrap().spaces.push(space);
            Arc::new(store)
        }

        pub fn reservation(&self, id: ReservationId) -> Option<Reservation> {
            self.state
                .lock()
                .unwrap()
                .reservations
                .iter()
                .find(|r| r.reservation_id == id)
                .cloned()
        }

        pub fn payment_for(&self, id: ReservationId) -> Option<Payment> {
            self.state
                .lock()
                .unwrap()
                .payments
                .iter()
                .find(|p| p.reservation_id == id)
                .cloned()
        }
    }

    #[async_trait]
    impl SpaceRepository for FakeStore {
        async fn find_by_id(&self, space_id: SpaceId) -> AppResult<Option<Space>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .spaces
                .iter()
                .find(|s| s.space_id == space_id)
                .cloned())
        }
    }

    #[async_trait]
    impl ReservationRepository for FakeStore {
        async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
            let mut state = self.state.lock().unwrap();
            // The contract requires the conflict re-check to be serialized
            // with the insert; the lock is this store's transaction.
            let occupied = state.reservations.iter().any(|r| {
                r.space_id == event.space_id
                    && r.status.is_active()
                    && r.period.overlaps(&event.period)
            });
            if occupied {
                return Err(AppError::ReservationConflict {
                    space_id: event.space_id.raw(),
                    conflicts: vec![],
                });
            }
            let reservation = Reservation {
                reservation_id: ReservationId::new(),
                space_id: event.space_id,
                user_id: event.user_id,
                period: event.period,
                total_price: event.total_price,
                status: ReservationStatus::Pending,
                notes: event.notes,
                created_at: Utc::now(),
            };
            state.reservations.push(reservation.clone());
            Ok(reservation)
        }

        async fn find_by_id(
            &self,
            reservation_id: ReservationId,
        ) -> AppResult<Option<Reservation>> {
            Ok(self.reservation(reservation_id))
        }

        async fn find_active_for_space(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .reservations
                .iter()
                .filter(|r| r.space_id == space_id && r.status.is_active())
                .cloned()
                .collect())
        }

        async fn find_for_space(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .reservations
                .iter()
                .filter(|r| r.space_id == space_id)
                .cloned()
                .collect())
        }

        async fn confirm(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
            let mut state = self.state.lock().unwrap();
            let reservation = state
                .reservations
                .iter_mut()
                .find(|r| r.reservation_id == reservation_id)
                .ok_or_else(|| {
                    AppError::EntityNotFound(format!("reservation {reservation_id} was not found"))
                })?;
            reservation.status.ensure_can_confirm(reservation_id)?;
            reservation.status = ReservationStatus::Confirmed;
            Ok(reservation.clone())
        }

        async fn cancel(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
            let mut state = self.state.lock().unwrap();
            let reservation = state
                .reservations
                .iter_mut()
                .find(|r| r.reservation_id == reservation_id)
                .ok_or_else(|| {
                    AppError::EntityNotFound(format!("reservation {reservation_id} was not found"))
                })?;
            reservation.status.ensure_can_cancel(reservation_id)?;
            reservation.status = ReservationStatus::Cancelled;
            let cancelled = reservation.clone();
            if let Some(payment) = state
                .payments
                .iter_mut()
                .find(|p| p.reservation_id == reservation_id)
            {
                payment.status = PaymentStatus::Refunded;
            }
            Ok(cancelled)
        }

        async fn complete(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
            let mut state = self.state.lock().unwrap();
            let reservation = state
                .reservations
                .iter_mut()
                .find(|r| r.reservation_id == reservation_id)
                .ok_or_else(|| {
                    AppError::EntityNotFound(format!("reservation {reservation_id} was not found"))
                })?;
            reservation.status.ensure_can_complete(reservation_id)?;
            reservation.status = ReservationStatus::Completed;
            Ok(reservation.clone())
        }
    }

    #[async_trait]
    impl PaymentRepository for FakeStore {
        async fn create(&self, event: CreatePayment) -> AppResult<Payment> {
            let mut state = self.state.lock().unwrap();
            let (amount, reservation_id) = {
                let reservation = state
                    .reservations
                    .iter()
                    .find(|r| r.reservation_id == event.reservation_id)
                    .ok_or_else(|| {
                        AppError::EntityNotFound(format!(
                            "reservation {} was not found",
                            event.reservation_id
                        ))
                    })?;
                reservation
                    .status
                    .ensure_can_accept_payment(reservation.reservation_id)?;
                (reservation.total_price, reservation.reservation_id)
            };
            if state
                .payments
                .iter()
                .any(|p| p.reservation_id == reservation_id)
            {
                return Err(AppError::DuplicatePayment(reservation_id.raw()));
            }
            let payment = Payment {
                payment_id: PaymentId::new(),
                reservation_id,
                user_id: event.user_id,
                amount,
                method: event.method,
                transaction_id: event.transaction_id,
                status: PaymentStatus::Paid,
                created_at: Utc::now(),
            };
            state.payments.push(payment.clone());
            if let Some(reservation) = state
                .reservations
                .iter_mut()
                .find(|r| r.reservation_id == reservation_id)
            {
                reservation.status = ReservationStatus::Confirmed;
            }
            Ok(payment)
        }

        async fn find_by_id(&self, payment_id: PaymentId) -> AppResult<Option<Payment>> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .payments
                .iter()
                .find(|p| p.payment_id == payment_id)
                .cloned())
        }

        async fn find_by_reservation_id(
            &self,
            reservation_id: ReservationId,
        ) -> AppResult<Option<Payment>> {
            Ok(self.payment_for(reservation_id))
        }
    }
}
