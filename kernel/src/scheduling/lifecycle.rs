use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        id::{PaymentId, ReservationId, SpaceId},
        payment::{event::CreatePayment, Payment},
        reservation::Reservation,
    },
    repository::{payment::PaymentRepository, reservation::ReservationRepository},
};

/// Owns the reservation status state machine and the reservation's payment
/// record. The pure transition guards live on `ReservationStatus`; the
/// repositories re-run them inside the mutating transaction so every status
/// check is serialized with its write.
#[derive(new)]
pub struct LifecycleService {
    reservation_repository: Arc<dyn ReservationRepository>,
    payment_repository: Arc<dyn PaymentRepository>,
}

impl LifecycleService {
    pub async fn confirm(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let reservation = self.reservation_repository.confirm(reservation_id).await?;
        tracing::info!(%reservation_id, "reservation confirmed");
        Ok(reservation)
    }

    /// Cancel a reservation; an existing payment is refunded in the same
    /// transaction.
    pub async fn cancel(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let reservation = self.reservation_repository.cancel(reservation_id).await?;
        tracing::info!(%reservation_id, "reservation cancelled");
        Ok(reservation)
    }

    pub async fn complete(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let reservation = self.reservation_repository.complete(reservation_id).await?;
        tracing::info!(%reservation_id, "reservation completed");
        Ok(reservation)
    }

    /// Record a payment for a reservation. The stored amount is the
    /// reservation's total price and the payment is marked PAID directly;
    /// the reservation is confirmed alongside. A real gateway authorization
    /// round-trip would slot in before this call.
    pub async fn record_payment(&self, event: CreatePayment) -> AppResult<Payment> {
        let payment = self.payment_repository.create(event).await?;
        tracing::info!(
            payment_id = %payment.payment_id,
            reservation_id = %payment.reservation_id,
            amount = %payment.amount,
            "payment recorded"
        );
        Ok(payment)
    }

    pub async fn find_reservation(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        self.reservation_repository
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation {reservation_id} was not found"))
            })
    }

    pub async fn reservations_for_space(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>> {
        self.reservation_repository.find_for_space(space_id).await
    }

    pub async fn find_payment(&self, payment_id: PaymentId) -> AppResult<Payment> {
        self.payment_repository
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("payment {payment_id} was not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        id::UserId,
        payment::{PaymentMethod, PaymentStatus},
        reservation::ReservationStatus,
        space::Space,
    };
    use crate::scheduling::testing::FakeStore;
    use crate::scheduling::{BookSpace, BookingService};
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    struct Fixture {
        store: Arc<FakeStore>,
        lifecycle: LifecycleService,
        reservation_id: ReservationId,
        user_id: UserId,
    }

    /// One pending reservation, booked a week out on an active space.
    async fn fixture() -> Fixture {
        let space = Space {
            space_id: SpaceId::new(),
            space_name: "Meeting room A".into(),
            hourly_rate: Decimal::from(40),
            is_active: true,
        };
        let space_id = space.space_id;
        let store = FakeStore::with_space(space);
        let booking = BookingService::new(store.clone(), store.clone());
        let user_id = UserId::new();

        let start = Utc::now() + Duration::days(7);
        let reservation = booking
            .create_reservation(BookSpace::new(
                space_id,
                user_id,
                start,
                start + Duration::hours(3),
                None,
            ))
            .await
            .unwrap();

        Fixture {
            lifecycle: LifecycleService::new(store.clone(), store.clone()),
            store,
            reservation_id: reservation.reservation_id,
            user_id,
        }
    }

    #[tokio::test]
    async fn payment_marks_paid_and_confirms_the_reservation() {
        let fx = fixture().await;
        let payment = fx
            .lifecycle
            .record_payment(CreatePayment::new(
                fx.reservation_id,
                fx.user_id,
                PaymentMethod::Card,
                Some("tx-001".into()),
            ))
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.amount, Decimal::new(12000, 2)); // 3h at 40/h
        assert_eq!(
            fx.store.reservation(fx.reservation_id).unwrap().status,
            ReservationStatus::Confirmed
        );
    }

    #[tokio::test]
    async fn cancelling_refunds_the_existing_payment() {
        let fx = fixture().await;
        fx.lifecycle
            .record_payment(CreatePayment::new(
                fx.reservation_id,
                fx.user_id,
                PaymentMethod::Card,
                None,
            ))
            .await
            .unwrap();

        let cancelled = fx.lifecycle.cancel(fx.reservation_id).await.unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert_eq!(
            fx.store.payment_for(fx.reservation_id).unwrap().status,
            PaymentStatus::Refunded
        );
    }

    #[tokio::test]
    async fn cancelling_twice_reports_already_cancelled() {
        let fx = fixture().await;
        fx.lifecycle.cancel(fx.reservation_id).await.unwrap();
        let res = fx.lifecycle.cancel(fx.reservation_id).await;
        assert!(matches!(res, Err(AppError::AlreadyCancelled(_))));
    }

    #[tokio::test]
    async fn completed_reservations_cannot_be_cancelled() {
        let fx = fixture().await;
        fx.lifecycle.confirm(fx.reservation_id).await.unwrap();
        fx.lifecycle.complete(fx.reservation_id).await.unwrap();
        let res = fx.lifecycle.cancel(fx.reservation_id).await;
        assert!(matches!(res, Err(AppError::TerminalState(_))));
    }

    #[tokio::test]
    async fn a_second_payment_is_rejected() {
        let fx = fixture().await;
        fx.lifecycle
            .record_payment(CreatePayment::new(
                fx.reservation_id,
                fx.user_id,
                PaymentMethod::Card,
                None,
            ))
            .await
            .unwrap();
        let res = fx
            .lifecycle
            .record_payment(CreatePayment::new(
                fx.reservation_id,
                fx.user_id,
                PaymentMethod::Paypal,
                None,
            ))
            .await;
        assert!(matches!(res, Err(AppError::DuplicatePayment(_))));
    }

    #[tokio::test]
    async fn cancelled_reservations_cannot_be_paid() {
        let fx = fixture().await;
        fx.lifecycle.cancel(fx.reservation_id).await.unwrap();
        let res = fx
            .lifecycle
            .record_payment(CreatePayment::new(
                fx.reservation_id,
                fx.user_id,
                PaymentMethod::BankTransfer,
                None,
            ))
            .await;
        assert!(matches!(res, Err(AppError::InvalidState(_))));
    }

    #[tokio::test]
    async fn operations_on_a_missing_reservation_are_not_found() {
        let fx = fixture().await;
        let missing = ReservationId::new();
        assert!(matches!(
            fx.lifecycle.confirm(missing).await,
            Err(AppError::EntityNotFound(_))
        ));
        assert!(matches!(
            fx.lifecycle.find_reservation(missing).await,
            Err(AppError::EntityNotFound(_))
        ));
    }
}
