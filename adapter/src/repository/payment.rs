use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{PaymentId, ReservationId},
    payment::{event::CreatePayment, Payment},
};
use kernel::repository::payment::PaymentRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::{payment::PaymentRow, reservation::ReservationRow},
    ConnectionPool,
};

#[derive(new)]
pub struct PaymentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PaymentRepository for PaymentRepositoryImpl {
    async fn create(&self, event: CreatePayment) -> AppResult<Payment> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let reservation: Option<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, space_id, user_id, start_time,
                       end_time, total_price, status, notes, created_at
                FROM reservations
                WHERE reservation_id = $1
                FOR UPDATE
            "#,
        )
        .bind(event.reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let reservation = reservation.ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "reservation {} was not found",
                event.reservation_id
            ))
        })?;
        reservation
            .status
            .ensure_can_accept_payment(event.reservation_id)?;

        let existing: Option<PaymentId> =
            sqlx::query_scalar("SELECT payment_id FROM payments WHERE reservation_id = $1")
                .bind(event.reservation_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if existing.is_some() {
            return Err(AppError::DuplicatePayment(event.reservation_id.raw()));
        }

        // The amount is the reservation's total; marked PAID directly since
        // the gateway authorization is simulated. The unique reservation_id
        // constraint backs up the duplicate check under concurrency.
        let payment_id = PaymentId::new();
        let row: PaymentRow = sqlx::query_as(
            r#"
                INSERT INTO payments
                (payment_id, reservation_id, user_id, amount, method,
                 transaction_id, status)
                VALUES ($1, $2, $3, $4, $5, $6, 'PAID')
                RETURNING payment_id, reservation_id, user_id, amount,
                          method, transaction_id, status, created_at
            "#,
        )
        .bind(payment_id)
        .bind(event.reservation_id)
        .bind(event.user_id)
        .bind(reservation.total_price)
        .bind(event.method)
        .bind(&event.transaction_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::DuplicatePayment(event.reservation_id.raw())
            }
            _ => AppError::SpecificOperationError(e),
        })?;

        // Payment success confirms the reservation (no-op when an admin
        // already confirmed it).
        sqlx::query(
            r#"
                UPDATE reservations
                SET status = 'CONFIRMED'
                WHERE reservation_id = $1 AND status = 'PENDING'
            "#,
        )
        .bind(event.reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, payment_id: PaymentId) -> AppResult<Option<Payment>> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
                SELECT payment_id, reservation_id, user_id, amount, method,
                       transaction_id, status, created_at
                FROM payments
                WHERE payment_id = $1
            "#,
        )
        .bind(payment_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Payment::from))
    }

    async fn find_by_reservation_id(
        &self,
        reservation_id: ReservationId,
    ) -> AppResult<Option<Payment>> {
        let row: Option<PaymentRow> = sqlx::query_as(
            r#"
                SELECT payment_id, reservation_id, user_id, amount, method,
                       transaction_id, status, created_at
                FROM payments
                WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Payment::from))
    }
}

impl PaymentRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
