use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{ReservationId, SpaceId},
    reservation::{event::CreateReservation, Reservation},
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

use crate::database::{
    model::reservation::{ConflictRow, ReservationRow},
    ConnectionPool,
};

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // The conflict check and the insert must be serialized against other
        // attempts on the same space, otherwise two requests can both see a
        // free slot and both book it.
        self.set_transaction_serializable(&mut tx).await?;

        {
            // The facade already checked the space, but it may have been
            // deactivated since that read; re-check at commit time.
            let is_active: Option<bool> =
                sqlx::query_scalar("SELECT is_active FROM spaces WHERE space_id = $1")
                    .bind(event.space_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;

            match is_active {
                Some(true) => {}
                _ => {
                    return Err(AppError::EntityNotFound(format!(
                        "space {} was not found or is unavailable",
                        event.space_id
                    )))
                }
            }

            let conflicts: Vec<ConflictRow> = sqlx::query_as(
                r#"
                    SELECT reservation_id, start_time, end_time
                    FROM reservations
                    WHERE space_id = $1
                      AND status IN ('PENDING', 'CONFIRMED')
                      AND start_time < $3
                      AND $2 < end_time
                "#,
            )
            .bind(event.space_id)
            .bind(event.period.start())
            .bind(event.period.end())
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if !conflicts.is_empty() {
                return Err(AppError::ReservationConflict {
                    space_id: event.space_id.raw(),
                    conflicts: conflicts.into_iter().map(Into::into).collect(),
                });
            }
        }

        let reservation_id = ReservationId::new();
        let row: ReservationRow = sqlx::query_as(
            r#"
                INSERT INTO reservations
                (reservation_id, space_id, user_id, start_time, end_time,
                 total_price, status, notes)
                VALUES ($1, $2, $3, $4, $5, $6, 'PENDING', $7)
                RETURNING reservation_id, space_id, user_id, start_time,
                          end_time, total_price, status, notes, created_at
            "#,
        )
        .bind(reservation_id)
        .bind(event.space_id)
        .bind(event.user_id)
        .bind(event.period.start())
        .bind(event.period.end())
        .bind(event.total_price)
        .bind(&event.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        row.try_into()
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, space_id, user_id, start_time,
                       end_time, total_price, status, notes, created_at
                FROM reservations
                WHERE reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Reservation::try_from).transpose()
    }

    async fn find_active_for_space(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, space_id, user_id, start_time,
                       end_time, total_price, status, notes, created_at
                FROM reservations
                WHERE space_id = $1
                  AND status IN ('PENDING', 'CONFIRMED')
                ORDER BY start_time ASC
            "#,
        )
        .bind(space_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn find_for_space(&self, space_id: SpaceId) -> AppResult<Vec<Reservation>> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, space_id, user_id, start_time,
                       end_time, total_price, status, notes, created_at
                FROM reservations
                WHERE space_id = $1
                ORDER BY start_time DESC
            "#,
        )
        .bind(space_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Reservation::try_from).collect()
    }

    async fn confirm(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let current = self.fetch_for_update(&mut tx, reservation_id).await?;
        current.status.ensure_can_confirm(reservation_id)?;

        let row = self
            .update_status(&mut tx, reservation_id, "CONFIRMED")
            .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        row.try_into()
    }

    async fn cancel(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let current = self.fetch_for_update(&mut tx, reservation_id).await?;
        current.status.ensure_can_cancel(reservation_id)?;

        let row = self
            .update_status(&mut tx, reservation_id, "CANCELLED")
            .await?;

        // Refund the payment, if one exists, in the same transaction so the
        // cancellation and the refund become visible together.
        sqlx::query("UPDATE payments SET status = 'REFUNDED' WHERE reservation_id = $1")
            .bind(reservation_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        row.try_into()
    }

    async fn complete(&self, reservation_id: ReservationId) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        let current = self.fetch_for_update(&mut tx, reservation_id).await?;
        current.status.ensure_can_complete(reservation_id)?;

        let row = self
            .update_status(&mut tx, reservation_id, "COMPLETED")
            .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;
        row.try_into()
    }
}

impl ReservationRepositoryImpl {
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

    async fn fetch_for_update(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        reservation_id: ReservationId,
    ) -> AppResult<ReservationRow> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
                SELECT reservation_id, space_id, user_id, start_time,
                       end_time, total_price, status, notes, created_at
                FROM reservations
                WHERE reservation_id = $1
                FOR UPDATE
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.ok_or_else(|| {
            AppError::EntityNotFound(format!("reservation {reservation_id} was not found"))
        })
    }

    async fn update_status(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        reservation_id: ReservationId,
        status: &str,
    ) -> AppResult<ReservationRow> {
        sqlx::query_as(
            r#"
                UPDATE reservations
                SET status = $2::reservation_status
                WHERE reservation_id = $1
                RETURNING reservation_id, space_id, user_id, start_time,
                          end_time, total_price, status, notes, created_at
            "#,
        )
        .bind(reservation_id)
        .bind(status)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)
    }
}
