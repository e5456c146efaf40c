use chrono::{DateTime, Utc};
use kernel::model::{
    id::{ReservationId, SpaceId, UserId},
    period::Period,
    reservation::{Reservation, ReservationStatus},
};
use rust_decimal::Decimal;
use shared::error::{AppError, ConflictingSlot};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub space_id: SpaceId,
    pub user_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = AppError;

    fn try_from(value: ReservationRow) -> Result<Self, Self::Error> {
        let ReservationRow {
            reservation_id,
            space_id,
            user_id,
            start_time,
            end_time,
            total_price,
            status,
            notes,
            created_at,
        } = value;
        // The table carries a CHECK (start_time < end_time); a failure here
        // means the stored record is corrupt, not that the caller erred.
        let period = Period::new(start_time, end_time).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "reservation {reservation_id} has an invalid stored period"
            ))
        })?;
        Ok(Reservation {
            reservation_id,
            space_id,
            user_id,
            period,
            total_price,
            status,
            notes,
            created_at,
        })
    }
}

/// Slice of an overlapping reservation fetched during the serialized
/// conflict re-check, reported back inside `ReservationConflict`.
#[derive(sqlx::FromRow)]
pub struct ConflictRow {
    pub reservation_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<ConflictRow> for ConflictingSlot {
    fn from(value: ConflictRow) -> Self {
        let ConflictRow {
            reservation_id,
            start_time,
            end_time,
        } = value;
        ConflictingSlot {
            reservation_id,
            start_time,
            end_time,
        }
    }
}
