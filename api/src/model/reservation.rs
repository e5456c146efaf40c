use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::{ReservationId, SpaceId, UserId},
    reservation::{Reservation, ReservationStatus},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub space_id: SpaceId,
    #[garde(skip)]
    pub start_date: DateTime<Utc>,
    #[garde(skip)]
    pub end_date: DateTime<Utc>,
    #[garde(inner(length(max = 500)))]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub space_id: SpaceId,
    pub user_id: UserId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            space_id,
            user_id,
            period,
            total_price,
            status,
            notes,
            created_at,
        } = value;
        Self {
            reservation_id,
            space_id,
            user_id,
            start_date: period.start(),
            end_date: period.end(),
            total_price,
            status,
            notes,
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationsResponse {
    pub items: Vec<ReservationResponse>,
}

impl From<Vec<Reservation>> for ReservationsResponse {
    fn from(value: Vec<Reservation>) -> Self {
        Self {
            items: value.into_iter().map(ReservationResponse::from).collect(),
        }
    }
}
