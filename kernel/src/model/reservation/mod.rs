use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

use crate::model::{
    id::{ReservationId, SpaceId, UserId},
    period::Period,
};

pub mod event;

#[derive(Debug, Clone)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub space_id: SpaceId,
    pub user_id: UserId,
    pub period: Period,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "reservation_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Active reservations occupy the space's calendar and take part in
    /// conflict checks.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Admin confirmation: only a pending reservation can be confirmed.
    pub fn ensure_can_confirm(self, reservation_id: ReservationId) -> AppResult<()> {
        match self {
            Self::Pending => Ok(()),
            Self::Confirmed => Err(AppError::InvalidState(format!(
                "reservation {reservation_id} is already confirmed"
            ))),
            Self::Cancelled | Self::Completed => Err(AppError::TerminalState(reservation_id.raw())),
        }
    }

    pub fn ensure_can_cancel(self, reservation_id: ReservationId) -> AppResult<()> {
        match self {
            Self::Pending | Self::Confirmed => Ok(()),
            Self::Cancelled => Err(AppError::AlreadyCancelled(reservation_id.raw())),
            Self::Completed => Err(AppError::TerminalState(reservation_id.raw())),
        }
    }

    pub fn ensure_can_complete(self, reservation_id: ReservationId) -> AppResult<()> {
        match self {
            Self::Confirmed => Ok(()),
            Self::Pending => Err(AppError::InvalidState(format!(
                "reservation {reservation_id} has not been confirmed yet"
            ))),
            Self::Cancelled | Self::Completed => Err(AppError::TerminalState(reservation_id.raw())),
        }
    }

    /// A payment may be recorded while the reservation still occupies the
    /// calendar; terminal reservations reject payments.
    pub fn ensure_can_accept_payment(self, reservation_id: ReservationId) -> AppResult<()> {
        match self {
            Self::Pending | Self::Confirmed => Ok(()),
            Self::Cancelled => Err(AppError::InvalidState(format!(
                "reservation {reservation_id} is cancelled and cannot be paid"
            ))),
            Self::Completed => Err(AppError::InvalidState(format!(
                "reservation {reservation_id} is completed and cannot be paid"
            ))),
        }
    }
}
