use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One occupied slot returned alongside a booking conflict, so callers can
/// render exactly which reservations block the requested period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingSlot {
    pub reservation_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    RequestValidationError(#[from] garde::Report),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("space {space_id} is already reserved on the requested period")]
    ReservationConflict {
        space_id: Uuid,
        conflicts: Vec<ConflictingSlot>,
    },
    #[error("reservation {0} is already cancelled")]
    AlreadyCancelled(Uuid),
    #[error("reservation {0} is completed and can no longer change")]
    TerminalState(Uuid),
    #[error("{0}")]
    InvalidState(String),
    #[error("a payment already exists for reservation {0}")]
    DuplicatePayment(Uuid),
    #[error("failed to convert a stored record into a domain entity: {0}")]
    ConversionEntityError(String),
    #[error("transaction failed to run")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::ValidationError(_)
            | AppError::RequestValidationError(_)
            | AppError::AlreadyCancelled(_)
            | AppError::TerminalState(_)
            | AppError::InvalidState(_) => StatusCode::BAD_REQUEST,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ReservationConflict { .. } | AppError::DuplicatePayment(_) => {
                StatusCode::CONFLICT
            }
            e @ (AppError::ConversionEntityError(_)
            | AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            AppError::ReservationConflict { conflicts, .. } => serde_json::json!({
                "error": self.to_string(),
                "conflicts": conflicts,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_409() {
        let err = AppError::ReservationConflict {
            space_id: Uuid::new_v4(),
            conflicts: vec![],
        };
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn lifecycle_violations_map_to_400() {
        let id = Uuid::new_v4();
        for err in [AppError::AlreadyCancelled(id), AppError::TerminalState(id)] {
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }
}
