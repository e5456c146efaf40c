use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::id::{ReservationId, SpaceId};
use kernel::scheduling::BookSpace;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::RequestUser,
    model::reservation::{CreateReservationRequest, ReservationResponse, ReservationsResponse},
};

pub async fn create_reservation(
    user: RequestUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let cmd = BookSpace::new(
        req.space_id,
        user.id(),
        req.start_date,
        req.end_date,
        req.notes,
    );
    let reservation = registry.booking_service().create_reservation(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

pub async fn show_reservation(
    _user: RequestUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .lifecycle_service()
        .find_reservation(reservation_id)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn reservation_history(
    _user: RequestUser,
    Path(space_id): Path<SpaceId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    registry
        .lifecycle_service()
        .reservations_for_space(space_id)
        .await
        .map(ReservationsResponse::from)
        .map(Json)
}

pub async fn confirm_reservation(
    _user: RequestUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .lifecycle_service()
        .confirm(reservation_id)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn cancel_reservation(
    _user: RequestUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .lifecycle_service()
        .cancel(reservation_id)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn complete_reservation(
    _user: RequestUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .lifecycle_service()
        .complete(reservation_id)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}
