use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use garde::Validate;
use kernel::model::{id::PaymentId, payment::event::CreatePayment};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::RequestUser,
    model::payment::{CreatePaymentRequest, PaymentResponse},
};

pub async fn record_payment(
    user: RequestUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()?;

    let event = CreatePayment::new(
        req.reservation_id,
        user.id(),
        req.method,
        req.transaction_id,
    );
    let payment = registry.lifecycle_service().record_payment(event).await?;

    Ok((StatusCode::CREATED, Json(PaymentResponse::from(payment))))
}

pub async fn show_payment(
    _user: RequestUser,
    Path(payment_id): Path<PaymentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaymentResponse>> {
    registry
        .lifecycle_service()
        .find_payment(payment_id)
        .await
        .map(PaymentResponse::from)
        .map(Json)
}
