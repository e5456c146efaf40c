use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::reservation::{
    cancel_reservation, complete_reservation, confirm_reservation, create_reservation,
    reservation_history, show_reservation,
};

pub fn build_reservation_routers() -> Router<AppRegistry> {
    let reservation_routers = Router::new()
        .route("/", post(create_reservation))
        .route("/:reservation_id", get(show_reservation))
        .route("/:reservation_id/confirm", post(confirm_reservation))
        .route("/:reservation_id/cancel", post(cancel_reservation))
        .route("/:reservation_id/complete", post(complete_reservation));

    Router::new()
        .nest("/reservations", reservation_routers)
        .route("/spaces/:space_id/reservations", get(reservation_history))
}
