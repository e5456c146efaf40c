use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::payment::{record_payment, show_payment};

pub fn build_payment_routers() -> Router<AppRegistry> {
    let payment_routers = Router::new()
        .route("/", post(record_payment))
        .route("/:payment_id", get(show_payment));

    Router::new().nest("/payments", payment_routers)
}
