use axum::Router;
use registry::AppRegistry;

use super::{payment::build_payment_routers, reservation::build_reservation_routers};

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_reservation_routers())
        .merge(build_payment_routers());
    Router::new().nest("/api/v1", router)
}
