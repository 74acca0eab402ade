use crate::server::guards::auth::RequireAdminKey;
use crate::server::router::PrismState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub mod extract;
pub mod handlers;

pub fn router(state: PrismState) -> Router<PrismState> {
    let admin = Router::new()
        .route("/api/pricing/refresh", post(handlers::refresh))
        .route_layer(middleware::from_extractor_with_state::<RequireAdminKey, _>(
            state,
        ));

    Router::new()
        .route("/api/pricing/models", get(handlers::list_models))
        .route("/api/pricing/facets", get(handlers::facets))
        .route("/api/pricing/meta", get(handlers::meta))
        .merge(admin)
}
