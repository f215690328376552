pub mod health;
pub mod products;
pub mod stores;
pub mod users;

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

/// Build the application router with request tracing and permissive CORS.
pub fn build_router(state: ServerState) -> Router {
    build_router_with_cors(state, CorsLayer::very_permissive())
}

pub fn build_router_with_cors(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/", get(health::root))
        .route("/status", get(health::status))
        .route("/usuarios", get(users::list).post(users::create))
        .route("/stores", axum::routing::post(stores::create))
        .route("/stores/:id", get(stores::get).put(stores::update).delete(stores::delete))
        .route("/products", get(products::list).post(products::create))
        .route("/products/:id", axum::routing::put(products::update).delete(products::delete))
        .with_state(state);

    api.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
