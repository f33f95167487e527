use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{docs::ApiDoc, products};
use crate::config::Config;
use crate::error::AppError;
use crate::store::ProductStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ProductStore>,
}

pub async fn create_app(state: AppState) -> Result<Router, AppError> {
    // Single-origin allow-list. A bare HeaderValue would be echoed back on
    // every response; the list variant answers only a matching Origin, so
    // everything else gets no CORS headers back.
    let origin: HeaderValue = state
        .config
        .server
        .cors_origin
        .parse()
        .map_err(|e| AppError::Internal(format!("invalid CORS origin: {}", e)))?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let app_state = Arc::new(state);

    let api_routes = Router::new().nest("/products", products::routes());

    let app = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    Ok(app)
}
