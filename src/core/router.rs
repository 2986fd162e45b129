use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit, http::StatusCode, middleware::from_fn, routing::get, Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{AppConfig, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::categories::{routes as categories_routes, CategoryService};

/// Simple health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

fn swagger_router(config: &SwaggerConfig) -> Router {
    let mut openapi = ApiDoc::openapi();
    SwaggerInfoModifier {
        title: config.title.clone(),
        version: config.version.clone(),
        description: config.description.clone(),
    }
    .modify(&mut openapi);

    Router::new().merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", openapi))
}

/// Assemble the application: feature routes, docs, and the boundary layers
pub fn create_router(
    category_service: Arc<CategoryService>,
    app_config: &AppConfig,
    swagger_config: &SwaggerConfig,
) -> Router {
    Router::new()
        .merge(swagger_router(swagger_config))
        .merge(categories_routes::routes(category_service))
        .route("/health", get(health_check))
        .fallback(middleware::route_not_found)
        .method_not_allowed_fallback(middleware::method_not_allowed)
        .layer(DefaultBodyLimit::max(app_config.max_request_body_size))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        // Wraps everything above so panics and extractor rejections are enveloped too
        .layer(from_fn(middleware::error_envelope))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::cors_layer(
                    app_config.cors_allowed_origins.clone(),
                )),
        )
}
