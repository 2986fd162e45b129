use std::any::Any;

use axum::{
    extract::Request,
    http::{HeaderValue, Method, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{self, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

use crate::core::error::{AppError, ErrorReport};

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(cors::Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// Boundary adapter: every error response leaves through here and gets the
/// uniform envelope with the request path and a timestamp.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let path = request_path(req.uri());
    let response = next.run(req).await;

    if let Some(report) = response.extensions().get::<ErrorReport>().cloned() {
        return report.to_response(&path);
    }
    response
}

fn request_path(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

/// Response for a panicking handler; the payload is logged and never returned
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("Handler panicked: {}", detail)).into_response()
}

/// Fallback for unmatched routes
pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Cannot {} {}", method, uri.path()))
}

/// Fallback for a known path hit with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("Cannot {} {}", method, uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware::from_fn, routing::get, Router};
    use axum_test::TestServer;
    use serde_json::Value;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn boom() -> &'static str {
        panic!("store exploded")
    }

    async fn conflict() -> AppError {
        AppError::Conflict("dup".to_string())
    }

    fn server() -> TestServer {
        let app = Router::new()
            .route("/boom", get(boom))
            .route("/conflict", get(conflict))
            .route("/ok", get(|| async { "ok" }))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(from_fn(error_envelope));
        TestServer::new(app).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn test_panic_becomes_generic_internal_error() {
        let response = server().get("/boom").await;
        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.json::<Value>();
        assert_eq!(body["error"], "InternalServerError");
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["path"], "/boom");
        assert!(!body.to_string().contains("store exploded"));
    }

    #[tokio::test]
    async fn test_error_envelope_fills_path_and_query() {
        let response = server().get("/conflict?page=2").await;
        response.assert_status(axum::http::StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["path"], "/conflict?page=2");
    }

    #[tokio::test]
    async fn test_success_passes_through_untouched() {
        let response = server().get("/ok").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "ok");
    }

    #[test]
    fn test_request_path_without_query() {
        let uri: Uri = "/categories".parse().unwrap();
        assert_eq!(request_path(&uri), "/categories");
    }
}
