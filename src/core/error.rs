use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::shared::types::ApiErrorResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

const INTERNAL_ERROR_NAME: &str = "InternalServerError";
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Client-facing part of a failure.
///
/// Attached to error responses as an extension so the envelope middleware can
/// rebuild the body with the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub error: String,
    pub message: String,
}

impl ErrorReport {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let error = if status.is_server_error() {
            INTERNAL_ERROR_NAME.to_string()
        } else {
            status.canonical_reason().unwrap_or("Error").to_string()
        };

        Self {
            status,
            error,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }

    /// Render the full error envelope for a request path
    pub fn to_response(&self, path: &str) -> Response {
        let body = ApiErrorResponse::new(
            self.status.as_u16(),
            self.error.clone(),
            self.message.clone(),
            path,
        );
        let mut response = (self.status, Json(body)).into_response();
        response.extensions_mut().insert(self.clone());
        response
    }
}

impl AppError {
    /// Map the error to what the client may see. Server-side detail is logged here and dropped.
    pub fn report(&self) -> ErrorReport {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                ErrorReport::internal()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorReport::internal()
            }
            AppError::NotFound(msg) => ErrorReport::new(StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(messages) => {
                ErrorReport::new(StatusCode::BAD_REQUEST, messages.join(", "))
            }
            AppError::BadRequest(msg) => ErrorReport::new(StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => ErrorReport::new(StatusCode::CONFLICT, msg.clone()),
            AppError::MethodNotAllowed(msg) => {
                ErrorReport::new(StatusCode::METHOD_NOT_ALLOWED, msg.clone())
            }
            AppError::PayloadTooLarge(msg) => {
                ErrorReport::new(StatusCode::PAYLOAD_TOO_LARGE, msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Path is filled in by the error envelope middleware
        self.report().to_response("")
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(validation_messages(&errors))
    }
}

/// Flatten field errors into messages, ordered by field name
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect()
}

pub type Result<T> = std::result::Result<T, AppError>;
