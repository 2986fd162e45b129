use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::pagination::PaginationInfo;

/// Success envelope returned by every handler
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

/// Error envelope produced at the HTTP boundary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub status_code: u16,
    pub timestamp: String,
    pub path: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: Option<String>, pagination: Option<PaginationInfo>) -> Self {
        Self {
            success: true,
            data,
            message: message.filter(|m| !m.is_empty()),
            pagination,
        }
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::success(data, Some(message.into()), None)
    }

    pub fn updated(data: T, message: impl Into<String>) -> Self {
        Self::success(data, Some(message.into()), None)
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn paginated(data: Vec<T>, pagination: PaginationInfo, message: Option<String>) -> Self {
        Self::success(data, message, Some(pagination))
    }
}

impl ApiResponse<()> {
    /// Envelope for deletions; `data` serializes as `null`
    pub fn deleted(message: impl Into<String>) -> Self {
        Self::success((), Some(message.into()), None)
    }
}

impl ApiErrorResponse {
    pub fn new(
        status_code: u16,
        error: impl Into<String>,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            status_code,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            path: path.into(),
        }
    }
}
