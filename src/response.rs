use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Envelope shared by every endpoint. `data`, `error` and `message` are
/// omitted from the wire when absent; the server stamps `timestamp`,
/// `requestId` and `statusCode` on the way out.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::assemble(StatusCode::OK, true, Some(data), None, None)
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self::assemble(
            StatusCode::OK,
            true,
            Some(data),
            None,
            Some(message.into()),
        )
    }

    /// A request the server understood but did not act on (eg: a duplicate
    /// registration). Travels as HTTP 200 with `success: false`.
    pub fn rejected(data: T, error: impl Into<String>) -> Self {
        Self::assemble(StatusCode::OK, false, Some(data), Some(error.into()), None)
    }

    pub fn failure(status: StatusCode, error: impl Into<String>) -> Self {
        Self::assemble(status, false, None, Some(error.into()), None)
    }

    fn assemble(
        status: StatusCode,
        success: bool,
        data: Option<T>,
        error: Option<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            success,
            data,
            error,
            message,
            timestamp: Utc::now(),
            request_id: Uuid::new_v4().to_string(),
            status_code: status.as_u16(),
        }
    }
}

impl<T: serde::Serialize> ApiResponse<T> {
    pub fn into_http_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        HttpResponse::build(status).json(self)
    }
}
