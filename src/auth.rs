use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Next;
use actix_web::{web, HttpResponse, ResponseError};
use secrecy::{ExposeSecret, Secret};

use crate::response::ApiResponse;

/// The bearer credential every API request must present. Issued out of
/// band by the hosting layer.
#[derive(Clone)]
pub struct ApiKey(pub Secret<String>);

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization credentials.")]
    MissingCredentials,
    #[error("Invalid authorization credentials.")]
    InvalidCredentials,
}

impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        ApiResponse::<serde_json::Value>::failure(self.status_code(), self.to_string())
            .into_http_response()
    }
}

/// Compares the presented bearer token against the configured key and
/// rejects mismatches before any handler touches the store.
pub async fn reject_invalid_api_keys(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let expected = req
        .app_data::<web::Data<ApiKey>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("API key is not configured"))?;

    let presented = bearer_token(&req).ok_or(AuthError::MissingCredentials)?;
    if presented != expected.get_ref().0.expose_secret().as_str() {
        return Err(AuthError::InvalidCredentials.into());
    }

    next.call(req).await
}

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
