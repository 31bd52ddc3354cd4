use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::domain::new_signup::{NewSignup, SignupBody};
use crate::registry::{RegistrationOutcome, RegistryError, RegistryHandle};
use crate::response::ApiResponse;
use crate::store::StoreError;

const ESTIMATED_LAUNCH: &str = "2024-03-15";
const EARLY_BIRD_BENEFITS: [&str; 4] = [
    "50% Off Lifetime License",
    "First Access to AI Features",
    "VIP Support & Training",
    "Exclusive Templates & Assets",
];

#[tracing::instrument(
    name = "Registering a new early bird signup",
    skip(request, body, registry)
)]
pub async fn handle_register(
    request: HttpRequest,
    body: web::Json<SignupBody>,
    registry: web::Data<RegistryHandle>,
) -> Result<HttpResponse, RegisterError> {
    let signup: NewSignup = body.try_into().map_err(RegisterError::ValidationError)?;

    let ip = header_or_unknown(&request, "cf-connecting-ip");
    let user_agent = header_or_unknown(&request, "user-agent");

    let outcome = registry.register(signup, ip, user_agent).await?;

    let response = match outcome {
        RegistrationOutcome::Registered {
            record,
            subscriber_number,
        } => ApiResponse::success(serde_json::json!({
            "subscriberId": record.id,
            "subscriberNumber": subscriber_number,
            "message": "Successfully registered for early access!",
            "estimatedLaunch": ESTIMATED_LAUNCH,
            "benefits": EARLY_BIRD_BENEFITS,
        })),
        RegistrationOutcome::AlreadyRegistered => ApiResponse::rejected(
            serde_json::json!({ "alreadyRegistered": true }),
            "Email already registered",
        ),
    };

    Ok(response.into_http_response())
}

fn header_or_unknown(request: &HttpRequest, name: &str) -> String {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Registration failed. Please try again.")]
    ServiceError(#[from] RegistryError),
}

impl std::fmt::Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl ResponseError for RegisterError {
    fn status_code(&self) -> StatusCode {
        match self {
            RegisterError::ValidationError(_) => StatusCode::BAD_REQUEST,
            RegisterError::ServiceError(RegistryError::Store(StoreError::Unavailable(_))) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            RegisterError::ServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        ApiResponse::<serde_json::Value>::failure(self.status_code(), self.to_string())
            .into_http_response()
    }
}
