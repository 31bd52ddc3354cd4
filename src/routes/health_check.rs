use actix_web::{HttpRequest, HttpResponse, Responder};
use chrono::Utc;

/// Endpoint used by clients and the hosting layer to know if the server
/// is working. The only route served without credentials.
#[tracing::instrument(name = "Health Check handler")]
pub async fn health_check(_: HttpRequest) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "CineStory Early Bird API",
        "timestamp": Utc::now(),
    }))
}
