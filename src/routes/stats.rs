use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use crate::domain::stats::AggregateStats;
use crate::response::ApiResponse;
use crate::store::{self, keys, KvStore, StoreError};

/// Serves the aggregate signup counters. Falls back to the seed figures
/// until the first registration writes real ones.
#[tracing::instrument(name = "Fetching early bird stats", skip(store))]
pub async fn handle_get_stats(store: web::Data<dyn KvStore>) -> Result<HttpResponse, StatsError> {
    let stats = store::get_json::<AggregateStats>(store.get_ref(), keys::STATS)
        .await?
        .unwrap_or_else(AggregateStats::seed);

    Ok(ApiResponse::success(stats).into_http_response())
}

#[derive(thiserror::Error)]
pub enum StatsError {
    #[error("Failed to fetch stats")]
    StoreError(#[from] StoreError),
}

impl std::fmt::Debug for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl ResponseError for StatsError {
    fn status_code(&self) -> StatusCode {
        match self {
            StatsError::StoreError(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            StatsError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        ApiResponse::<serde_json::Value>::failure(self.status_code(), self.to_string())
            .into_http_response()
    }
}
