use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use crate::domain::status::{EcosystemNode, SystemStatus, ToolStatus, WorkflowProgress};
use crate::response::ApiResponse;
use crate::store::{self, keys, KvStore, StoreError};

// These endpoints report whatever the telemetry collectors last wrote
// to the store. When a key was never written we serve a deterministic
// fallback instead of fabricating live readings.

#[tracing::instrument(name = "Fetching system status", skip(store))]
pub async fn handle_system_status(
    store: web::Data<dyn KvStore>,
) -> Result<HttpResponse, StatusError> {
    let status = store::get_json::<SystemStatus>(store.get_ref(), keys::SYSTEM_STATUS)
        .await
        .map_err(StatusError::SystemStatus)?
        .unwrap_or_else(SystemStatus::fallback);

    Ok(ApiResponse::success(status).into_http_response())
}

#[tracing::instrument(name = "Fetching tools status", skip(store))]
pub async fn handle_tools_status(
    store: web::Data<dyn KvStore>,
) -> Result<HttpResponse, StatusError> {
    let tools = store::get_json::<Vec<ToolStatus>>(store.get_ref(), keys::TOOLS_STATUS)
        .await
        .map_err(StatusError::ToolsStatus)?
        .unwrap_or_default();

    Ok(ApiResponse::success(tools).into_http_response())
}

#[tracing::instrument(name = "Fetching workflow progress", skip(store))]
pub async fn handle_workflow_progress(
    store: web::Data<dyn KvStore>,
) -> Result<HttpResponse, StatusError> {
    let workflows =
        store::get_json::<Vec<WorkflowProgress>>(store.get_ref(), keys::WORKFLOW_PROGRESS)
            .await
            .map_err(StatusError::WorkflowProgress)?
            .unwrap_or_default();

    Ok(ApiResponse::success(workflows).into_http_response())
}

#[tracing::instrument(name = "Fetching ecosystem nodes", skip(store))]
pub async fn handle_ecosystem_nodes(
    store: web::Data<dyn KvStore>,
) -> Result<HttpResponse, StatusError> {
    let nodes = store::get_json::<Vec<EcosystemNode>>(store.get_ref(), keys::ECOSYSTEM_NODES)
        .await
        .map_err(StatusError::EcosystemNodes)?
        .unwrap_or_default();

    Ok(ApiResponse::success(nodes).into_http_response())
}

#[derive(thiserror::Error)]
pub enum StatusError {
    #[error("Failed to fetch system status")]
    SystemStatus(#[source] StoreError),
    #[error("Failed to fetch tools status")]
    ToolsStatus(#[source] StoreError),
    #[error("Failed to fetch workflow progress")]
    WorkflowProgress(#[source] StoreError),
    #[error("Failed to fetch ecosystem nodes")]
    EcosystemNodes(#[source] StoreError),
}

impl StatusError {
    fn store_error(&self) -> &StoreError {
        match self {
            StatusError::SystemStatus(err)
            | StatusError::ToolsStatus(err)
            | StatusError::WorkflowProgress(err)
            | StatusError::EcosystemNodes(err) => err,
        }
    }
}

impl std::fmt::Debug for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl ResponseError for StatusError {
    fn status_code(&self) -> StatusCode {
        match self.store_error() {
            StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Corrupted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        ApiResponse::<serde_json::Value>::failure(self.status_code(), self.to_string())
            .into_http_response()
    }
}
