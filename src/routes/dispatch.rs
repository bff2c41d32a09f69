use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use reqwest::StatusCode;

use crate::scheduler::orchestrator::DeliveryOrchestrator;
use crate::storage::StoreError;

/// Runs one scheduler pass over the current due-set snapshot and reports the
/// per-run summary. Invoked by cron or an operator; one caller at a time.
#[tracing::instrument(name = "Dispatching due memorial updates", skip(orchestrator))]
pub async fn handle_dispatch_updates(
    orchestrator: web::Data<DeliveryOrchestrator>,
) -> Result<HttpResponse, DispatchUpdatesError> {
    let summary = orchestrator
        .run_pass(Utc::now())
        .await
        .map_err(DispatchUpdatesError::ResolveDueSetError)?;

    Ok(HttpResponse::Ok().json(summary))
}

#[derive(thiserror::Error)]
pub enum DispatchUpdatesError {
    #[error("Failed to load the due set from the subscription store.")]
    ResolveDueSetError(#[source] StoreError),
}

impl std::fmt::Debug for DispatchUpdatesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl ResponseError for DispatchUpdatesError {
    fn status_code(&self) -> StatusCode {
        match self {
            DispatchUpdatesError::ResolveDueSetError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
