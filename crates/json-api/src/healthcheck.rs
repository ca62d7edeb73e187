//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Readiness of the API and its database.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` or `unavailable`
    pub status: String,

    /// Why the database check failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Healthcheck Handler
///
/// Answers 503 while the database is unreachable or not migrated, so load balancers stop
/// routing checkouts to this instance.
#[endpoint(
    tags("health"),
    summary = "Health Check",
    responses(
        (status_code = StatusCode::OK, description = "Ready"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unavailable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    match state.app.health.check().await {
        Ok(()) => Ok(Json(HealthResponse {
            status: "ok".to_string(),
            reason: None,
        })),
        Err(error) => {
            warn!("healthcheck failed: {error}");

            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            Ok(Json(HealthResponse {
                status: "unavailable".to_string(),
                reason: Some(error.to_string()),
            }))
        }
    }
}
