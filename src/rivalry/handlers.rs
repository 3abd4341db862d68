use axum::{extract::State, Json};
use tracing::instrument;

use super::service::RivalryService;
use super::types::RivalryStatsResponse;
use crate::shared::{AppError, AppState};

/// HTTP handler for the head-to-head rivalry record
///
/// GET /rivalry
#[instrument(name = "get_rivalry_stats", skip(state))]
pub async fn get_rivalry_stats(
    State(state): State<AppState>,
) -> Result<Json<RivalryStatsResponse>, AppError> {
    let stats = RivalryService::from_state(&state).rivalry_stats().await?;
    Ok(Json(stats))
}
