use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::course::lookup::CourseLookup;
use crate::course::repository::CourseRepository;
use crate::game::repository::GameRepository;
use crate::golf::repository::GolfRepository;
use crate::player::repository::PlayerRepository;
use crate::rivalry::RivalryConfig;
use crate::team::repository::TeamRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub player_repository: Arc<dyn PlayerRepository + Send + Sync>,
    pub game_repository: Arc<dyn GameRepository + Send + Sync>,
    pub team_repository: Arc<dyn TeamRepository + Send + Sync>,
    pub golf_repository: Arc<dyn GolfRepository + Send + Sync>,
    pub course_repository: Arc<dyn CourseRepository + Send + Sync>,
    pub course_lookup: Arc<dyn CourseLookup + Send + Sync>,
    pub rivalry_config: Arc<RivalryConfig>,
}

impl AppState {
    pub fn new(
        player_repository: Arc<dyn PlayerRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        team_repository: Arc<dyn TeamRepository + Send + Sync>,
        golf_repository: Arc<dyn GolfRepository + Send + Sync>,
        course_repository: Arc<dyn CourseRepository + Send + Sync>,
        course_lookup: Arc<dyn CourseLookup + Send + Sync>,
        rivalry_config: RivalryConfig,
    ) -> Self {
        Self {
            player_repository,
            game_repository,
            team_repository,
            golf_repository,
            course_repository,
            course_lookup,
            rivalry_config: Arc::new(rivalry_config),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Generic "operation succeeded" payload for delete/rebuild endpoints
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
