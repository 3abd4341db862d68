use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::instrument;

use super::models::CourseModel;
use super::service::CourseService;
use super::types::{CourseSearchQuery, CourseSummary};
use crate::shared::{AppError, AppState};

/// HTTP handler for searching the external course catalogue
///
/// GET /golf/courses/search?query=
#[instrument(name = "search_courses", skip(state))]
pub async fn search_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseSearchQuery>,
) -> Result<Json<Vec<CourseSummary>>, AppError> {
    let results = CourseService::from_state(&state).search(&query.query).await?;
    Ok(Json(results))
}

/// HTTP handler for fetching one course through the read-through cache
///
/// GET /golf/courses/:api_id
#[instrument(name = "get_course", skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(api_id): Path<i64>,
) -> Result<Json<CourseModel>, AppError> {
    let course = CourseService::from_state(&state).get_or_cache(api_id).await?;
    Ok(Json(course))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::lookup::StaticCourseLookup;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/golf/courses/search", axum::routing::get(search_courses))
            .route("/golf/courses/:api_id", axum::routing::get(get_course))
            .with_state(state)
    }

    fn sample_course() -> CourseModel {
        CourseModel {
            id: 0,
            api_id: 42,
            club_name: "Rosewood CC".to_string(),
            course_name: "Rosewood Links".to_string(),
            address: None,
            city: Some("Columbia".to_string()),
            state: Some("SC".to_string()),
            country: Some("USA".to_string()),
            latitude: None,
            longitude: None,
            tees: Vec::new(),
        }
    }

    #[tokio::test]
    async fn search_returns_upstream_hits() {
        let state = AppStateBuilder::new()
            .with_course_lookup(Arc::new(StaticCourseLookup::with_courses(vec![
                sample_course(),
            ])))
            .build();
        let app = app(state);

        let request = Request::builder()
            .method("GET")
            .uri("/golf/courses/search?query=rosewood")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let hits: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(hits.as_array().unwrap().len(), 1);
        assert_eq!(hits[0]["api_id"], 42);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_bad_gateway() {
        let app = app(AppStateBuilder::new().build());

        let request = Request::builder()
            .method("GET")
            .uri("/golf/courses/42")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
