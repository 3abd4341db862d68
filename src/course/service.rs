use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::lookup::CourseLookup;
use super::models::CourseModel;
use super::repository::CourseRepository;
use super::types::CourseSummary;
use crate::shared::{AppError, AppState};

pub struct CourseService {
    lookup: Arc<dyn CourseLookup + Send + Sync>,
    courses: Arc<dyn CourseRepository + Send + Sync>,
}

impl CourseService {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            lookup: state.course_lookup.clone(),
            courses: state.course_repository.clone(),
        }
    }

    /// Passes the query straight to the upstream; results are not cached.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<CourseSummary>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }
        self.lookup.search_courses(query).await
    }

    /// Read-through cache: a cached course is returned as-is; on a miss the
    /// course is fetched and stored. Upstream failures propagate as 502 and
    /// are never cached.
    #[instrument(skip(self))]
    pub async fn get_or_cache(&self, api_id: i64) -> Result<CourseModel, AppError> {
        if let Some(course) = self.courses.find_by_api_id(api_id).await? {
            debug!(api_id, "Course served from cache");
            return Ok(course);
        }

        let fetched = self.lookup.fetch_course(api_id).await?;
        let cached = self.courses.insert_course(fetched).await?;
        info!(api_id, course_name = %cached.course_name, "Course fetched and cached");
        Ok(cached)
    }
}
