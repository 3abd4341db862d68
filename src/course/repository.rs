use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use tracing::{debug, instrument};

use super::models::CourseModel;
use crate::shared::AppError;

#[async_trait]
pub trait CourseRepository {
    async fn find_by_api_id(&self, api_id: i64) -> Result<Option<CourseModel>, AppError>;
    /// Stores a fetched course; the caller's `id` field is overwritten
    async fn insert_course(&self, course: CourseModel) -> Result<CourseModel, AppError>;
}

pub struct InMemoryCourseRepository {
    courses: Mutex<HashMap<i64, CourseModel>>,
    next_id: AtomicI64,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self {
            courses: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCourseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    #[instrument(skip(self))]
    async fn find_by_api_id(&self, api_id: i64) -> Result<Option<CourseModel>, AppError> {
        Ok(self.courses.lock().unwrap().get(&api_id).cloned())
    }

    #[instrument(skip(self, course))]
    async fn insert_course(&self, mut course: CourseModel) -> Result<CourseModel, AppError> {
        course.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        debug!(api_id = course.api_id, course_name = %course.course_name, "Course cached");
        self.courses
            .lock()
            .unwrap()
            .insert(course.api_id, course.clone());
        Ok(course)
    }
}
