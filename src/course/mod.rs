// Public API - what other modules can use
pub use handlers::{get_course, search_courses};
pub use lookup::{CourseLookup, GolfCourseApiClient, StaticCourseLookup};
pub use service::CourseService;

// Internal modules
mod handlers;
pub mod lookup;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
