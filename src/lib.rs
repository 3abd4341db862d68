// Library crate for the Rosewood stats server
// This file exposes the public API for integration tests

pub mod course;
pub mod game;
pub mod golf;
pub mod player;
pub mod rivalry;
pub mod shared;
pub mod stats;
pub mod team;

// Re-export commonly used types for easier access in tests
pub use course::{CourseLookup, GolfCourseApiClient, StaticCourseLookup};
pub use rivalry::RivalryConfig;
pub use shared::{AppError, AppState};
pub use stats::{DieAggregate, GolfAggregate, Season};
