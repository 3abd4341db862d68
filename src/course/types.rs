use serde::{Deserialize, Serialize};

/// One search hit from the external course API. Search results are served
/// straight from upstream and never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub api_id: i64,
    pub club_name: String,
    pub course_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CourseSearchQuery {
    pub query: String,
}
