use serde::{Deserialize, Serialize};

/// A cached golf course, stored whole with its tee sets. Populated lazily
/// from the external lookup the first time a course is requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseModel {
    pub id: i64,
    /// Id in the external course API; the cache key
    pub api_id: i64,
    pub club_name: String,
    pub course_name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub tees: Vec<TeeModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeeModel {
    pub tee_name: String,
    pub gender: String,
    pub course_rating: Option<f64>,
    pub slope_rating: Option<i32>,
    pub total_yards: Option<i32>,
    pub par_total: Option<i32>,
    pub holes: Vec<TeeHole>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeeHole {
    pub hole_number: i32,
    pub par: Option<i32>,
    pub yardage: Option<i32>,
    pub handicap: Option<i32>,
}
