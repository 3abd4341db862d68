use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::models::{CourseModel, TeeHole, TeeModel};
use super::types::CourseSummary;
use crate::shared::AppError;

const DEFAULT_BASE_URL: &str = "https://api.golfcourseapi.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound course lookup. The production implementation talks to
/// GolfCourseAPI; tests inject a static one.
#[async_trait]
pub trait CourseLookup {
    async fn search_courses(&self, query: &str) -> Result<Vec<CourseSummary>, AppError>;
    async fn fetch_course(&self, api_id: i64) -> Result<CourseModel, AppError>;
}

/// GolfCourseAPI client. Authenticates with `Authorization: Key <api_key>`.
pub struct GolfCourseApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GolfCourseApiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Reads `GOLF_COURSE_API_KEY`; an empty key still builds a client, the
    /// upstream will reject its requests with an auth error.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GOLF_COURSE_API_KEY").unwrap_or_default())
    }

    fn auth_header(&self) -> String {
        format!("Key {}", self.api_key)
    }
}

#[async_trait]
impl CourseLookup for GolfCourseApiClient {
    #[instrument(skip(self))]
    async fn search_courses(&self, query: &str) -> Result<Vec<CourseSummary>, AppError> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("search_query", query)])
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Course search failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Upstream(format!("Course search failed: {}", e)))?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Malformed course search response: {}", e)))?;

        debug!(hits = body.courses.len(), "Course search completed");
        Ok(body.courses.into_iter().map(ApiCourse::into_summary).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_course(&self, api_id: i64) -> Result<CourseModel, AppError> {
        let response = self
            .client
            .get(format!("{}/courses/{}", self.base_url, api_id))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Course fetch failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Upstream(format!("Course fetch failed: {}", e)))?;

        let body: CourseResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Malformed course response: {}", e)))?;

        Ok(body.course.into_model(api_id))
    }
}

// Upstream wire shapes. The hole arrays carry no explicit numbers; position
// in the array is the hole number.

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    courses: Vec<ApiCourse>,
}

#[derive(Debug, Deserialize)]
struct CourseResponse {
    course: ApiCourse,
}

#[derive(Debug, Deserialize)]
struct ApiCourse {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    club_name: String,
    #[serde(default)]
    course_name: String,
    location: Option<ApiLocation>,
    tees: Option<ApiTees>,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiTees {
    #[serde(default)]
    male: Vec<ApiTeeSet>,
    #[serde(default)]
    female: Vec<ApiTeeSet>,
}

#[derive(Debug, Deserialize)]
struct ApiTeeSet {
    tee_name: Option<String>,
    course_rating: Option<f64>,
    slope_rating: Option<i32>,
    total_yards: Option<i32>,
    par_total: Option<i32>,
    #[serde(default)]
    holes: Vec<ApiHole>,
}

#[derive(Debug, Deserialize)]
struct ApiHole {
    par: Option<i32>,
    yardage: Option<i32>,
    handicap: Option<i32>,
}

impl ApiCourse {
    fn into_summary(self) -> CourseSummary {
        let location = self.location.unwrap_or(ApiLocation {
            address: None,
            city: None,
            state: None,
            country: None,
            lat: None,
            lng: None,
        });
        CourseSummary {
            api_id: self.id,
            club_name: self.club_name,
            course_name: self.course_name,
            city: location.city,
            state: location.state,
            country: location.country,
        }
    }

    fn into_model(self, api_id: i64) -> CourseModel {
        let location = self.location;
        let tees = self.tees.unwrap_or_default();

        let mut tee_models = Vec::new();
        for (gender, sets) in [("male", tees.male), ("female", tees.female)] {
            for set in sets {
                tee_models.push(TeeModel {
                    tee_name: set.tee_name.unwrap_or_else(|| "Unknown".to_string()),
                    gender: gender.to_string(),
                    course_rating: set.course_rating,
                    slope_rating: set.slope_rating,
                    total_yards: set.total_yards,
                    par_total: set.par_total,
                    holes: set
                        .holes
                        .into_iter()
                        .enumerate()
                        .map(|(idx, hole)| TeeHole {
                            hole_number: idx as i32 + 1,
                            par: hole.par,
                            yardage: hole.yardage,
                            handicap: hole.handicap,
                        })
                        .collect(),
                });
            }
        }

        CourseModel {
            id: 0,
            api_id,
            club_name: self.club_name,
            course_name: self.course_name,
            address: location.as_ref().and_then(|l| l.address.clone()),
            city: location.as_ref().and_then(|l| l.city.clone()),
            state: location.as_ref().and_then(|l| l.state.clone()),
            country: location.as_ref().and_then(|l| l.country.clone()),
            latitude: location.as_ref().and_then(|l| l.lat),
            longitude: location.as_ref().and_then(|l| l.lng),
            tees: tee_models,
        }
    }
}

/// Canned lookup for tests and offline runs. Knows a fixed set of courses;
/// anything else fails the way an unreachable upstream would.
pub struct StaticCourseLookup {
    courses: Vec<CourseModel>,
}

impl StaticCourseLookup {
    pub fn empty() -> Self {
        Self {
            courses: Vec::new(),
        }
    }

    pub fn with_courses(courses: Vec<CourseModel>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CourseLookup for StaticCourseLookup {
    async fn search_courses(&self, query: &str) -> Result<Vec<CourseSummary>, AppError> {
        let needle = query.to_lowercase();
        Ok(self
            .courses
            .iter()
            .filter(|c| {
                c.club_name.to_lowercase().contains(&needle)
                    || c.course_name.to_lowercase().contains(&needle)
            })
            .map(|c| CourseSummary {
                api_id: c.api_id,
                club_name: c.club_name.clone(),
                course_name: c.course_name.clone(),
                city: c.city.clone(),
                state: c.state.clone(),
                country: c.country.clone(),
            })
            .collect())
    }

    async fn fetch_course(&self, api_id: i64) -> Result<CourseModel, AppError> {
        self.courses
            .iter()
            .find(|c| c.api_id == api_id)
            .cloned()
            .ok_or_else(|| AppError::Upstream(format!("Course {} unavailable", api_id)))
    }
}
