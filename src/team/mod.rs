// Public API - what other modules can use
pub use handlers::{get_team_stats, list_teams, rebuild_teams};
pub use service::TeamService;

// Internal modules
pub mod discovery;
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
