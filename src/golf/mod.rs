// Public API - what other modules can use
pub use handlers::{
    create_golf_round, delete_golf_round, get_golf_round, get_player_golf_stats, golf_leaderboard,
    list_golf_rounds, update_golf_round,
};
pub use service::GolfService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
