// Public API - what other modules can use
pub use handlers::{create_player, get_player, get_player_stats, leaderboard, list_players};
pub use service::PlayerService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
