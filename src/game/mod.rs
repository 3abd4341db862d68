// Public API - what other modules can use
pub use handlers::{create_game, delete_game, get_game, list_games, update_game};
pub use service::GameService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
