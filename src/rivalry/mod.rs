// Public API - what other modules can use
pub use config::{RivalryConfig, Roster};
pub use handlers::get_rivalry_stats;
pub use service::RivalryService;

// Internal modules
pub mod classifier;
pub mod config;
mod handlers;
pub mod service;
pub mod types;
