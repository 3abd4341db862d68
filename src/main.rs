use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rosewood::course::repository::InMemoryCourseRepository;
use rosewood::course::{self, GolfCourseApiClient};
use rosewood::game::{self, repository::InMemoryGameRepository};
use rosewood::golf::{self, repository::InMemoryGolfRepository};
use rosewood::player::{self, repository::InMemoryPlayerRepository};
use rosewood::rivalry::{self, RivalryConfig};
use rosewood::shared::AppState;
use rosewood::team::{self, repository::InMemoryTeamRepository};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rosewood=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rosewood stats server");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let player_repository = Arc::new(InMemoryPlayerRepository::new());
    let game_repository = Arc::new(InMemoryGameRepository::new());
    let team_repository = Arc::new(InMemoryTeamRepository::new());
    let golf_repository = Arc::new(InMemoryGolfRepository::new());
    let course_repository = Arc::new(InMemoryCourseRepository::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let player_repository = Arc::new(rosewood::player::repository::PostgresPlayerRepository::new(pool));

    let course_lookup = Arc::new(GolfCourseApiClient::from_env());
    let rivalry_config = RivalryConfig::from_env();

    let app_state = AppState::new(
        player_repository,
        game_repository,
        team_repository,
        golf_repository,
        course_repository,
        course_lookup,
        rivalry_config,
    );

    let app = Router::new()
        .route("/", get(|| async { "Rosewood stats server" }))
        .route("/players", post(player::create_player))
        .route("/players", get(player::list_players))
        .route("/players/leaderboard", get(player::leaderboard))
        .route("/players/:id", get(player::get_player))
        .route("/players/:id/stats", get(player::get_player_stats))
        .route("/games", post(game::create_game))
        .route("/games", get(game::list_games))
        .route("/games/:id", get(game::get_game))
        .route("/games/:id", put(game::update_game))
        .route("/games/:id", axum::routing::delete(game::delete_game))
        .route("/teams", get(team::list_teams))
        .route("/teams/rebuild", post(team::rebuild_teams))
        .route("/teams/:id", get(team::get_team_stats))
        .route("/rivalry", get(rivalry::get_rivalry_stats))
        .route("/golf/rounds", post(golf::create_golf_round))
        .route("/golf/rounds", get(golf::list_golf_rounds))
        .route("/golf/rounds/:id", get(golf::get_golf_round))
        .route("/golf/rounds/:id", put(golf::update_golf_round))
        .route(
            "/golf/rounds/:id",
            axum::routing::delete(golf::delete_golf_round),
        )
        .route("/golf/stats", get(golf::golf_leaderboard))
        .route("/golf/stats/:player_id", get(golf::get_player_golf_stats))
        .route("/golf/courses/search", get(course::search_courses))
        .route("/golf/courses/:api_id", get(course::get_course))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    info!("Server running on http://{}", bind_addr);
    axum::serve(listener, app).await.unwrap();
}
