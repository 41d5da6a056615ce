//! RPS Escrow Service
//!
//! HTTP front end for the game registry. Callers identify themselves with
//! an `X-Player-Id` header.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use handlers::*;
pub use config::ServiceConfig;
pub use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Players
        .route("/api/players/register", post(register_player))
        .route("/api/players/:player_id/balance", get(get_balance))
        .route("/api/players/:player_id/games", get(list_player_games))
        // Commitment helper
        .route("/api/commitments", post(compute_commitment))
        // Games
        .route("/api/games", post(create_game))
        .route("/api/games/count", get(games_count))
        .route("/api/games/:game_id", get(get_game))
        .route("/api/games/:game_id/join", post(join_game))
        .route("/api/games/:game_id/reveal", post(reveal_hand))
        .route("/api/games/:game_id/cancel", post(cancel_game))
        .route("/api/games/:game_id/claim-timeout", post(claim_timeout))
        .route("/api/events", get(list_events))
        // System
        .route("/api/system/tick", post(tick))
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
