//! HTTP API handlers.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use rps_escrow_core::{EscrowLedger, GameEvent, GameId, HandCommit, PlayerId, Secret};

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

// ============ Helper to get player from header ============

fn player_from_header(headers: &HeaderMap) -> Result<PlayerId, AppError> {
    headers
        .get("X-Player-Id")
        .ok_or(AppError::Unauthorized("Missing X-Player-Id header"))?
        .to_str()
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(AppError::Unauthorized("Invalid X-Player-Id header"))
}

// ============ Player handlers ============

pub async fn register_player(State(state): State<AppState>) -> Json<PlayerResponse> {
    let (player_id, balance) = state.register_player();
    Json(PlayerResponse { player_id, balance })
}

pub async fn get_balance(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
) -> Json<PlayerResponse> {
    let balance = state.registry().ledger().balance(&player_id);
    Json(PlayerResponse { player_id, balance })
}

pub async fn list_player_games(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
) -> Json<PlayerGamesResponse> {
    let games = state.registry().games_of_player(&player_id);
    Json(PlayerGamesResponse { player_id, games })
}

// ============ Commitment helper ============

pub async fn compute_commitment(Json(req): Json<CommitRequest>) -> Json<CommitResponse> {
    let secret = req.secret.unwrap_or_else(Secret::random);
    Json(CommitResponse {
        commitment: HandCommit::compute(req.hand, &secret),
        secret,
    })
}

// ============ Game handlers ============

pub async fn create_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateGameRequest>,
) -> Result<Json<CreateGameResponse>, AppError> {
    let player = player_from_header(&headers)?;
    let game_id = state
        .registry()
        .create_game(player, req.commitment, req.stake, req.deposit)?;
    Ok(Json(CreateGameResponse { game_id }))
}

pub async fn join_game(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
    headers: HeaderMap,
    Json(req): Json<JoinGameRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let player = player_from_header(&headers)?;
    state
        .registry()
        .join_game(game_id, player, req.hand, req.deposit)?;
    Ok(Json(StatusResponse {
        status: "joined".to_string(),
    }))
}

pub async fn reveal_hand(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
    headers: HeaderMap,
    Json(req): Json<RevealRequest>,
) -> Result<Json<GameEvent>, AppError> {
    let player = player_from_header(&headers)?;
    let event = state
        .registry()
        .reveal_hand(game_id, player, req.hand, &req.secret)?;
    Ok(Json(event))
}

pub async fn cancel_game(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
    headers: HeaderMap,
) -> Result<Json<GameEvent>, AppError> {
    let player = player_from_header(&headers)?;
    let event = state.registry().cancel_game(game_id, player)?;
    Ok(Json(event))
}

pub async fn claim_timeout(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
    headers: HeaderMap,
) -> Result<Json<GameEvent>, AppError> {
    let player = player_from_header(&headers)?;
    let event = state.registry().claim_timeout(game_id, player)?;
    Ok(Json(event))
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
) -> Result<Json<GameResponse>, AppError> {
    let registry = state.registry();
    let game = registry.get_game(game_id)?;
    let deadline = registry.reveal_deadline(game_id)?;
    Ok(Json(GameResponse::new(game, deadline)))
}

pub async fn games_count(State(state): State<AppState>) -> Json<GamesCountResponse> {
    Json(GamesCountResponse {
        count: state.registry().games_count(),
    })
}

pub async fn list_events(State(state): State<AppState>) -> Json<EventsResponse> {
    Json(EventsResponse {
        events: state.registry().events().to_vec(),
    })
}

// ============ System ============

pub async fn tick(
    State(state): State<AppState>,
    Json(req): Json<TickRequest>,
) -> Result<Json<TickResponse>, AppError> {
    if req.seconds < 0 {
        return Err(AppError::BadRequest(
            "Time can only move forward".to_string(),
        ));
    }
    let now = state
        .advance_time(req.seconds)
        .ok_or_else(|| AppError::BadRequest("Time step out of range".to_string()))?;
    Ok(Json(TickResponse {
        now: now.to_rfc3339(),
    }))
}

pub async fn health() -> &'static str {
    "ok"
}
