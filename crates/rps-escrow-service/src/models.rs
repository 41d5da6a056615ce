//! Request and response bodies.

use rps_escrow_core::{
    Amount, Game, GameEvent, GameId, GameState, Hand, HandCommit, Outcome, PlayerId, Secret,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct PlayerResponse {
    pub player_id: PlayerId,
    pub balance: Amount,
}

#[derive(Serialize, Deserialize)]
pub struct PlayerGamesResponse {
    pub player_id: PlayerId,
    pub games: Vec<GameId>,
}

#[derive(Deserialize)]
pub struct CommitRequest {
    pub hand: Hand,
    /// Generated when omitted
    pub secret: Option<Secret>,
}

#[derive(Serialize, Deserialize)]
pub struct CommitResponse {
    pub commitment: HandCommit,
    pub secret: Secret,
}

#[derive(Deserialize)]
pub struct CreateGameRequest {
    pub commitment: HandCommit,
    pub stake: Amount,
    /// Value attached to the request
    pub deposit: Amount,
}

#[derive(Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub game_id: GameId,
}

#[derive(Deserialize)]
pub struct JoinGameRequest {
    pub hand: Hand,
    pub deposit: Amount,
}

#[derive(Deserialize)]
pub struct RevealRequest {
    pub hand: Hand,
    pub secret: Secret,
}

#[derive(Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Flat view of a game record
#[derive(Serialize, Deserialize)]
pub struct GameResponse {
    pub id: GameId,
    pub player1: PlayerId,
    pub player2: Option<PlayerId>,
    pub player1_hand_commit: HandCommit,
    pub player2_hand: Option<Hand>,
    pub bet: Amount,
    pub state: GameState,
    pub outcome: Outcome,
    pub winner: Option<PlayerId>,
    pub created_at: String,
    pub joined_at: Option<String>,
    pub reveal_deadline: Option<String>,
}

impl GameResponse {
    pub fn new(game: &Game, reveal_deadline: Option<chrono::DateTime<chrono::Utc>>) -> Self {
        Self {
            id: game.id,
            player1: game.player1,
            player2: game.player2(),
            player1_hand_commit: game.player1_hand_commit,
            player2_hand: game.player2_hand(),
            bet: game.bet,
            state: game.state(),
            outcome: game.outcome(),
            winner: game.winner(),
            created_at: game.created_at.to_rfc3339(),
            joined_at: game.joined_at().map(|t| t.to_rfc3339()),
            // Only meaningful while player1 can still reveal
            reveal_deadline: reveal_deadline
                .filter(|_| game.state() == GameState::Joined)
                .map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct GamesCountResponse {
    pub count: u64,
}

#[derive(Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<GameEvent>,
}

#[derive(Deserialize)]
pub struct TickRequest {
    pub seconds: i64,
}

#[derive(Serialize, Deserialize)]
pub struct TickResponse {
    pub now: String,
}
