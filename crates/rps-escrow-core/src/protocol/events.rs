//! Events signalled by registry transitions.

use crate::games::Hand;
use crate::protocol::{Amount, GameId, Outcome, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Created {
        game_id: GameId,
        player1: PlayerId,
        bet: Amount,
    },
    Joined {
        game_id: GameId,
        player2: PlayerId,
        hand: Hand,
    },
    /// `winner` is `None` for a draw
    Finished {
        game_id: GameId,
        winner: Option<PlayerId>,
        outcome: Outcome,
    },
    Cancelled {
        game_id: GameId,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::Created { game_id, .. }
            | GameEvent::Joined { game_id, .. }
            | GameEvent::Finished { game_id, .. }
            | GameEvent::Cancelled { game_id } => *game_id,
        }
    }
}
