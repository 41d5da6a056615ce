//! Protocol types.

use crate::crypto::HandCommit;
use crate::games::Hand;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Base units of the single fungible value unit
pub type Amount = u64;

/// Sequential game identifier, assigned at creation and never reused
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(u64);

impl GameId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub(crate) fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a caller
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Create a new random player ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a game ended. Codes match the event arguments of the original protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pending = 0,
    NormalEnd = 1,
    Draw = 2,
    RevealTimedOut = 3,
}

/// Lifecycle summary of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Created,
    Joined,
    Finished,
    Cancelled,
}

/// Lifecycle of a game together with the data each stage carries
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GamePhase {
    /// Waiting for a second player
    Created,
    /// Waiting for player1 to reveal
    Joined {
        player2: PlayerId,
        player2_hand: Hand,
        joined_at: DateTime<Utc>,
    },
    Finished {
        player2: PlayerId,
        player2_hand: Hand,
        joined_at: DateTime<Utc>,
        outcome: Outcome,
        /// `None` for a draw
        winner: Option<PlayerId>,
    },
    Cancelled {
        cancelled_at: DateTime<Utc>,
    },
}

/// A game record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub player1: PlayerId,
    pub player1_hand_commit: HandCommit,
    /// Stake per participant
    pub bet: Amount,
    pub created_at: DateTime<Utc>,
    pub phase: GamePhase,
}

impl Game {
    pub(crate) fn new(
        id: GameId,
        player1: PlayerId,
        player1_hand_commit: HandCommit,
        bet: Amount,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            player1,
            player1_hand_commit,
            bet,
            created_at,
            phase: GamePhase::Created,
        }
    }

    pub fn state(&self) -> GameState {
        match self.phase {
            GamePhase::Created => GameState::Created,
            GamePhase::Joined { .. } => GameState::Joined,
            GamePhase::Finished { .. } => GameState::Finished,
            GamePhase::Cancelled { .. } => GameState::Cancelled,
        }
    }

    pub fn player2(&self) -> Option<PlayerId> {
        match &self.phase {
            GamePhase::Joined { player2, .. } | GamePhase::Finished { player2, .. } => {
                Some(*player2)
            }
            GamePhase::Created | GamePhase::Cancelled { .. } => None,
        }
    }

    pub fn player2_hand(&self) -> Option<Hand> {
        match &self.phase {
            GamePhase::Joined { player2_hand, .. } | GamePhase::Finished { player2_hand, .. } => {
                Some(*player2_hand)
            }
            GamePhase::Created | GamePhase::Cancelled { .. } => None,
        }
    }

    pub fn joined_at(&self) -> Option<DateTime<Utc>> {
        match &self.phase {
            GamePhase::Joined { joined_at, .. } | GamePhase::Finished { joined_at, .. } => {
                Some(*joined_at)
            }
            GamePhase::Created | GamePhase::Cancelled { .. } => None,
        }
    }

    /// `Pending` until the game finishes
    pub fn outcome(&self) -> Outcome {
        match &self.phase {
            GamePhase::Finished { outcome, .. } => *outcome,
            _ => Outcome::Pending,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match &self.phase {
            GamePhase::Finished { winner, .. } => *winner,
            _ => None,
        }
    }

    /// Number of stakes currently held for this game
    pub fn deposits(&self) -> u64 {
        match self.phase {
            GamePhase::Created => 1,
            GamePhase::Joined { .. } => 2,
            GamePhase::Finished { .. } | GamePhase::Cancelled { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Secret;

    fn sample_game() -> Game {
        Game::new(
            GameId::new(0),
            PlayerId::new(),
            HandCommit::compute(Hand::Rock, &Secret::new("secret")),
            1_000,
            Utc::now(),
        )
    }

    #[test]
    fn test_player_id_generation() {
        assert_ne!(PlayerId::new(), PlayerId::new());
    }

    #[test]
    fn test_player_id_parse() {
        let id = PlayerId::new();
        assert_eq!(id.to_string().parse::<PlayerId>().unwrap(), id);
        assert!("not-a-uuid".parse::<PlayerId>().is_err());
    }

    #[test]
    fn test_created_game_view() {
        let game = sample_game();

        assert_eq!(game.state(), GameState::Created);
        assert_eq!(game.outcome(), Outcome::Pending);
        assert_eq!(game.player2(), None);
        assert_eq!(game.player2_hand(), None);
        assert_eq!(game.joined_at(), None);
        assert_eq!(game.deposits(), 1);
    }

    #[test]
    fn test_finished_game_view() {
        let mut game = sample_game();
        let player2 = PlayerId::new();
        let joined_at = Utc::now();
        game.phase = GamePhase::Finished {
            player2,
            player2_hand: Hand::Paper,
            joined_at,
            outcome: Outcome::NormalEnd,
            winner: Some(player2),
        };

        assert_eq!(game.state(), GameState::Finished);
        assert_eq!(game.outcome(), Outcome::NormalEnd);
        assert_eq!(game.winner(), Some(player2));
        assert_eq!(game.joined_at(), Some(joined_at));
        assert_eq!(game.deposits(), 0);
    }

    #[test]
    fn test_outcome_codes() {
        assert_eq!(Outcome::Pending as u8, 0);
        assert_eq!(Outcome::NormalEnd as u8, 1);
        assert_eq!(Outcome::Draw as u8, 2);
        assert_eq!(Outcome::RevealTimedOut as u8, 3);
    }
}
