use crate::escrow::LedgerError;
use crate::protocol::{Amount, GameId};
use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Rejections of registry operations. A rejected operation changes nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Bet amount is less than the minimum bet (stake {stake}, deposited {deposited}, minimum {minimum})")]
    InsufficientBet {
        stake: Amount,
        deposited: Amount,
        minimum: Amount,
    },

    #[error("Game not available: {0}")]
    GameNotAvailable(GameId),

    #[error("Incorrect bet amount: expected {expected}, deposited {deposited}")]
    IncorrectBetAmount { expected: Amount, deposited: Amount },

    #[error("Not your game: {0}")]
    NotYourGame(GameId),

    #[error("Cannot join your own game: {0}")]
    OwnGame(GameId),

    #[error("Invalid reveal for game {0}: hand and secret do not match the commitment")]
    InvalidReveal(GameId),

    #[error("Cannot claim timeout yet for game {game}")]
    TimeoutNotYetReached {
        game: GameId,
        /// `None` when the window never closes
        deadline: Option<DateTime<Utc>>,
    },

    #[error("Game not found: {0}")]
    GameNotFound(GameId),

    #[error("Escrow error: {0}")]
    Escrow(#[from] LedgerError),
}
