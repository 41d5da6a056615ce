//! Escrow ledger trait definition.

use crate::protocol::{Amount, GameId, PlayerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from ledger operations. A failed operation moves no value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("No escrow held for game {0}")]
    EscrowNotFound(GameId),

    #[error("Escrow for game {0} already released")]
    AlreadyReleased(GameId),

    #[error("Insufficient funds: need {need}, have {available}")]
    InsufficientFunds { need: Amount, available: Amount },

    #[error("Payouts of {requested} do not match the {held} held in escrow")]
    AmountMismatch { held: Amount, requested: Amount },

    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    #[error("Amount overflow")]
    Overflow,
}

/// A single transfer out of escrow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub to: PlayerId,
    pub amount: Amount,
}

/// Holds each game's stakes until the game settles.
///
/// Both mutating operations are all-or-nothing.
pub trait EscrowLedger: Send {
    /// Move `amount` from the player's wallet into the game's escrow account
    fn lock(&mut self, game: GameId, from: &PlayerId, amount: Amount) -> Result<(), LedgerError>;

    /// Pay the game's whole escrow account out to `payouts`.
    ///
    /// The payouts must add up to exactly the held amount, and an account can
    /// only be released once.
    fn release(&mut self, game: GameId, payouts: &[Payout]) -> Result<(), LedgerError>;

    /// Value currently held for a game
    fn escrowed(&self, game: GameId) -> Amount;

    /// Wallet balance of a player
    fn balance(&self, player: &PlayerId) -> Amount;
}
