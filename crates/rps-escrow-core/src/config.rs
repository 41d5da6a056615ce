//! Registry configuration.

use crate::protocol::Amount;
use chrono::Duration;

/// 0.001 of an 18-decimal unit
pub const DEFAULT_MIN_BET: Amount = 1_000_000_000_000_000;

pub const DEFAULT_REVEAL_WINDOW_SECS: i64 = 24 * 60 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Smallest accepted stake per participant
    pub min_bet: Amount,
    /// How long player1 has to reveal after player2 joins
    pub reveal_window: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            min_bet: DEFAULT_MIN_BET,
            reveal_window: Duration::seconds(DEFAULT_REVEAL_WINDOW_SECS),
        }
    }
}
