//! RPS Escrow Core Library
//!
//! Two-party Rock-Paper-Scissors with escrowed stakes and a commit-reveal
//! protocol. Player1 commits to a hidden hand, player2 joins with a plaintext
//! hand, and the pot is paid out on reveal, or to player2 once the reveal
//! window lapses.

pub mod arbiter;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod error;
pub mod escrow;
pub mod games;
pub mod protocol;
pub mod registry;

pub use clock::{Clock, SimulatedClock, SystemClock};
pub use config::RegistryConfig;
pub use crypto::{HandCommit, Secret};
pub use error::{RegistryError, Result};
pub use escrow::{EscrowLedger, LedgerError, MockLedger, Payout, Settlement};
pub use games::{GameResult, Hand, InvalidHand};
pub use protocol::{Amount, Game, GameEvent, GameId, GamePhase, GameState, Outcome, PlayerId};
pub use registry::GameRegistry;
