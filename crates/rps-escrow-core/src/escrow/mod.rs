//! Escrow of game stakes.
//!
//! The registry decides *who* gets paid with a [`Settlement`]; an
//! [`EscrowLedger`] moves the value. Implementations:
//! - [`MockLedger`] keeps wallets and escrow accounts in memory

mod mock;
mod settlement;
mod traits;

pub use mock::MockLedger;
pub use settlement::{pot, Settlement};
pub use traits::{EscrowLedger, LedgerError, Payout};
