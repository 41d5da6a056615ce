//! Application state management.

use crate::config::ServiceConfig;
use chrono::{DateTime, Duration, Utc};
use rps_escrow_core::{Amount, GameRegistry, MockLedger, PlayerId, SimulatedClock};
use std::sync::{Arc, Mutex, MutexGuard};

pub type Registry = GameRegistry<MockLedger, SimulatedClock>;

/// Shared application state
///
/// Handlers hold the registry lock for a whole operation, so operations are
/// applied one at a time in a single order.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<Mutex<Registry>>,
    clock: SimulatedClock,
    starting_balance: Amount,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Self {
        let clock = SimulatedClock::new();
        let registry = GameRegistry::with_clock(config.registry, MockLedger::new(), clock.clone());

        Self {
            registry: Arc::new(Mutex::new(registry)),
            clock,
            starting_balance: config.starting_balance,
        }
    }

    pub fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create a player with a funded wallet
    pub fn register_player(&self) -> (PlayerId, Amount) {
        let player = PlayerId::new();
        let balance = self
            .registry()
            .ledger_mut()
            .fund(player, self.starting_balance);
        tracing::info!("Registered player {} with balance {}", player, balance);
        (player, balance)
    }

    /// Advance simulated time by seconds, `None` if the result is out of range
    pub fn advance_time(&self, seconds: i64) -> Option<DateTime<Utc>> {
        let now = self.clock.advance(Duration::try_seconds(seconds)?)?;
        tracing::info!("Simulated time advanced {}s to {}", seconds, now);
        Some(now)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ServiceConfig::default())
    }
}
