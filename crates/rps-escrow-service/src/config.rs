//! Service configuration from environment variables.

use rps_escrow_core::{Amount, RegistryConfig};

/// One full 18-decimal unit
pub const DEFAULT_STARTING_BALANCE: Amount = 1_000_000_000_000_000_000;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub port: u16,
    pub registry: RegistryConfig,
    /// Wallet credit for newly registered players
    pub starting_balance: Amount,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            registry: RegistryConfig::default(),
            starting_balance: DEFAULT_STARTING_BALANCE,
        }
    }
}

impl ServiceConfig {
    /// Read `PORT`, `RPS_MIN_BET`, `RPS_REVEAL_WINDOW_SECS` and
    /// `RPS_STARTING_BALANCE`, keeping defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        let port = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        let min_bet = parse("RPS_MIN_BET").unwrap_or(defaults.registry.min_bet);
        let reveal_window = parse("RPS_REVEAL_WINDOW_SECS")
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(defaults.registry.reveal_window);
        let starting_balance = parse("RPS_STARTING_BALANCE").unwrap_or(defaults.starting_balance);

        tracing::info!(
            "Config: port {}, min bet {}, reveal window {}s, starting balance {}",
            port,
            min_bet,
            reveal_window.num_seconds(),
            starting_balance
        );

        Self {
            port,
            registry: RegistryConfig {
                min_bet,
                reveal_window,
            },
            starting_balance,
        }
    }
}
