//! Protocol types and events.

mod events;
mod types;

pub use events::GameEvent;
pub use types::{Amount, Game, GameId, GamePhase, GameState, Outcome, PlayerId};
