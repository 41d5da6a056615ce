//! Hands and resolution rules.

mod rps;

pub use rps::{judge, GameResult, Hand, InvalidHand};
