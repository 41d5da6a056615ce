//! Rock-Paper-Scissors hands and resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Numeric hand value outside 0..=2
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("invalid hand value {0}: expected 0 (rock), 1 (paper) or 2 (scissors)")]
pub struct InvalidHand(pub u8);

/// A hand, serialized by its numeric code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Hand {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl Hand {
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Paper, Hand::Scissors];

    /// Check if this hand beats the other
    pub fn beats(&self, other: &Hand) -> bool {
        matches!(
            (self, other),
            (Hand::Rock, Hand::Scissors) | (Hand::Scissors, Hand::Paper) | (Hand::Paper, Hand::Rock)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Hand::Rock => "rock",
            Hand::Paper => "paper",
            Hand::Scissors => "scissors",
        }
    }
}

impl TryFrom<u8> for Hand {
    type Error = InvalidHand;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Hand::Rock),
            1 => Ok(Hand::Paper),
            2 => Ok(Hand::Scissors),
            other => Err(InvalidHand(other)),
        }
    }
}

impl From<Hand> for u8 {
    fn from(hand: Hand) -> Self {
        hand as u8
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of comparing player1's hand against player2's
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Player1Wins,
    Player2Wins,
    Draw,
}

/// Rock beats Scissors, Scissors beats Paper, Paper beats Rock
pub fn judge(player1: Hand, player2: Hand) -> GameResult {
    if player1 == player2 {
        GameResult::Draw
    } else if player1.beats(&player2) {
        GameResult::Player1Wins
    } else {
        GameResult::Player2Wins
    }
}
