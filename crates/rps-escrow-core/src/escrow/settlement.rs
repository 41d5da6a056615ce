//! Payout planning.

use super::traits::{LedgerError, Payout};
use crate::protocol::{Amount, PlayerId};

/// Combined stake of both participants
pub fn pot(bet: Amount) -> Result<Amount, LedgerError> {
    bet.checked_mul(2).ok_or(LedgerError::Overflow)
}

/// Where a game's escrow goes when it reaches a terminal state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Whole pot to one participant
    Winner { to: PlayerId, pot: Amount },
    /// Each stake back to its depositor
    Split {
        player1: PlayerId,
        player2: PlayerId,
        stake: Amount,
    },
    /// Sole stake back to the creator
    Refund { to: PlayerId, stake: Amount },
}

impl Settlement {
    pub fn payouts(&self) -> Vec<Payout> {
        match *self {
            Settlement::Winner { to, pot } => vec![Payout { to, amount: pot }],
            Settlement::Split {
                player1,
                player2,
                stake,
            } => vec![
                Payout {
                    to: player1,
                    amount: stake,
                },
                Payout {
                    to: player2,
                    amount: stake,
                },
            ],
            Settlement::Refund { to, stake } => vec![Payout { to, amount: stake }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pot_doubles_bet() {
        assert_eq!(pot(500), Ok(1_000));
        assert_eq!(pot(u64::MAX), Err(LedgerError::Overflow));
    }

    #[test]
    fn test_split_returns_each_stake() {
        let p1 = PlayerId::new();
        let p2 = PlayerId::new();
        let settlement = Settlement::Split {
            player1: p1,
            player2: p2,
            stake: 10,
        };

        assert_eq!(
            settlement.payouts(),
            vec![Payout { to: p1, amount: 10 }, Payout { to: p2, amount: 10 }]
        );
    }

    #[test]
    fn test_winner_takes_pot() {
        let p = PlayerId::new();
        let settlement = Settlement::Winner { to: p, pot: 20 };

        assert_eq!(settlement.payouts(), vec![Payout { to: p, amount: 20 }]);
    }
}
