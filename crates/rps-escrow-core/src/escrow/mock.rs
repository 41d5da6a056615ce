//! In-memory escrow ledger.

use super::traits::{EscrowLedger, LedgerError, Payout};
use crate::protocol::{Amount, GameId, PlayerId};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EscrowStatus {
    Held,
    Released,
}

#[derive(Clone, Debug)]
struct EscrowAccount {
    held: Amount,
    status: EscrowStatus,
}

/// In-memory ledger with player wallets and one escrow account per game
#[derive(Clone, Debug, Default)]
pub struct MockLedger {
    balances: HashMap<PlayerId, Amount>,
    escrows: HashMap<GameId, EscrowAccount>,
    /// Recipients whose incoming transfers fail
    rejected: HashSet<PlayerId>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a player's wallet, returning the new balance
    pub fn fund(&mut self, player: PlayerId, amount: Amount) -> Amount {
        let balance = self.balances.entry(player).or_insert(0);
        *balance = balance.saturating_add(amount);
        *balance
    }

    /// Make every payout to `player` fail, simulating a recipient that refuses value
    pub fn reject_payouts_to(&mut self, player: PlayerId) {
        self.rejected.insert(player);
    }

    pub fn accept_payouts_to(&mut self, player: &PlayerId) {
        self.rejected.remove(player);
    }

    /// Value held across all unreleased escrow accounts
    pub fn total_escrowed(&self) -> Amount {
        self.escrows
            .values()
            .filter(|account| account.status == EscrowStatus::Held)
            .map(|account| account.held)
            .sum()
    }
}

impl EscrowLedger for MockLedger {
    fn lock(&mut self, game: GameId, from: &PlayerId, amount: Amount) -> Result<(), LedgerError> {
        let held = match self.escrows.get(&game) {
            Some(account) if account.status == EscrowStatus::Released => {
                return Err(LedgerError::AlreadyReleased(game))
            }
            Some(account) => account.held,
            None => 0,
        };

        let available = self.balance(from);
        if available < amount {
            return Err(LedgerError::InsufficientFunds {
                need: amount,
                available,
            });
        }
        let new_held = held.checked_add(amount).ok_or(LedgerError::Overflow)?;

        self.balances.insert(*from, available - amount);
        self.escrows.insert(
            game,
            EscrowAccount {
                held: new_held,
                status: EscrowStatus::Held,
            },
        );

        tracing::debug!("Locked {} from {} into escrow for game {}", amount, from, game);
        Ok(())
    }

    fn release(&mut self, game: GameId, payouts: &[Payout]) -> Result<(), LedgerError> {
        let account = self
            .escrows
            .get(&game)
            .ok_or(LedgerError::EscrowNotFound(game))?;

        if account.status == EscrowStatus::Released {
            return Err(LedgerError::AlreadyReleased(game));
        }

        let requested = payouts
            .iter()
            .try_fold(0u64, |acc, p| acc.checked_add(p.amount))
            .ok_or(LedgerError::Overflow)?;
        if requested != account.held {
            return Err(LedgerError::AmountMismatch {
                held: account.held,
                requested,
            });
        }

        // Stage every credit before touching state
        let mut staged: HashMap<PlayerId, Amount> = HashMap::new();
        for payout in payouts.iter().filter(|p| p.amount > 0) {
            if self.rejected.contains(&payout.to) {
                return Err(LedgerError::TransferFailed(format!(
                    "recipient {} rejected {}",
                    payout.to, payout.amount
                )));
            }
            let current = match staged.get(&payout.to) {
                Some(balance) => *balance,
                None => self.balance(&payout.to),
            };
            let credited = current
                .checked_add(payout.amount)
                .ok_or(LedgerError::Overflow)?;
            staged.insert(payout.to, credited);
        }

        self.balances.extend(staged);
        self.escrows.insert(
            game,
            EscrowAccount {
                held: 0,
                status: EscrowStatus::Released,
            },
        );

        tracing::debug!("Released {} from escrow for game {}", requested, game);
        Ok(())
    }

    fn escrowed(&self, game: GameId) -> Amount {
        self.escrows
            .get(&game)
            .filter(|account| account.status == EscrowStatus::Held)
            .map_or(0, |account| account.held)
    }

    fn balance(&self, player: &PlayerId) -> Amount {
        self.balances.get(player).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funded(amount: Amount) -> (MockLedger, PlayerId) {
        let mut ledger = MockLedger::new();
        let player = PlayerId::new();
        ledger.fund(player, amount);
        (ledger, player)
    }

    #[test]
    fn test_lock_moves_funds_into_escrow() {
        let (mut ledger, player) = funded(10_000);
        let game = GameId::new(0);

        ledger.lock(game, &player, 1_000).unwrap();

        assert_eq!(ledger.balance(&player), 9_000);
        assert_eq!(ledger.escrowed(game), 1_000);
        assert_eq!(ledger.total_escrowed(), 1_000);
    }

    #[test]
    fn test_insufficient_funds() {
        let (mut ledger, player) = funded(500);

        let result = ledger.lock(GameId::new(0), &player, 1_000);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientFunds {
                need: 1_000,
                available: 500
            })
        ));
        assert_eq!(ledger.balance(&player), 500);
        assert_eq!(ledger.escrowed(GameId::new(0)), 0);
    }

    #[test]
    fn test_release_pays_out_and_closes_account() {
        let (mut ledger, player1) = funded(10_000);
        let player2 = PlayerId::new();
        ledger.fund(player2, 10_000);
        let game = GameId::new(3);

        ledger.lock(game, &player1, 1_000).unwrap();
        ledger.lock(game, &player2, 1_000).unwrap();
        ledger
            .release(
                game,
                &[Payout {
                    to: player2,
                    amount: 2_000,
                }],
            )
            .unwrap();

        assert_eq!(ledger.balance(&player1), 9_000);
        assert_eq!(ledger.balance(&player2), 11_000);
        assert_eq!(ledger.escrowed(game), 0);
    }

    #[test]
    fn test_double_release_fails() {
        let (mut ledger, player) = funded(1_000);
        let game = GameId::new(0);
        let refund = [Payout {
            to: player,
            amount: 1_000,
        }];

        ledger.lock(game, &player, 1_000).unwrap();
        ledger.release(game, &refund).unwrap();

        assert_eq!(
            ledger.release(game, &refund),
            Err(LedgerError::AlreadyReleased(game))
        );
        assert_eq!(ledger.balance(&player), 1_000);
    }

    #[test]
    fn test_partial_release_is_rejected() {
        let (mut ledger, player) = funded(1_000);
        let game = GameId::new(0);
        ledger.lock(game, &player, 1_000).unwrap();

        let result = ledger.release(
            game,
            &[Payout {
                to: player,
                amount: 400,
            }],
        );

        assert_eq!(
            result,
            Err(LedgerError::AmountMismatch {
                held: 1_000,
                requested: 400
            })
        );
        assert_eq!(ledger.escrowed(game), 1_000);
    }

    #[test]
    fn test_rejected_recipient_moves_nothing() {
        let (mut ledger, player1) = funded(1_000);
        let player2 = PlayerId::new();
        ledger.fund(player2, 1_000);
        let game = GameId::new(0);
        ledger.lock(game, &player1, 1_000).unwrap();
        ledger.lock(game, &player2, 1_000).unwrap();
        ledger.reject_payouts_to(player2);

        let split = [
            Payout {
                to: player1,
                amount: 1_000,
            },
            Payout {
                to: player2,
                amount: 1_000,
            },
        ];
        assert!(matches!(
            ledger.release(game, &split),
            Err(LedgerError::TransferFailed(_))
        ));
        assert_eq!(ledger.balance(&player1), 0);
        assert_eq!(ledger.escrowed(game), 2_000);

        ledger.accept_payouts_to(&player2);
        ledger.release(game, &split).unwrap();
        assert_eq!(ledger.balance(&player1), 1_000);
        assert_eq!(ledger.balance(&player2), 1_000);
    }

    #[test]
    fn test_release_unknown_game() {
        let mut ledger = MockLedger::new();
        assert_eq!(
            ledger.release(GameId::new(9), &[]),
            Err(LedgerError::EscrowNotFound(GameId::new(9)))
        );
    }
}
