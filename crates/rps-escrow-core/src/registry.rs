//! The game registry: store, player index, and lifecycle transitions.
//!
//! Every operation validates first, then moves value through the ledger, and
//! only then mutates the store. A ledger failure therefore aborts the whole
//! operation with nothing changed.

use crate::arbiter;
use crate::clock::{Clock, SystemClock};
use crate::config::RegistryConfig;
use crate::crypto::{HandCommit, Secret};
use crate::error::{RegistryError, Result};
use crate::escrow::{pot, EscrowLedger, Settlement};
use crate::games::{judge, GameResult, Hand};
use crate::protocol::{Amount, Game, GameEvent, GameId, GamePhase, GameState, Outcome, PlayerId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{info, warn};

pub struct GameRegistry<L, C = SystemClock> {
    config: RegistryConfig,
    /// Indexed by game id
    games: Vec<Game>,
    games_by_player: HashMap<PlayerId, Vec<GameId>>,
    events: Vec<GameEvent>,
    ledger: L,
    clock: C,
    /// Latest instant handed to the state machine
    last_seen: Option<DateTime<Utc>>,
}

impl<L: EscrowLedger> GameRegistry<L, SystemClock> {
    pub fn new(config: RegistryConfig, ledger: L) -> Self {
        Self::with_clock(config, ledger, SystemClock)
    }
}

impl<L: EscrowLedger, C: Clock> GameRegistry<L, C> {
    pub fn with_clock(config: RegistryConfig, ledger: L, clock: C) -> Self {
        Self {
            config,
            games: Vec::new(),
            games_by_player: HashMap::new(),
            events: Vec::new(),
            ledger,
            clock,
            last_seen: None,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current time, never earlier than a previous reading
    fn now(&mut self) -> DateTime<Utc> {
        let reading = self.clock.now();
        let now = match self.last_seen {
            Some(last) if last > reading => last,
            _ => reading,
        };
        self.last_seen = Some(now);
        now
    }

    // Transitions

    /// Open a game with player1's commitment and stake
    pub fn create_game(
        &mut self,
        player1: PlayerId,
        commitment: HandCommit,
        stake: Amount,
        deposit: Amount,
    ) -> Result<GameId> {
        if deposit != stake || stake < self.config.min_bet {
            warn!(
                "Rejected game from {}: stake {} deposit {} (minimum {})",
                player1, stake, deposit, self.config.min_bet
            );
            return Err(RegistryError::InsufficientBet {
                stake,
                deposited: deposit,
                minimum: self.config.min_bet,
            });
        }

        let game_id = GameId::new(self.games.len() as u64);
        let now = self.now();

        self.ledger.lock(game_id, &player1, stake)?;

        self.games
            .push(Game::new(game_id, player1, commitment, stake, now));
        self.index(player1, game_id);

        info!("Player {} created game {} with bet {}", player1, game_id, stake);
        self.emit(GameEvent::Created {
            game_id,
            player1,
            bet: stake,
        });

        Ok(game_id)
    }

    /// Join a created game with a plaintext hand and a matching stake.
    ///
    /// Unlike the contract this registry models, the creator is refused with
    /// `OwnGame` instead of being allowed to play against themselves.
    pub fn join_game(
        &mut self,
        game_id: GameId,
        player2: PlayerId,
        hand: Hand,
        deposit: Amount,
    ) -> Result<()> {
        let game = self
            .game(game_id)
            .ok_or(RegistryError::GameNotAvailable(game_id))?;

        if game.state() != GameState::Created {
            return Err(RegistryError::GameNotAvailable(game_id));
        }
        if game.player1 == player2 {
            return Err(RegistryError::OwnGame(game_id));
        }
        if deposit != game.bet {
            warn!(
                "Rejected join of game {} by {}: deposit {} != bet {}",
                game_id, player2, deposit, game.bet
            );
            return Err(RegistryError::IncorrectBetAmount {
                expected: game.bet,
                deposited: deposit,
            });
        }

        let bet = game.bet;
        let joined_at = self.now();

        self.ledger.lock(game_id, &player2, bet)?;

        self.set_phase(
            game_id,
            GamePhase::Joined {
                player2,
                player2_hand: hand,
                joined_at,
            },
        );
        self.index(player2, game_id);

        info!("Player {} joined game {}", player2, game_id);
        self.emit(GameEvent::Joined {
            game_id,
            player2,
            hand,
        });

        Ok(())
    }

    /// Player1 opens their commitment; the game is resolved and paid out
    pub fn reveal_hand(
        &mut self,
        game_id: GameId,
        caller: PlayerId,
        hand: Hand,
        secret: &Secret,
    ) -> Result<GameEvent> {
        let game = self
            .game(game_id)
            .ok_or(RegistryError::GameNotAvailable(game_id))?;

        if game.player1 != caller {
            return Err(RegistryError::NotYourGame(game_id));
        }
        let (player2, player2_hand, joined_at) = match game.phase {
            GamePhase::Joined {
                player2,
                player2_hand,
                joined_at,
            } => (player2, player2_hand, joined_at),
            _ => return Err(RegistryError::GameNotAvailable(game_id)),
        };
        if !game.player1_hand_commit.verify(hand, secret) {
            warn!("Invalid reveal for game {} by {}", game_id, caller);
            return Err(RegistryError::InvalidReveal(game_id));
        }

        let player1 = game.player1;
        let bet = game.bet;
        let (outcome, winner, settlement) = match judge(hand, player2_hand) {
            GameResult::Draw => (
                Outcome::Draw,
                None,
                Settlement::Split {
                    player1,
                    player2,
                    stake: bet,
                },
            ),
            GameResult::Player1Wins => (
                Outcome::NormalEnd,
                Some(player1),
                Settlement::Winner {
                    to: player1,
                    pot: pot(bet)?,
                },
            ),
            GameResult::Player2Wins => (
                Outcome::NormalEnd,
                Some(player2),
                Settlement::Winner {
                    to: player2,
                    pot: pot(bet)?,
                },
            ),
        };

        self.finish(
            game_id,
            GamePhase::Finished {
                player2,
                player2_hand,
                joined_at,
                outcome,
                winner,
            },
            settlement,
        )
    }

    /// Player1 withdraws a game nobody has joined
    pub fn cancel_game(&mut self, game_id: GameId, caller: PlayerId) -> Result<GameEvent> {
        let game = self
            .game(game_id)
            .ok_or(RegistryError::GameNotAvailable(game_id))?;

        if game.player1 != caller {
            return Err(RegistryError::NotYourGame(game_id));
        }
        if game.state() != GameState::Created {
            return Err(RegistryError::GameNotAvailable(game_id));
        }

        let settlement = Settlement::Refund {
            to: game.player1,
            stake: game.bet,
        };
        let cancelled_at = self.now();

        self.ledger.release(game_id, &settlement.payouts())?;
        self.set_phase(game_id, GamePhase::Cancelled { cancelled_at });

        info!("Game {} cancelled by {}", game_id, caller);
        Ok(self.emit(GameEvent::Cancelled { game_id }))
    }

    /// Player2 takes the pot once player1 has let the reveal window lapse
    pub fn claim_timeout(&mut self, game_id: GameId, caller: PlayerId) -> Result<GameEvent> {
        let game = self
            .game(game_id)
            .ok_or(RegistryError::GameNotAvailable(game_id))?;

        if game.player2() != Some(caller) {
            return Err(RegistryError::NotYourGame(game_id));
        }
        let (player2, player2_hand, joined_at) = match game.phase {
            GamePhase::Joined {
                player2,
                player2_hand,
                joined_at,
            } => (player2, player2_hand, joined_at),
            _ => return Err(RegistryError::GameNotAvailable(game_id)),
        };
        let pot = pot(game.bet)?;

        let window = self.config.reveal_window;
        let now = self.now();
        if !arbiter::can_claim(now, joined_at, window) {
            warn!("Early timeout claim on game {} by {}", game_id, caller);
            return Err(RegistryError::TimeoutNotYetReached {
                game: game_id,
                deadline: arbiter::reveal_deadline(joined_at, window),
            });
        }

        self.finish(
            game_id,
            GamePhase::Finished {
                player2,
                player2_hand,
                joined_at,
                outcome: Outcome::RevealTimedOut,
                winner: Some(player2),
            },
            Settlement::Winner { to: player2, pot },
        )
    }

    fn finish(
        &mut self,
        game_id: GameId,
        phase: GamePhase,
        settlement: Settlement,
    ) -> Result<GameEvent> {
        let (outcome, winner) = match &phase {
            GamePhase::Finished {
                outcome, winner, ..
            } => (*outcome, *winner),
            _ => return Err(RegistryError::GameNotAvailable(game_id)),
        };

        self.ledger.release(game_id, &settlement.payouts())?;
        self.set_phase(game_id, phase);

        info!(
            "Game {} finished: {:?}, winner {:?}",
            game_id, outcome, winner
        );
        Ok(self.emit(GameEvent::Finished {
            game_id,
            winner,
            outcome,
        }))
    }

    // Queries

    pub fn get_game(&self, game_id: GameId) -> Result<&Game> {
        self.game(game_id)
            .ok_or(RegistryError::GameNotFound(game_id))
    }

    /// Number of games ever created
    pub fn games_count(&self) -> u64 {
        self.games.len() as u64
    }

    /// Ids of games the player created or joined, in creation order
    pub fn games_of_player(&self, player: &PlayerId) -> Vec<GameId> {
        let mut ids = self
            .games_by_player
            .get(player)
            .cloned()
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Instant from which player2 may claim a joined game
    pub fn reveal_deadline(&self, game_id: GameId) -> Result<Option<DateTime<Utc>>> {
        let window = self.config.reveal_window;
        let game = self.get_game(game_id)?;
        Ok(game
            .joined_at()
            .and_then(|joined_at| arbiter::reveal_deadline(joined_at, window)))
    }

    /// Every event in emission order
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    // Store internals

    fn game(&self, game_id: GameId) -> Option<&Game> {
        self.games.get(game_id.index())
    }

    fn set_phase(&mut self, game_id: GameId, phase: GamePhase) {
        if let Some(game) = self.games.get_mut(game_id.index()) {
            game.phase = phase;
        }
    }

    fn index(&mut self, player: PlayerId, game_id: GameId) {
        self.games_by_player.entry(player).or_default().push(game_id);
    }

    fn emit(&mut self, event: GameEvent) -> GameEvent {
        self.events.push(event.clone());
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use crate::escrow::{LedgerError, MockLedger};
    use chrono::Duration;

    const BET: Amount = 1_000;

    fn registry() -> (GameRegistry<MockLedger, SimulatedClock>, SimulatedClock) {
        let config = RegistryConfig {
            min_bet: 100,
            reveal_window: Duration::hours(24),
        };
        let clock = SimulatedClock::starting_at(Utc::now());
        let registry = GameRegistry::with_clock(config, MockLedger::new(), clock.clone());
        (registry, clock)
    }

    fn funded_player(registry: &mut GameRegistry<MockLedger, SimulatedClock>) -> PlayerId {
        let player = PlayerId::new();
        registry.ledger_mut().fund(player, 10_000);
        player
    }

    #[test]
    fn test_cannot_join_own_game() {
        let (mut registry, _) = registry();
        let p1 = funded_player(&mut registry);
        let commit = HandCommit::compute(Hand::Rock, &Secret::new("s"));
        let id = registry.create_game(p1, commit, BET, BET).unwrap();

        assert_eq!(
            registry.join_game(id, p1, Hand::Paper, BET),
            Err(RegistryError::OwnGame(id))
        );
        assert_eq!(registry.games_of_player(&p1), vec![id]);
    }

    #[test]
    fn test_unfunded_creator_leaves_no_game() {
        let (mut registry, _) = registry();
        let broke = PlayerId::new();
        let commit = HandCommit::compute(Hand::Rock, &Secret::new("s"));

        let result = registry.create_game(broke, commit, BET, BET);

        assert!(matches!(
            result,
            Err(RegistryError::Escrow(LedgerError::InsufficientFunds { .. }))
        ));
        assert_eq!(registry.games_count(), 0);
        assert!(registry.games_of_player(&broke).is_empty());
        assert!(registry.events().is_empty());
    }

    #[test]
    fn test_failed_payout_aborts_reveal() {
        let (mut registry, _) = registry();
        let p1 = funded_player(&mut registry);
        let p2 = funded_player(&mut registry);
        let secret = Secret::new("secret");
        let id = registry
            .create_game(p1, HandCommit::compute(Hand::Rock, &secret), BET, BET)
            .unwrap();
        registry.join_game(id, p2, Hand::Paper, BET).unwrap();
        registry.ledger_mut().reject_payouts_to(p2);

        let result = registry.reveal_hand(id, p1, Hand::Rock, &secret);

        assert!(matches!(
            result,
            Err(RegistryError::Escrow(LedgerError::TransferFailed(_)))
        ));
        assert_eq!(registry.get_game(id).unwrap().state(), GameState::Joined);
        assert_eq!(registry.ledger().escrowed(id), 2 * BET);
        assert_eq!(registry.events().len(), 2);

        registry.ledger_mut().accept_payouts_to(&p2);
        registry.reveal_hand(id, p1, Hand::Rock, &secret).unwrap();
        assert_eq!(registry.ledger().balance(&p2), 10_000 + BET);
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let start = Utc::now();
        let clock = SimulatedClock::starting_at(start);
        let mut registry =
            GameRegistry::with_clock(RegistryConfig::default(), MockLedger::new(), clock.clone());

        assert_eq!(registry.now(), start);
        // A source that jumps back is clamped to the latest reading
        clock.advance(Duration::seconds(-60));
        assert_eq!(registry.now(), start);
        clock.advance(Duration::seconds(120));
        assert_eq!(registry.now(), start + Duration::seconds(60));
    }

    #[test]
    fn test_claim_timeout_on_created_game() {
        let (mut registry, clock) = registry();
        let p1 = funded_player(&mut registry);
        let other = funded_player(&mut registry);
        let id = registry
            .create_game(p1, HandCommit::from_bytes([7u8; 32]), BET, BET)
            .unwrap();
        clock.advance(Duration::days(2));

        assert_eq!(
            registry.claim_timeout(id, other),
            Err(RegistryError::NotYourGame(id))
        );
        assert_eq!(
            registry.claim_timeout(id, p1),
            Err(RegistryError::NotYourGame(id))
        );
    }

    #[test]
    fn test_reveal_deadline() {
        let (mut registry, clock) = registry();
        let p1 = funded_player(&mut registry);
        let p2 = funded_player(&mut registry);
        let id = registry
            .create_game(p1, HandCommit::from_bytes([1u8; 32]), BET, BET)
            .unwrap();
        assert_eq!(registry.reveal_deadline(id).unwrap(), None);

        registry.join_game(id, p2, Hand::Rock, BET).unwrap();
        assert_eq!(
            registry.reveal_deadline(id).unwrap(),
            Some(clock.now() + Duration::hours(24))
        );
        assert_eq!(
            registry.reveal_deadline(GameId::new(5)),
            Err(RegistryError::GameNotFound(GameId::new(5)))
        );
    }

    #[test]
    fn test_system_clock_registry() {
        let mut registry = GameRegistry::new(RegistryConfig::default(), MockLedger::new());
        let player = PlayerId::new();
        let min_bet = registry.config().min_bet;
        registry.ledger_mut().fund(player, min_bet);

        let id = registry
            .create_game(player, HandCommit::from_bytes([0u8; 32]), min_bet, min_bet)
            .unwrap();
        assert!(registry.get_game(id).unwrap().created_at <= registry.clock().now());
    }

    #[test]
    fn test_window_past_max_date_never_times_out() {
        let config = RegistryConfig {
            min_bet: 100,
            reveal_window: Duration::seconds(9_000_000_000_000),
        };
        let clock = SimulatedClock::starting_at(Utc::now());
        let mut registry = GameRegistry::with_clock(config, MockLedger::new(), clock.clone());
        let p1 = funded_player(&mut registry);
        let p2 = funded_player(&mut registry);
        let id = registry
            .create_game(p1, HandCommit::from_bytes([2u8; 32]), BET, BET)
            .unwrap();
        registry.join_game(id, p2, Hand::Rock, BET).unwrap();

        assert_eq!(registry.reveal_deadline(id).unwrap(), None);
        clock.advance(Duration::days(365));
        assert_eq!(
            registry.claim_timeout(id, p2),
            Err(RegistryError::TimeoutNotYetReached {
                game: id,
                deadline: None
            })
        );
        assert_eq!(registry.get_game(id).unwrap().state(), GameState::Joined);
        assert_eq!(registry.ledger().escrowed(id), 2 * BET);
    }
}
