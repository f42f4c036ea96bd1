//! A simulated session: several players taking turns with one pair of dice
//! for a fixed number of shooter turns, reproducible from a single seed.

use log::info;
use rand::Rng;
use serde::Serialize;

use crate::bets::catalog::{BetCatalog, TableLimits};
use crate::dice::{Dice, DiceSnapshot};
use crate::game::entities::{Dollars, Player, PlayerTurn};
use crate::game::state_machine::{EngineResult, RoundEngine};
use crate::stats::{ConsecutiveNumberStatsKeeper, PlayerSnapshot, PlayerStats};
use crate::strategy::{BettingPolicy, PassLinePlacePolicy, no_press};

pub const DEFAULT_NUM_PLAYERS: usize = 6;
pub const DEFAULT_HOURS_OF_PLAY: u32 = 4;
/// One shooter turn runs a few minutes; sixty per hour approximates a busy
/// table without modeling the clock.
pub const TURNS_PER_HOUR: u32 = 60;
pub const DEFAULT_BET_UNIT: Dollars = 25;
pub const DEFAULT_BUY_IN: Dollars = 1000;
pub const DEFAULT_TABLE_LIMIT: Dollars = 5000;

/// Everything a run needs. `seed: None` draws a fresh root seed and logs it
/// so any run can be replayed afterwards.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub num_players: usize,
    pub hours_of_play: u32,
    pub turns_per_hour: u32,
    pub bet_unit: Dollars,
    pub table_limit: Dollars,
    pub buy_in: Dollars,
    pub seed: Option<u64>,
    /// Numbers to track consecutive-roll streaks for across the session.
    pub streak_numbers: Vec<u8>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            num_players: DEFAULT_NUM_PLAYERS,
            hours_of_play: DEFAULT_HOURS_OF_PLAY,
            turns_per_hour: TURNS_PER_HOUR,
            bet_unit: DEFAULT_BET_UNIT,
            table_limit: DEFAULT_TABLE_LIMIT,
            buy_in: DEFAULT_BUY_IN,
            seed: None,
            streak_numbers: Vec::new(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn total_turns(&self) -> u32 {
        self.hours_of_play * self.turns_per_hour
    }
}

/// Full session results, ready for serialization.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub total_turns: u32,
    pub players: Vec<PlayerSnapshot>,
    pub dice: DiceSnapshot,
}

/// One table session. Owns the dice, the bet catalog, the players, and the
/// betting policy every player runs.
pub struct Session {
    config: SessionConfig,
    seed: u64,
    catalog: BetCatalog,
    dice: Dice,
    players: Vec<Player>,
    next_player: usize,
    policy: Box<dyn BettingPolicy>,
}

impl Session {
    /// A session running the house-standard pass-line-and-places strategy.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let policy = Box::new(PassLinePlacePolicy::new(config.bet_unit, no_press));
        Self::with_policy(config, policy)
    }

    /// # Panics
    ///
    /// Panics when `config.num_players` is zero; a table needs a shooter.
    #[must_use]
    pub fn with_policy(config: SessionConfig, policy: Box<dyn BettingPolicy>) -> Self {
        assert!(config.num_players > 0, "session needs at least one player");
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        info!("session seed {seed}");

        let mut dice = Dice::from_seed(seed);
        for &number in &config.streak_numbers {
            dice.attach_streak_keeper(ConsecutiveNumberStatsKeeper::new(number));
        }

        let catalog = BetCatalog::standard(TableLimits {
            bet_unit: config.bet_unit,
            table_limit: config.table_limit,
        });
        let players = (1..=config.num_players)
            .map(|n| Player::new(format!("Player{n}"), config.buy_in))
            .collect();

        Self {
            config,
            seed,
            catalog,
            dice,
            players,
            next_player: 0,
            policy,
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub const fn dice(&self) -> &Dice {
        &self.dice
    }

    /// Run the configured number of shooter turns, rotating the dice around
    /// the table.
    pub fn run(&mut self) -> EngineResult<()> {
        for _ in 0..self.config.total_turns() {
            self.next_player_turn()?;
        }
        Ok(())
    }

    /// One shooter turn for whoever the dice are in front of.
    pub fn next_player_turn(&mut self) -> EngineResult<()> {
        let shooter = self.next_player;
        self.next_player = (self.next_player + 1) % self.players.len();
        let player = &mut self.players[shooter];

        let mut turn = PlayerTurn::new(player.next_turn_number(), player.rail());
        RoundEngine::new(&mut self.dice, &mut turn, &self.catalog, self.policy.as_mut())
            .play()?;
        player.settle_turn(turn);
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed: self.seed,
            total_turns: self.config.total_turns(),
            players: self
                .players
                .iter()
                .map(|player| PlayerStats::new(player).snapshot())
                .collect(),
            dice: self.dice.snapshot(),
        }
    }
}
