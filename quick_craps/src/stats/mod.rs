//! Statistics keepers: per-turn outcome tallies, session-scoped number
//! streaks, and per-player aggregates derived from turn history.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::game::entities::{Dollars, Outcome, Player, PlayerTurn};

/// Serializable view of one turn's statistics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TurnStatsSnapshot {
    pub turn: u32,
    pub total_rolls: u64,
    pub outcomes: BTreeMap<Outcome, u64>,
    pub point_winners: BTreeMap<u8, u64>,
    pub place_winners: BTreeMap<u8, u64>,
    pub longest_point_run: u64,
    pub start_rail: Dollars,
}

/// Per-turn counters: total rolls, per-outcome tallies, winner counts keyed
/// by number, and the longest run of rolls with a point on. The run starts
/// after the point-establishing roll and includes the seven that ends it.
#[derive(Clone, Debug)]
pub struct PlayerTurnStatsKeeper {
    turn_number: u32,
    start_rail: Dollars,
    total_rolls: u64,
    outcome_counts: BTreeMap<Outcome, u64>,
    point_counts: BTreeMap<u8, u64>,
    place_counts: BTreeMap<u8, u64>,
    current_point_run: u64,
    longest_point_run: u64,
}

impl PlayerTurnStatsKeeper {
    #[must_use]
    pub fn new(turn_number: u32, start_rail: Dollars) -> Self {
        Self {
            turn_number,
            start_rail,
            total_rolls: 0,
            outcome_counts: BTreeMap::new(),
            point_counts: BTreeMap::new(),
            place_counts: BTreeMap::new(),
            current_point_run: 0,
            longest_point_run: 0,
        }
    }

    /// Tally one classified roll.
    pub fn tally(&mut self, sum: u8, outcome: Outcome) {
        self.total_rolls += 1;
        *self.outcome_counts.entry(outcome).or_default() += 1;

        match outcome {
            Outcome::PointEstablished => self.current_point_run = 0,
            Outcome::PlaceWinner => {
                *self.place_counts.entry(sum).or_default() += 1;
                self.extend_point_run();
            }
            Outcome::PointWinner => {
                *self.point_counts.entry(sum).or_default() += 1;
                self.extend_point_run();
            }
            Outcome::HornWinner => self.extend_point_run(),
            // the terminating seven lands while the point is on, so it
            // counts toward the run it ends
            Outcome::SevenOut => {
                self.extend_point_run();
                self.current_point_run = 0;
            }
            Outcome::FrontLineWinner | Outcome::Craps => {}
        }
    }

    fn extend_point_run(&mut self) {
        self.current_point_run += 1;
        self.longest_point_run = self.longest_point_run.max(self.current_point_run);
    }

    #[must_use]
    pub const fn total_rolls(&self) -> u64 {
        self.total_rolls
    }

    #[must_use]
    pub fn outcome_count(&self, outcome: Outcome) -> u64 {
        self.outcome_counts.get(&outcome).copied().unwrap_or(0)
    }

    #[must_use]
    pub const fn longest_point_run(&self) -> u64 {
        self.longest_point_run
    }

    #[must_use]
    pub const fn start_rail(&self) -> Dollars {
        self.start_rail
    }

    #[must_use]
    pub fn snapshot(&self) -> TurnStatsSnapshot {
        TurnStatsSnapshot {
            turn: self.turn_number,
            total_rolls: self.total_rolls,
            outcomes: self.outcome_counts.clone(),
            point_winners: self.point_counts.clone(),
            place_winners: self.place_counts.clone(),
            longest_point_run: self.longest_point_run,
            start_rail: self.start_rail,
        }
    }
}

/// Serializable view of one number's streak record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StreakSnapshot {
    pub target: u8,
    pub longest_run: u64,
}

/// Session-scoped observer of every dice roll, tracking the longest run of
/// consecutive rolls equal to its target number. Only an explicit
/// [`reset`](Self::reset) clears it; turn boundaries do not.
#[derive(Clone, Debug)]
pub struct ConsecutiveNumberStatsKeeper {
    target: u8,
    current_run: u64,
    longest_run: u64,
}

impl ConsecutiveNumberStatsKeeper {
    #[must_use]
    pub const fn new(target: u8) -> Self {
        Self {
            target,
            current_run: 0,
            longest_run: 0,
        }
    }

    pub const fn observe(&mut self, sum: u8) {
        if sum == self.target {
            self.current_run += 1;
            if self.current_run > self.longest_run {
                self.longest_run = self.current_run;
            }
        } else {
            self.current_run = 0;
        }
    }

    pub const fn reset(&mut self) {
        self.current_run = 0;
        self.longest_run = 0;
    }

    #[must_use]
    pub const fn target(&self) -> u8 {
        self.target
    }

    #[must_use]
    pub const fn current_run(&self) -> u64 {
        self.current_run
    }

    #[must_use]
    pub const fn longest_run(&self) -> u64 {
        self.longest_run
    }

    #[must_use]
    pub const fn snapshot(&self) -> StreakSnapshot {
        StreakSnapshot {
            target: self.target,
            longest_run: self.longest_run,
        }
    }
}

/// The single longest turn a player had, as a compact roll transcript plus
/// its detailed stats.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LongestTurnSnapshot {
    pub rolls: Vec<String>,
    pub stats: TurnStatsSnapshot,
}

/// Serializable per-player aggregate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub buyin: Dollars,
    pub rail: Dollars,
    pub roll_lengths: BTreeMap<u64, u64>,
    pub longest_roll: Option<LongestTurnSnapshot>,
    pub avg_rolls_before_seven_out: f64,
}

/// Aggregates derived from a player's full turn history.
#[derive(Debug)]
pub struct PlayerStats<'a> {
    player: &'a Player,
}

impl<'a> PlayerStats<'a> {
    #[must_use]
    pub const fn new(player: &'a Player) -> Self {
        Self { player }
    }

    /// Histogram of turn lengths: count of turns by rolls-before-seven-out.
    #[must_use]
    pub fn roll_lengths(&self) -> BTreeMap<u64, u64> {
        let mut lengths = BTreeMap::new();
        for turn in self.player.turns() {
            *lengths.entry(turn.total_rolls()).or_default() += 1;
        }
        lengths
    }

    #[must_use]
    pub fn longest_turn(&self) -> Option<&PlayerTurn> {
        self.player.turns().iter().max_by_key(|turn| turn.total_rolls())
    }

    #[must_use]
    pub fn avg_rolls_before_seven_out(&self) -> f64 {
        let turns = self.player.turns();
        if turns.is_empty() {
            return 0.0;
        }
        let total: u64 = turns.iter().map(PlayerTurn::total_rolls).sum();
        total as f64 / turns.len() as f64
    }

    #[must_use]
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.player.name().to_string(),
            buyin: self.player.buyin(),
            rail: self.player.rail(),
            roll_lengths: self.roll_lengths(),
            longest_roll: self.longest_turn().map(|turn| LongestTurnSnapshot {
                rolls: turn.rolls().iter().map(ToString::to_string).collect(),
                stats: turn.stats().snapshot(),
            }),
            avg_rolls_before_seven_out: self.avg_rolls_before_seven_out(),
        }
    }
}
