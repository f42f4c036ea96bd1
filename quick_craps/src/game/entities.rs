use serde::Serialize;
use std::fmt;

use crate::bets::book::BetBook;
use crate::bets::errors::BetResult;
use crate::stats::PlayerTurnStatsKeeper;

/// Type alias for whole dollars. All bets, winnings, and rails are whole
/// dollars (there's no point arguing over pennies). Signed because a bet's
/// profit/loss goes negative the moment capital is committed to the table.
pub type Dollars = i64;

/// A point number. Constructing one requires a sum in {4, 5, 6, 8, 9, 10},
/// so a table with a point set can never hold an illegal value.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Point {
    Four,
    Five,
    Six,
    Eight,
    Nine,
    Ten,
}

impl Point {
    pub const ALL: [Self; 6] = [
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Eight,
        Self::Nine,
        Self::Ten,
    ];

    #[must_use]
    pub const fn from_sum(sum: u8) -> Option<Self> {
        match sum {
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            8 => Some(Self::Eight),
            9 => Some(Self::Nine),
            10 => Some(Self::Ten),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten => 10,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// How a roll resolved against the table, assigned exactly once per roll
/// by the table state machine.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    PointEstablished,
    FrontLineWinner,
    Craps,
    PointWinner,
    PlaceWinner,
    HornWinner,
    SevenOut,
}

impl Outcome {
    /// Single-character marker used in compact roll transcripts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::PointEstablished => "*",
            Self::FrontLineWinner | Self::PointWinner => "!",
            Self::Craps | Self::SevenOut => "x",
            Self::PlaceWinner | Self::HornWinner => "",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PointEstablished => "point established",
            Self::FrontLineWinner => "front line winner",
            Self::Craps => "craps",
            Self::PointWinner => "point winner",
            Self::PlaceWinner => "place winner",
            Self::HornWinner => "horn winner",
            Self::SevenOut => "seven out",
        };
        write!(f, "{repr}")
    }
}

/// The result of one shake of the dice. Produced once by [`crate::dice::Dice`]
/// and classified once by the table state machine before any bet sees it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Roll {
    sum: u8,
    hard: bool,
    outcome: Option<Outcome>,
}

impl Roll {
    #[must_use]
    pub const fn new(sum: u8, hard: bool) -> Self {
        Self {
            sum,
            hard,
            outcome: None,
        }
    }

    #[must_use]
    pub const fn sum(&self) -> u8 {
        self.sum
    }

    #[must_use]
    pub const fn is_hard(&self) -> bool {
        self.hard
    }

    /// True when this roll shows `number` the hard way (equal faces).
    #[must_use]
    pub const fn hard_number(&self, number: u8) -> bool {
        self.sum == number && self.hard
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Tag the roll with its table outcome. Classification happens exactly
    /// once, right after the shake.
    pub(crate) fn classify(&mut self, outcome: Outcome) {
        debug_assert!(self.outcome.is_none(), "roll classified twice");
        self.outcome = Some(outcome);
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hard = if self.hard { "h" } else { "" };
        let symbol = self.outcome.map_or("?", Outcome::symbol);
        write!(f, "{}{hard}{symbol}", self.sum)
    }
}

/// One shooter's full roll sequence: the rolls, the bet book driven by the
/// betting policy, and the per-turn stats. Becomes read-only history once
/// the turn ends on a seven-out.
#[derive(Clone, Debug)]
pub struct PlayerTurn {
    turn_number: u32,
    rolls: Vec<Roll>,
    bets: BetBook,
    stats: PlayerTurnStatsKeeper,
    net_result: Dollars,
}

impl PlayerTurn {
    #[must_use]
    pub fn new(turn_number: u32, start_rail: Dollars) -> Self {
        Self {
            turn_number,
            rolls: Vec::new(),
            bets: BetBook::new(),
            stats: PlayerTurnStatsKeeper::new(turn_number, start_rail),
            net_result: 0,
        }
    }

    #[must_use]
    pub const fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn rolls(&self) -> &[Roll] {
        &self.rolls
    }

    #[must_use]
    pub const fn bets(&self) -> &BetBook {
        &self.bets
    }

    pub(crate) const fn bets_mut(&mut self) -> &mut BetBook {
        &mut self.bets
    }

    #[must_use]
    pub const fn stats(&self) -> &PlayerTurnStatsKeeper {
        &self.stats
    }

    pub(crate) const fn stats_mut(&mut self) -> &mut PlayerTurnStatsKeeper {
        &mut self.stats
    }

    pub(crate) fn push_roll(&mut self, roll: Roll) {
        self.rolls.push(roll);
    }

    #[must_use]
    pub fn total_rolls(&self) -> u64 {
        self.rolls.len() as u64
    }

    /// Net dollars this turn moved into (negative) or out of (positive)
    /// the table, settled at turn end.
    #[must_use]
    pub const fn net_result(&self) -> Dollars {
        self.net_result
    }

    /// Take down every bet still on the table and settle the turn's net.
    /// Called once, after the seven-out.
    pub(crate) fn close_out(&mut self) -> BetResult<()> {
        self.bets.close_out()?;
        self.net_result = self.bets.realized_net();
        Ok(())
    }
}

/// A player: identity, buy-in, current rail, and an append-only history of
/// turns taken with the dice.
#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    buyin: Dollars,
    rail: Dollars,
    turns: Vec<PlayerTurn>,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, buyin: Dollars) -> Self {
        Self {
            name: name.into(),
            buyin,
            rail: buyin,
            turns: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn buyin(&self) -> Dollars {
        self.buyin
    }

    /// Uncommitted bankroll. Updated only when a finished turn is settled.
    #[must_use]
    pub const fn rail(&self) -> Dollars {
        self.rail
    }

    #[must_use]
    pub fn turns(&self) -> &[PlayerTurn] {
        &self.turns
    }

    #[must_use]
    pub fn next_turn_number(&self) -> u32 {
        self.turns.len() as u32 + 1
    }

    /// Append a finished turn and move its net result into the rail.
    pub(crate) fn settle_turn(&mut self, turn: PlayerTurn) {
        self.rail += turn.net_result();
        self.turns.push(turn);
    }
}
