//! The table state machine and the per-turn round engine.

use log::{debug, trace};
use serde::Serialize;
use thiserror::Error;

use super::entities::{Outcome, PlayerTurn, Point};
use crate::bets::catalog::BetCatalog;
use crate::bets::errors::BetError;
use crate::dice::Dice;
use crate::strategy::BettingPolicy;

/// Engine errors. Both variants are fatal: the run aborts and partial
/// statistics are not valid output.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum EngineError {
    /// A roll reached bet evaluation without an assigned outcome. Should be
    /// unreachable given the classification table; kept as a defensive
    /// assertion against engine bugs.
    #[error("roll reached bet evaluation without an outcome")]
    RollNotClassified,
    #[error(transparent)]
    Bet(#[from] BetError),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Whether a point is established, and which.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TablePhase {
    #[default]
    Off,
    On(Point),
}

/// The table puck. A point is present if and only if the phase is on,
/// which the [`TablePhase`] representation guarantees.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TableState {
    phase: TablePhase,
}

impl TableState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> TablePhase {
        self.phase
    }

    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self.phase, TablePhase::On(_))
    }

    #[must_use]
    pub const fn is_off(&self) -> bool {
        !self.is_on()
    }

    #[must_use]
    pub const fn point(&self) -> Option<Point> {
        match self.phase {
            TablePhase::On(point) => Some(point),
            TablePhase::Off => None,
        }
    }

    /// Classify a roll sum against the current phase and transition.
    ///
    /// | phase | sum | outcome | next phase |
    /// |---|---|---|---|
    /// | off | 7, 11 | front line winner | off |
    /// | off | 4,5,6,8,9,10 | point established | on(sum) |
    /// | off | 2, 3, 12 | craps | off |
    /// | on(p) | 7 | seven out, turn ends | off |
    /// | on(p) | p | point winner | off |
    /// | on(p) | other point | place winner | on(p) |
    /// | on(p) | 2, 3, 11, 12 | horn winner | on(p) |
    pub fn classify(&mut self, sum: u8) -> Outcome {
        match self.phase {
            TablePhase::Off => match Point::from_sum(sum) {
                Some(point) => {
                    self.phase = TablePhase::On(point);
                    Outcome::PointEstablished
                }
                None if sum == 7 || sum == 11 => Outcome::FrontLineWinner,
                None => Outcome::Craps,
            },
            TablePhase::On(point) => match sum {
                7 => {
                    self.phase = TablePhase::Off;
                    Outcome::SevenOut
                }
                s if s == point.value() => {
                    self.phase = TablePhase::Off;
                    Outcome::PointWinner
                }
                s if Point::from_sum(s).is_some() => Outcome::PlaceWinner,
                _ => Outcome::HornWinner,
            },
        }
    }
}

/// Drives one shooter's turn: betting policy, roll, classification, bet
/// settlement, stats, until the seven-out.
pub struct RoundEngine<'a> {
    dice: &'a mut Dice,
    turn: &'a mut PlayerTurn,
    catalog: &'a BetCatalog,
    policy: &'a mut dyn BettingPolicy,
    table: TableState,
}

impl<'a> RoundEngine<'a> {
    pub fn new(
        dice: &'a mut Dice,
        turn: &'a mut PlayerTurn,
        catalog: &'a BetCatalog,
        policy: &'a mut dyn BettingPolicy,
    ) -> Self {
        Self {
            dice,
            turn,
            catalog,
            policy,
            table: TableState::new(),
        }
    }

    /// Play the turn to its seven-out, then close the bet book out so the
    /// turn's net result can be settled into the rail.
    pub fn play(&mut self) -> EngineResult<()> {
        while self.player_roll()? {}
        self.turn.close_out()?;
        debug!(
            "turn {} over: {} rolls, net ${}",
            self.turn.turn_number(),
            self.turn.total_rolls(),
            self.turn.net_result(),
        );
        Ok(())
    }

    /// One roll of the loop. Returns false once the shooter sevens out.
    fn player_roll(&mut self) -> EngineResult<bool> {
        self.policy
            .place_bets(&self.table, self.turn.bets_mut(), self.catalog)?;

        let mut roll = self.dice.roll();
        roll.classify(self.table.classify(roll.sum()));
        let outcome = roll.outcome().ok_or(EngineError::RollNotClassified)?;
        trace!("roll {roll} ({outcome})");

        self.turn.bets_mut().settle(self.catalog, &roll)?;
        self.turn.stats_mut().tally(roll.sum(), outcome);
        self.turn.push_roll(roll);

        Ok(outcome != Outcome::SevenOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bets::catalog::TableLimits;
    use crate::dice::ScriptedRoller;
    use crate::game::entities::Roll;
    use crate::strategy::{PassLinePlacePolicy, no_press};

    // === TableState Tests ===

    #[test]
    fn test_comeout_transitions() {
        for (sum, expected) in [
            (7, Outcome::FrontLineWinner),
            (11, Outcome::FrontLineWinner),
            (2, Outcome::Craps),
            (3, Outcome::Craps),
            (12, Outcome::Craps),
        ] {
            let mut table = TableState::new();
            assert_eq!(table.classify(sum), expected, "sum {sum}");
            assert!(table.is_off());
            assert_eq!(table.point(), None);
        }
    }

    #[test]
    fn test_point_numbers_turn_table_on() {
        for sum in [4u8, 5, 6, 8, 9, 10] {
            let mut table = TableState::new();
            assert_eq!(table.classify(sum), Outcome::PointEstablished);
            assert!(table.is_on());
            assert_eq!(table.point().map(Point::value), Some(sum));
        }
    }

    #[test]
    fn test_point_on_transitions() {
        let mut table = TableState::new();
        table.classify(6);

        assert_eq!(table.classify(8), Outcome::PlaceWinner);
        assert!(table.is_on());
        assert_eq!(table.classify(2), Outcome::HornWinner);
        assert_eq!(table.classify(11), Outcome::HornWinner);
        assert!(table.is_on());

        assert_eq!(table.classify(6), Outcome::PointWinner);
        assert!(table.is_off());
    }

    #[test]
    fn test_seven_out_clears_point() {
        let mut table = TableState::new();
        table.classify(9);
        assert_eq!(table.classify(7), Outcome::SevenOut);
        assert!(table.is_off());
        assert_eq!(table.point(), None);
    }

    #[test]
    fn test_point_winner_allows_new_point_same_turn() {
        let mut table = TableState::new();
        table.classify(5);
        table.classify(5);
        assert_eq!(table.classify(10), Outcome::PointEstablished);
        assert_eq!(table.point(), Some(Point::Ten));
    }

    // === RoundEngine Tests ===

    #[test]
    fn test_turn_ends_only_on_seven_out() {
        let catalog = BetCatalog::standard(TableLimits {
            bet_unit: 25,
            table_limit: 5000,
        });
        // comeout 7 and 11 keep the turn alive; only 7-on-point ends it
        let mut dice = Dice::with_roller(Box::new(ScriptedRoller::from_faces(&[
            (3, 4), // 7: front line winner
            (5, 6), // 11: front line winner
            (4, 4), // 8: point established
            (4, 4), // 8: point winner
            (2, 2), // 4: point established
            (4, 3), // 7: seven out
        ])));
        let mut turn = PlayerTurn::new(1, 1000);
        let mut policy = PassLinePlacePolicy::new(25, no_press);
        RoundEngine::new(&mut dice, &mut turn, &catalog, &mut policy)
            .play()
            .unwrap();

        let outcomes: Vec<Outcome> = turn.rolls().iter().filter_map(Roll::outcome).collect();
        assert_eq!(
            outcomes,
            [
                Outcome::FrontLineWinner,
                Outcome::FrontLineWinner,
                Outcome::PointEstablished,
                Outcome::PointWinner,
                Outcome::PointEstablished,
                Outcome::SevenOut,
            ]
        );
        assert_eq!(turn.total_rolls(), 6);
    }
}
