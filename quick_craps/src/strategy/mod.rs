//! Injectable strategies: the betting policy that decides which bets exist
//! on each roll, and the press policy consulted whenever a bet wins.

use crate::bets::book::BetBook;
use crate::bets::catalog::{BetCatalog, BetKind};
use crate::bets::errors::{BetError, BetResult};
use crate::bets::ledger::BetLedger;
use crate::game::entities::{Dollars, Point};
use crate::game::state_machine::{TablePhase, TableState};

/// Decides, on a win, how much to add to the bet (positive, drawing
/// winnings first) or take down (negative). Evaluated on every win.
pub type PressPolicy = fn(&BetLedger, Dollars) -> Dollars;

/// The engine's only default: never press, let winnings ride on the ledger.
#[must_use]
pub fn no_press(_ledger: &BetLedger, _win: Dollars) -> Dollars {
    0
}

/// Double the bet on every second hit, funding the press from winnings.
#[must_use]
pub fn double_every_other_hit(ledger: &BetLedger, _win: Dollars) -> Dollars {
    if ledger.times_won() % 2 == 0 {
        ledger.current_amount()
    } else {
        0
    }
}

/// Decides which bets should exist for the current table state. Invoked at
/// the top of every roll.
pub trait BettingPolicy {
    fn place_bets(
        &mut self,
        table: &TableState,
        book: &mut BetBook,
        catalog: &BetCatalog,
    ) -> BetResult<()>;
}

/// The house-standard strategy from the table rail: a pass-line bet on the
/// comeout, converted into pass-point plus maximum odds once a point is
/// established, with inside place bets working while the point is on and
/// off during the comeout.
#[derive(Clone, Copy, Debug)]
pub struct PassLinePlacePolicy {
    bet_unit: Dollars,
    press: PressPolicy,
}

impl PassLinePlacePolicy {
    const PLACE_NUMBERS: [Point; 4] = [Point::Five, Point::Six, Point::Eight, Point::Nine];

    #[must_use]
    pub const fn new(bet_unit: Dollars, press: PressPolicy) -> Self {
        Self { bet_unit, press }
    }
}

impl BettingPolicy for PassLinePlacePolicy {
    fn place_bets(
        &mut self,
        table: &TableState,
        book: &mut BetBook,
        catalog: &BetCatalog,
    ) -> BetResult<()> {
        match table.phase() {
            TablePhase::Off => {
                // Comeout: retire leftover point bets, call the place bets
                // off, and get a line bet working.
                for point in Point::ALL {
                    book.ensure(catalog, BetKind::PassPoint(point), 0, self.press)?;
                    book.ensure(catalog, BetKind::PassOdds(point), 0, self.press)?;
                    book.set_working(BetKind::Place(point), false)?;
                }
                book.ensure(catalog, BetKind::PassLine, self.bet_unit, self.press)
            }
            TablePhase::On(point) => {
                let kind = BetKind::PassOdds(point);
                let def = catalog.definition(kind).ok_or(BetError::UnknownBet { kind })?;
                let odds = self.bet_unit * def.max_odds.unwrap_or(1);
                book.ensure_pass_line_and_odds(catalog, point, self.bet_unit, odds, self.press)?;
                for number in Self::PLACE_NUMBERS {
                    if number != point {
                        book.set_working(BetKind::Place(number), true)?;
                        book.ensure(catalog, BetKind::Place(number), self.bet_unit, self.press)?;
                    }
                }
                Ok(())
            }
        }
    }
}
