//! The per-turn bet book: which bets exist, at what amounts, and how they
//! settle against each classified roll.

use log::trace;
use std::collections::BTreeMap;

use super::catalog::{BetCatalog, BetKind};
use super::errors::{BetError, BetResult};
use super::ledger::{BetLedger, BetState};
use crate::game::entities::{Dollars, Point, Roll};
use crate::strategy::PressPolicy;

/// One bet instance: its kind, its ledger, and the press policy consulted
/// on every win.
#[derive(Clone, Debug)]
pub struct PlayerBet {
    kind: BetKind,
    ledger: BetLedger,
    press: PressPolicy,
}

impl PlayerBet {
    fn new(kind: BetKind, amount: Dollars, press: PressPolicy) -> Self {
        Self {
            kind,
            ledger: BetLedger::new(amount),
            press,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> BetKind {
        self.kind
    }

    #[must_use]
    pub const fn ledger(&self) -> &BetLedger {
        &self.ledger
    }
}

/// Ordered-by-kind collection of bet instances for one turn. Each kind maps
/// to its full history; only the most recently created instance may be
/// active, older entries are immutable records kept for stats.
#[derive(Clone, Debug, Default)]
pub struct BetBook {
    bets: BTreeMap<BetKind, Vec<PlayerBet>>,
}

impl BetBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active (on or off) bet for `kind`, if any.
    #[must_use]
    pub fn active(&self, kind: BetKind) -> Option<&PlayerBet> {
        self.bets
            .get(&kind)
            .and_then(|history| history.last())
            .filter(|bet| bet.ledger.is_active())
    }

    fn active_mut(&mut self, kind: BetKind) -> Option<&mut PlayerBet> {
        self.bets
            .get_mut(&kind)
            .and_then(|history| history.last_mut())
            .filter(|bet| bet.ledger.is_active())
    }

    /// Every bet instance created this turn, in kind order.
    pub fn ledgers(&self) -> impl Iterator<Item = (BetKind, &BetLedger)> {
        self.bets
            .iter()
            .flat_map(|(kind, history)| history.iter().map(|bet| (*kind, &bet.ledger)))
    }

    /// Make sure a bet of `kind` exists at `target` dollars. An active on
    /// bet is reconciled toward the target via press/take-down (target zero
    /// takes it down entirely); an off bet is left alone; otherwise a new
    /// validated ledger is created, committing capital.
    pub fn ensure(
        &mut self,
        catalog: &BetCatalog,
        kind: BetKind,
        target: Dollars,
        press: PressPolicy,
    ) -> BetResult<()> {
        let target = if target > 0 {
            catalog.validate(kind, target)?
        } else {
            0
        };
        if let Some(bet) = self.active_mut(kind) {
            if bet.ledger.is_on() {
                let current = bet.ledger.current_amount();
                if target == 0 {
                    bet.ledger.take_down_all()?;
                } else if target > current {
                    bet.ledger.press(target - current)?;
                } else if target < current {
                    bet.ledger.take_down(current - target)?;
                }
            }
            return Ok(());
        }
        if target > 0 {
            trace!("new {kind} bet for ${target}");
            self.bets
                .entry(kind)
                .or_default()
                .push(PlayerBet::new(kind, target, press));
        }
        Ok(())
    }

    /// Convert a pass-line bet that has resolved into a point: take the
    /// line bet down, then ensure the pass-point and pass-odds bets. Does
    /// nothing when neither a line nor a matching point bet is active (a
    /// shooter cannot come in mid-point). Odds are clamped to the point's
    /// maximum multiple of the line bet.
    pub fn ensure_pass_line_and_odds(
        &mut self,
        catalog: &BetCatalog,
        point: Point,
        line_amount: Dollars,
        odds_amount: Dollars,
        press: PressPolicy,
    ) -> BetResult<()> {
        let has_line = self.active(BetKind::PassLine).is_some();
        let has_point = self.active(BetKind::PassPoint(point)).is_some();
        if !has_line && !has_point {
            return Ok(());
        }
        if has_line && let Some(bet) = self.active_mut(BetKind::PassLine) {
            bet.ledger.take_down_all()?;
        }
        self.ensure(catalog, BetKind::PassPoint(point), line_amount, press)?;

        let kind = BetKind::PassOdds(point);
        let def = catalog.definition(kind).ok_or(BetError::UnknownBet { kind })?;
        let odds_amount = match def.max_odds {
            Some(multiple) => odds_amount.min(line_amount * multiple),
            None => odds_amount,
        };
        self.ensure(catalog, kind, odds_amount, press)
    }

    /// Turn the active bet of `kind` off (or back on). No-op when no bet of
    /// that kind is active or it is already in the requested state.
    pub fn set_working(&mut self, kind: BetKind, working: bool) -> BetResult<()> {
        if let Some(bet) = self.active_mut(kind) {
            match (working, bet.ledger.state()) {
                (true, BetState::Off) => bet.ledger.set_on()?,
                (false, BetState::On) => bet.ledger.set_off()?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Evaluate every active on bet against a classified roll, mutating its
    /// ledger. On a win the bet's press policy decides how much to press
    /// (positive) or take down (negative).
    pub fn settle(&mut self, catalog: &BetCatalog, roll: &Roll) -> BetResult<()> {
        let table_limit = catalog.limits().table_limit;
        for (kind, history) in &mut self.bets {
            let Some(bet) = history.last_mut() else {
                continue;
            };
            if !bet.ledger.is_on() {
                continue;
            }
            let def = catalog
                .definition(*kind)
                .ok_or(BetError::UnknownBet { kind: *kind })?;
            let result = def.evaluate(roll, bet.ledger.current_amount());
            if result < 0 {
                trace!("{kind} loses ${}", -result);
                bet.ledger.lost()?;
            } else if result > 0 {
                trace!("{kind} wins ${result}");
                bet.ledger.won(result, def.proposition)?;
                if bet.ledger.is_on() {
                    let adjust = (bet.press)(&bet.ledger, result);
                    if adjust > 0 {
                        let pressed = bet.ledger.current_amount() + adjust;
                        if pressed > table_limit {
                            return Err(BetError::InvalidBetAmount {
                                kind: *kind,
                                amount: pressed,
                                min: catalog.limits().bet_unit,
                                max: table_limit,
                            });
                        }
                        bet.ledger.press(adjust)?;
                    } else if adjust < 0 {
                        bet.ledger.take_down(-adjust)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Take down everything still active. Called once at turn end so the
    /// turn's net can be settled into the rail.
    pub fn close_out(&mut self) -> BetResult<()> {
        for history in self.bets.values_mut() {
            if let Some(bet) = history.last_mut()
                && bet.ledger.is_active()
            {
                bet.ledger.take_down_all()?;
            }
        }
        Ok(())
    }

    /// Net dollars across every ledger created this turn.
    #[must_use]
    pub fn realized_net(&self) -> Dollars {
        self.ledgers().map(|(_, ledger)| ledger.realized()).sum()
    }
}
