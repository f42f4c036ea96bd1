//! Per-bet money ledger and lifecycle state machine.

use serde::Serialize;
use std::fmt;

use super::errors::{BetError, BetResult};
use crate::game::entities::Dollars;

/// Lifecycle of a single bet. `On` and `Off` are revisitable; `Down`,
/// `Won`, and `Lost` are terminal.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BetState {
    On,
    Off,
    Down,
    Won,
    Lost,
}

impl BetState {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::On | Self::Off)
    }
}

impl fmt::Display for BetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Down => "down",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        write!(f, "{repr}")
    }
}

/// Money ledger for one bet instance.
///
/// Every dollar that leaves the player's rail for the table debits
/// `profit_loss`; every dollar returned (take-down, collected winnings)
/// credits it back. The ledger never creates or destroys money:
/// `profit_loss + current_amount + winnings` is unchanged by `press` and
/// `take_down`, and grows by exactly the win amount on `won`.
#[derive(Clone, Debug, Serialize)]
pub struct BetLedger {
    state: BetState,
    start_amount: Dollars,
    current_amount: Dollars,
    winnings: Dollars,
    profit_loss: Dollars,
    times_won: u32,
}

impl BetLedger {
    /// Commit `amount` from the rail. The amount must already be validated
    /// by the catalog.
    #[must_use]
    pub const fn new(amount: Dollars) -> Self {
        Self {
            state: BetState::On,
            start_amount: amount,
            current_amount: amount,
            winnings: 0,
            profit_loss: -amount,
            times_won: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> BetState {
        self.state
    }

    #[must_use]
    pub const fn start_amount(&self) -> Dollars {
        self.start_amount
    }

    #[must_use]
    pub const fn current_amount(&self) -> Dollars {
        self.current_amount
    }

    /// Uncollected winnings riding on the ledger.
    #[must_use]
    pub const fn winnings(&self) -> Dollars {
        self.winnings
    }

    /// Net cash flow between the rail and this bet, negative while capital
    /// sits on the table.
    #[must_use]
    pub const fn profit_loss(&self) -> Dollars {
        self.profit_loss
    }

    #[must_use]
    pub const fn times_won(&self) -> u32 {
        self.times_won
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.is_active()
    }

    #[must_use]
    pub const fn is_on(&self) -> bool {
        matches!(self.state, BetState::On)
    }

    /// Conservation probe: unchanged by `press`/`take_down`, grows by the
    /// win amount on `won`.
    #[must_use]
    pub const fn net_position(&self) -> Dollars {
        self.profit_loss + self.current_amount + self.winnings
    }

    /// What this ledger is worth to the rail once the turn is settled.
    /// A lost bet's `current_amount` is only a record of what was at risk.
    #[must_use]
    pub const fn realized(&self) -> Dollars {
        match self.state {
            BetState::Lost => self.profit_loss,
            _ => self.profit_loss + self.current_amount + self.winnings,
        }
    }

    /// Credit a win. Proposition bets pay and terminate; everything else
    /// stays on with the winnings accumulating until pressed or taken down.
    pub fn won(&mut self, amount: Dollars, proposition: bool) -> BetResult<()> {
        self.require_on("won")?;
        self.winnings += amount;
        self.times_won += 1;
        if proposition {
            self.state = BetState::Won;
        }
        Ok(())
    }

    /// The bet lost. `profit_loss` already reflects the committed capital,
    /// so the transition itself moves no money.
    pub fn lost(&mut self) -> BetResult<()> {
        self.require_on("lost")?;
        self.state = BetState::Lost;
        Ok(())
    }

    /// Turn the bet off: exempt from evaluation, amounts retained.
    pub fn set_off(&mut self) -> BetResult<()> {
        self.require_on("set_off")?;
        self.state = BetState::Off;
        Ok(())
    }

    pub fn set_on(&mut self) -> BetResult<()> {
        if self.state != BetState::Off {
            return Err(self.violation("set_on", "only an off bet can be turned back on"));
        }
        self.state = BetState::On;
        Ok(())
    }

    /// Grow the bet by `amount`, funding from winnings first and drawing
    /// any shortfall from the rail. Leftover winnings are collected back to
    /// the rail; `winnings` is always zero afterwards.
    pub fn press(&mut self, amount: Dollars) -> BetResult<()> {
        self.require_on("press")?;
        if amount < 0 {
            return Err(self.violation("press", "press amount must not be negative"));
        }
        let from_winnings = amount.min(self.winnings);
        let shortfall = amount - from_winnings;
        let leftover = self.winnings - from_winnings;
        self.profit_loss += leftover - shortfall;
        self.current_amount += amount;
        self.winnings = 0;
        Ok(())
    }

    /// Withdraw `amount` back to the rail, draining winnings before
    /// capital. The bet terminates (`Down`) once no capital remains.
    pub fn take_down(&mut self, amount: Dollars) -> BetResult<()> {
        if !self.is_active() {
            return Err(self.violation("take_down", "bet is not active"));
        }
        if amount < 0 {
            return Err(self.violation("take_down", "take-down amount must not be negative"));
        }
        if amount > self.current_amount + self.winnings {
            return Err(self.violation(
                "take_down",
                "take-down exceeds capital plus winnings",
            ));
        }
        let from_winnings = amount.min(self.winnings);
        let from_capital = amount - from_winnings;
        self.winnings -= from_winnings;
        self.current_amount -= from_capital;
        self.profit_loss += amount;
        if self.current_amount == 0 {
            self.state = BetState::Down;
        }
        Ok(())
    }

    /// Withdraw everything: capital and winnings. Terminates the bet.
    pub fn take_down_all(&mut self) -> BetResult<()> {
        self.take_down(self.current_amount + self.winnings)
    }

    fn require_on(&self, op: &'static str) -> BetResult<()> {
        if self.is_on() {
            Ok(())
        } else {
            Err(self.violation(op, "bet is not on"))
        }
    }

    const fn violation(&self, op: &'static str, reason: &'static str) -> BetError {
        BetError::LedgerInvariantViolation {
            op,
            reason,
            state: self.state,
            current: self.current_amount,
            winnings: self.winnings,
        }
    }
}
