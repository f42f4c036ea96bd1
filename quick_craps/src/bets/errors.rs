//! Bet and ledger error types.

use thiserror::Error;

use super::catalog::BetKind;
use super::ledger::BetState;
use crate::game::entities::Dollars;

/// Errors raised by the bet catalog and ledgers. Every variant reflects a
/// misconfigured betting or press policy, not a transient fault, so a run
/// aborts on the first one and partial statistics are discarded.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum BetError {
    #[error("invalid bet amount ${amount} for {kind}: allowed range ${min}..=${max}")]
    InvalidBetAmount {
        kind: BetKind,
        amount: Dollars,
        min: Dollars,
        max: Dollars,
    },
    #[error("no such bet in the catalog: {kind}")]
    UnknownBet { kind: BetKind },
    #[error(
        "ledger invariant violation in {op}: {reason} \
         (state {state}, current ${current}, winnings ${winnings})"
    )]
    LedgerInvariantViolation {
        op: &'static str,
        reason: &'static str,
        state: BetState,
        current: Dollars,
        winnings: Dollars,
    },
}

pub type BetResult<T> = Result<T, BetError>;
