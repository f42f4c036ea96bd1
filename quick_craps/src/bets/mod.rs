//! Bets: the catalog of bet kinds, payout arithmetic, per-bet ledgers, and
//! the per-turn bet book.

pub mod book;
pub mod catalog;
pub mod errors;
pub mod ledger;
pub mod odds;

pub use book::{BetBook, PlayerBet};
pub use catalog::{BetCatalog, BetDefinition, BetKind, RollPredicate, SumSet, TableLimits};
pub use errors::{BetError, BetResult};
pub use ledger::{BetLedger, BetState};
pub use odds::{PayoutOdds, PayoutRule};
