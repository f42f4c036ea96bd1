//! A craps table simulator for evaluating betting strategies.
//!
//! A [`session::Session`] seats players at a table with one pair of seeded
//! dice and runs shooter turns until the clock runs out. Each turn the
//! configured [`strategy::BettingPolicy`] decides which bets are up, the
//! [`game::state_machine::TableState`] classifies every roll, and the
//! [`bets::BetBook`] settles wins and losses through per-bet money ledgers.
//! The whole run replays bit-for-bit from its root seed.
//!
//! ```
//! use quick_craps::session::{Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig {
//!     seed: Some(42),
//!     ..SessionConfig::default()
//! });
//! session.run().unwrap();
//! println!("{}", serde_json::to_string_pretty(&session.snapshot()).unwrap());
//! ```

pub mod bets;
pub mod dice;
pub mod game;
pub mod session;
pub mod stats;
pub mod strategy;

pub use bets::{BetBook, BetCatalog, BetError, BetKind, BetLedger, BetResult, BetState};
pub use dice::{Dice, DiceRoller, ScriptedRoller, SeededRoller};
pub use game::{Dollars, Outcome, Player, PlayerTurn, Point, Roll, TablePhase, TableState};
pub use session::{Session, SessionConfig, SessionSnapshot};
pub use strategy::{BettingPolicy, PassLinePlacePolicy, PressPolicy};
