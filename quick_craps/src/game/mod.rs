//! Core game types and the table state machine.

pub mod entities;
pub mod state_machine;

pub use entities::{Dollars, Outcome, Player, PlayerTurn, Point, Roll};
pub use state_machine::{EngineError, EngineResult, RoundEngine, TablePhase, TableState};
