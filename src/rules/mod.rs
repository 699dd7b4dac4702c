//! Turn rules: movement, the AI policy and the turn state machine.
//!
//! - `MovementResolver`: die roll to position, pass-start salary
//! - `CoinFlipPolicy`: how AI seats answer offers
//! - `TurnController`: orders commands and owns win/loss checks

mod controller;
mod error;
mod movement;
mod outcome;
mod phase;
mod policy;

pub use controller::{TurnController, TurnReport};
pub use error::EngineError;
pub use movement::{effective_steps, Movement, MovementResolver};
pub use outcome::{EndReason, GameResult};
pub use phase::{OracleTicket, TurnPhase};
pub use policy::CoinFlipPolicy;
