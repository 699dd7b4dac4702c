//! # sands-engine
//!
//! Turn engine for a property-acquisition board game on a circular track.
//!
//! ## Design Principles
//!
//! 1. **Engine Only**: No rendering. The presentation layer reads a
//!    [`GameSnapshot`] and drives the game with two commands, roll and decide.
//!
//! 2. **Explicit Suspension**: Human decisions and the narrative oracle are
//!    named phases of the state machine, resumed by explicit calls. There are
//!    no timers or callbacks.
//!
//! 3. **Configuration Over Convention**: Board layout and every rule
//!    constant come from [`GameConfig`].
//!
//! 4. **Deterministic**: All randomness goes through [`RandomSource`], so a
//!    seed (or a script) reproduces a game exactly.
//!
//! ## Modules
//!
//! - `core`: Board, players, resources, roles, RNG, configuration, state
//! - `rules`: Movement, AI policy and the turn controller
//! - `effects`: Mutations and tile effect resolution
//! - `oracle`: Boundary to the external narrative generator
//! - `games`: The stock "Civilization of Sands" setup
//!
//! ```
//! use sands_engine::{Choice, PlayerId, Role, SandsGameBuilder, SilentOracle, TurnPhase};
//!
//! let mut game = SandsGameBuilder::new().role(Role::Builder).build(42).unwrap();
//! let you = PlayerId::new(0);
//!
//! let report = game.submit_roll(you).unwrap();
//! match report.phase {
//!     TurnPhase::DecisionPending(decision) => {
//!         game.submit_decision(you, decision.options[0]).unwrap();
//!     }
//!     TurnPhase::AwaitingOracle { .. } => {
//!         game.consult_oracle(&mut SilentOracle).unwrap();
//!         game.submit_decision(you, Choice::Acknowledge).unwrap();
//!     }
//!     _ => {}
//! }
//! if !game.is_over() && game.current_player().is_ai {
//!     game.play_ai_turn(&mut SilentOracle).unwrap();
//! }
//! ```

pub mod core;
pub mod effects;
pub mod games;
pub mod oracle;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    BankruptcyRule, Board, Choice, Command, CommandRecord, ConfigError, EventLog, GameConfig,
    GameRng, GameSnapshot, GameState, LogEntry, LogTone, Player, PlayerId,
    PlayerMap, PlayerSetup, RandomSource, ResourceKind, Resources, Role, RulesConfig,
    ScriptedRandom, Tile, TileId, TileKind, TileSpec, TileType,
};

pub use crate::effects::{DecisionKind, Effect, Mutation, PendingDecision, TileEffectResolver};

pub use crate::rules::{
    EndReason, EngineError, GameResult, Movement, MovementResolver, OracleTicket,
    TurnController, TurnPhase, TurnReport,
};

pub use crate::oracle::{
    parse_reply, OracleError, OracleReading, OracleRequest, OracleService, ScriptedOracle,
    SilentOracle,
};

pub use crate::games::sands::SandsGameBuilder;
