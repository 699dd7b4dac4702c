//! What landing on a tile does.
//!
//! - `Mutation`: atomic changes to players and the board
//! - `Effect`: how a resolution continues (advance, prompt, game over)
//! - `TileEffectResolver`: turns a landing or a decision into mutations
//!
//! Tile dispatch is a closed `match` over `TileKind`; adding a tile kind is
//! a compile error until it has a handler.

mod effect;
mod mutation;
mod resolver;

pub use effect::{DecisionKind, Effect, PendingDecision, Prompt};
pub use mutation::{Debt, Mutation, MutationBatch};
pub use resolver::{purchase_cost, rent, upgrade_cost, TileEffectResolver};
