//! "Civilization of Sands": the stock 20-tile desert trading game.
//!
//! - A human seat with a chosen role and an AI rival with a random one
//! - Everyone starts with 500 gold, 100 water, 50 energy, 20 materials
//! - First to end a turn holding 2500 gold wins
//!
//! Supports 2-8 players through [`SandsGameBuilder::player`].

mod game;

pub use game::{stock_board, stock_config, SandsGameBuilder};
