//! Player commands and their history records.
//!
//! The presentation layer drives the engine with two commands: roll the
//! die, or answer the pending decision with one of the offered choices.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// An answer to a pending decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// Buy or upgrade.
    Accept,
    /// Pass on the offer.
    Decline,
    /// Dismiss an informational prompt (oracle reading).
    Acknowledge,
}

impl Choice {
    /// Stable identifier for UI bindings.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Choice::Accept => "accept",
            Choice::Decline => "decline",
            Choice::Acknowledge => "acknowledge",
        }
    }

    /// Parse a UI choice identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        [Choice::Accept, Choice::Decline, Choice::Acknowledge]
            .into_iter()
            .find(|c| c.id() == id)
    }
}

/// A command accepted by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Roll,
    Decide(Choice),
    /// The narrative generator answered (or failed) for an oracle tile.
    OracleAnswered,
}

/// A recorded command with metadata for history tracking.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    /// The player the command was issued for.
    pub player: PlayerId,

    /// The command.
    pub command: Command,

    /// Turn number when the command was accepted.
    pub turn: u32,

    /// Sequence number across the whole game.
    pub sequence: u32,
}

impl CommandRecord {
    #[must_use]
    pub fn new(player: PlayerId, command: Command, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            command,
            turn,
            sequence,
        }
    }
}
