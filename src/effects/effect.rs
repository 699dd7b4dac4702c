//! Resolution results and decision descriptors.
//!
//! The tile effect resolver answers every landing with an [`Effect`]:
//! either the turn can advance, a human has to choose, the oracle has to be
//! consulted, or the game is over.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::mutation::MutationBatch;
use crate::core::{Choice, PlayerId, TileId};
use crate::oracle::{OracleReading, OracleRequest};
use crate::rules::GameResult;

/// What a pending decision is about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    /// Buy an unowned city.
    Purchase { tile: TileId, cost: i64 },
    /// Upgrade an owned city from `level` to `level + 1`.
    Upgrade { tile: TileId, cost: i64, level: u8 },
    /// Accept an oracle reading; its delta is applied on acknowledgment.
    Oracle(OracleReading),
}

/// A decision waiting for the active player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDecision {
    pub player: PlayerId,
    pub kind: DecisionKind,
    pub options: SmallVec<[Choice; 2]>,
}

impl PendingDecision {
    pub fn purchase(player: PlayerId, tile: TileId, cost: i64) -> Self {
        Self {
            player,
            kind: DecisionKind::Purchase { tile, cost },
            options: smallvec![Choice::Accept, Choice::Decline],
        }
    }

    pub fn upgrade(player: PlayerId, tile: TileId, cost: i64, level: u8) -> Self {
        Self {
            player,
            kind: DecisionKind::Upgrade { tile, cost, level },
            options: smallvec![Choice::Accept, Choice::Decline],
        }
    }

    pub fn oracle(player: PlayerId, reading: OracleReading) -> Self {
        Self {
            player,
            kind: DecisionKind::Oracle(reading),
            options: smallvec![Choice::Acknowledge],
        }
    }

    /// Check whether `choice` is one of the offered options.
    #[must_use]
    pub fn offers(&self, choice: Choice) -> bool {
        self.options.contains(&choice)
    }
}

/// What the engine needs before the turn can continue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prompt {
    /// A human choice.
    Decision(PendingDecision),
    /// An answer from the narrative generator.
    Oracle(OracleRequest),
}

/// Outcome of resolving a landing.
///
/// `applied` holds the mutations already committed to state while resolving
/// (duel transfers, rent, taxes, AI purchases).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    RequiresDecision {
        applied: MutationBatch,
        prompt: Prompt,
    },
    Resolved {
        applied: MutationBatch,
    },
    GameOver {
        applied: MutationBatch,
        result: GameResult,
    },
}

impl Effect {
    /// Mutations committed during resolution.
    #[must_use]
    pub fn applied(&self) -> &MutationBatch {
        match self {
            Effect::RequiresDecision { applied, .. }
            | Effect::Resolved { applied }
            | Effect::GameOver { applied, .. } => applied,
        }
    }
}
