//! Turn state machine phases.
//!
//! ```text
//! AwaitingRoll -> Rolling -> Moving -> ResolvingTile
//!     ResolvingTile -> DecisionPending | AwaitingOracle | TurnAdvancing
//!     AwaitingOracle -> DecisionPending (human) | TurnAdvancing (AI)
//!     DecisionPending -> TurnAdvancing
//!     TurnAdvancing -> AwaitingRoll (next player) | GameOver
//! ```
//!
//! `Rolling`, `Moving`, `ResolvingTile` and `TurnAdvancing` are passed
//! through within a single command. The suspension points a caller can
//! observe are `AwaitingRoll`, `DecisionPending`, `AwaitingOracle` and the
//! terminal `GameOver`.

use serde::{Deserialize, Serialize};

use super::outcome::{EndReason, GameResult};
use crate::core::PlayerId;
use crate::effects::PendingDecision;
use crate::oracle::OracleRequest;

/// Identifies one outstanding oracle consultation.
///
/// A ticket from an earlier game (before a restart) or an earlier turn never
/// matches the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OracleTicket {
    pub epoch: u64,
    pub turn: u32,
    pub player: PlayerId,
}

/// Where the turn state machine is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    AwaitingRoll,
    Rolling,
    Moving,
    ResolvingTile,
    /// Blocked on the active human player.
    DecisionPending(PendingDecision),
    /// Blocked on the narrative generator.
    AwaitingOracle {
        ticket: OracleTicket,
        request: OracleRequest,
    },
    TurnAdvancing,
    GameOver {
        result: GameResult,
        reason: EndReason,
    },
}

impl TurnPhase {
    /// Short name for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            TurnPhase::AwaitingRoll => "awaiting_roll",
            TurnPhase::Rolling => "rolling",
            TurnPhase::Moving => "moving",
            TurnPhase::ResolvingTile => "resolving_tile",
            TurnPhase::DecisionPending(_) => "decision_pending",
            TurnPhase::AwaitingOracle { .. } => "awaiting_oracle",
            TurnPhase::TurnAdvancing => "turn_advancing",
            TurnPhase::GameOver { .. } => "game_over",
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::GameOver { .. })
    }

    /// The decision being waited on, if any.
    #[must_use]
    pub fn pending_decision(&self) -> Option<&PendingDecision> {
        match self {
            TurnPhase::DecisionPending(decision) => Some(decision),
            _ => None,
        }
    }
}
