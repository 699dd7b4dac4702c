//! Rejected commands.
//!
//! A rejected command never changes game state.

use thiserror::Error;

use crate::core::{Choice, PlayerId};

use super::phase::OracleTicket;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("the game is over")]
    GameOver,
    #[error("{player} acted out of turn; waiting on {expected}")]
    NotYourTurn { player: PlayerId, expected: PlayerId },
    #[error("cannot {action} while {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: &'static str,
    },
    #[error("choice `{}` is not offered", .0.id())]
    ChoiceNotOffered(Choice),
    #[error("oracle ticket for epoch {} turn {} is stale", .0.epoch, .0.turn)]
    StaleTicket(OracleTicket),
    #[error("{0} is not at the table")]
    UnknownPlayer(PlayerId),
    #[error("{0} is not AI-controlled")]
    NotAiControlled(PlayerId),
}
