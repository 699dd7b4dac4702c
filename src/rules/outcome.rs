//! How a game ends.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Nobody left standing.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The acting player reached the gold threshold at end of turn.
    WealthThreshold,
    /// Every other player went bankrupt.
    LastSolvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));

        assert!(result.is_winner(PlayerId::new(1)));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert_eq!(result.winner(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_draw_has_no_winner() {
        assert!(!GameResult::Draw.is_winner(PlayerId::new(0)));
        assert_eq!(GameResult::Draw.winner(), None);
    }
}
