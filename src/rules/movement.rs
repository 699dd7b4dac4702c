//! Die roll to board position.
//!
//! Only the landing tile matters: tiles passed over never trigger.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{role_modifier, GameState, LogTone, PlayerId, ResourceKind, Role, RoleEffect};
use crate::effects::Mutation;

/// Result of one move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub from: usize,
    pub to: usize,
    /// Steps actually taken, after the movement modifier.
    pub steps: u32,
    /// The move reached or crossed the start tile.
    pub passed_start: bool,
    /// Gold paid for passing start (0 if not passed).
    pub bonus: i64,
}

/// `max(1, raw + modifier)`.
#[must_use]
pub fn effective_steps(raw: u8, modifier: i32) -> u32 {
    (i32::from(raw) + modifier).max(1).unsigned_abs()
}

/// Moves players around a loop of fixed length.
#[derive(Clone, Copy, Debug)]
pub struct MovementResolver {
    board_len: usize,
    pass_start_bonus: i64,
}

impl MovementResolver {
    #[must_use]
    pub fn new(board_len: usize, pass_start_bonus: i64) -> Self {
        Self {
            board_len,
            pass_start_bonus,
        }
    }

    /// Landing position and whether the unwrapped sum reached the board length.
    #[must_use]
    pub fn advance(&self, from: usize, steps: u32) -> (usize, bool) {
        let unwrapped = from + steps as usize;
        (unwrapped % self.board_len, unwrapped >= self.board_len)
    }

    /// Salary for passing start, scaled by role.
    #[must_use]
    pub fn pass_start_bonus(&self, role: Role) -> i64 {
        role_modifier(role, RoleEffect::PassStartBonus).apply(self.pass_start_bonus)
    }

    /// Move `player` by a raw roll: consume the movement modifier, update the
    /// position and pay the pass-start bonus before the landing resolves.
    pub fn resolve(&self, state: &mut GameState, player: PlayerId, raw: u8) -> Movement {
        let p = &mut state.players[player];
        let steps = effective_steps(raw, p.movement_modifier);
        if p.movement_modifier != 0 {
            debug!(%player, raw, modifier = p.movement_modifier, steps, "movement modifier consumed");
        }
        p.movement_modifier = 0;

        let from = p.position;
        let (to, passed_start) = self.advance(from, steps);
        p.position = to;
        let role = p.role;
        let name = p.name.clone();

        let bonus = if passed_start {
            self.pass_start_bonus(role)
        } else {
            0
        };
        if passed_start {
            state.apply(&Mutation::Adjust {
                player,
                kind: ResourceKind::Gold,
                delta: bonus,
            });
            state.note(
                Some(player),
                LogTone::Positive,
                format!("{name} passed Start and collected {bonus} gold."),
            );
        }

        let tile = state.board.tile_at(to).name.clone();
        state.note(
            Some(player),
            LogTone::Info,
            format!("{name} rolled {raw} and moved to {tile}."),
        );

        Movement {
            from,
            to,
            steps,
            passed_start,
            bonus,
        }
    }
}
