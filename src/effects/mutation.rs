//! Atomic state mutations.
//!
//! Every change a tile or decision makes to players or the board is one of
//! these. They are applied by `GameState::apply`, which enforces the
//! resource floor and keeps city ownership in sync with property sets.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, ResourceKind, TileId};

/// An atomic game mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutation {
    /// Add to (or subtract from) one resource, floored at zero.
    Adjust {
        player: PlayerId,
        kind: ResourceKind,
        delta: i64,
    },

    /// Move gold between players. The payer is floored at zero, the
    /// receiver always gets the full amount.
    Transfer {
        from: PlayerId,
        to: PlayerId,
        amount: i64,
    },

    /// Set the modifier consumed by the player's next roll.
    SetMovementModifier { player: PlayerId, value: i32 },

    /// Send a player to jail for a number of turns.
    Imprison { player: PlayerId, turns: u8 },

    /// Buy an unowned city.
    Acquire {
        player: PlayerId,
        tile: TileId,
        cost: i64,
    },

    /// Raise an owned city one level, capped.
    Upgrade {
        player: PlayerId,
        tile: TileId,
        cost: i64,
    },
}

impl Mutation {
    /// Gold credit or debit.
    pub fn gold(player: PlayerId, delta: i64) -> Self {
        Self::Adjust {
            player,
            kind: ResourceKind::Gold,
            delta,
        }
    }

    /// The player this mutation is about.
    #[must_use]
    pub fn subject(&self) -> PlayerId {
        match *self {
            Mutation::Adjust { player, .. }
            | Mutation::SetMovementModifier { player, .. }
            | Mutation::Imprison { player, .. }
            | Mutation::Acquire { player, .. }
            | Mutation::Upgrade { player, .. } => player,
            Mutation::Transfer { from, .. } => from,
        }
    }
}

/// Gold a player owed but could not pay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debt {
    pub player: PlayerId,
    pub shortfall: i64,
}

/// Mutations applied together for one resolution step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationBatch {
    entries: Vec<Mutation>,
}

impl MutationBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mutation: Mutation) {
        self.entries.push(mutation);
    }

    pub fn extend(&mut self, other: MutationBatch) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mutation> {
        self.entries.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl From<Vec<Mutation>> for MutationBatch {
    fn from(entries: Vec<Mutation>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for MutationBatch {
    type Item = Mutation;
    type IntoIter = std::vec::IntoIter<Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
