//! Player resources with a zero floor.
//!
//! Every mutation goes through [`Resources::adjust`], which clamps the
//! result at zero and reports how much of a debit could not be covered.

use serde::{Deserialize, Serialize};

/// The four tracked resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Gold,
    Water,
    Energy,
    Materials,
}

impl ResourceKind {
    /// All resource kinds in display order.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Gold,
        ResourceKind::Water,
        ResourceKind::Energy,
        ResourceKind::Materials,
    ];

    /// Lowercase key used by external services.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            ResourceKind::Gold => "gold",
            ResourceKind::Water => "water",
            ResourceKind::Energy => "energy",
            ResourceKind::Materials => "materials",
        }
    }

    /// Parse a resource key, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Outcome of a single clamped adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceChange {
    pub kind: ResourceKind,
    /// Delta actually applied after clamping.
    pub applied: i64,
    /// Portion of a debit that could not be paid (0 for credits).
    pub shortfall: i64,
}

/// Resource balances, each kept `>= 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawBalances")]
pub struct Resources {
    gold: i64,
    water: i64,
    energy: i64,
    materials: i64,
}

/// Unchecked wire form; deserialized balances are floored on the way in.
#[derive(Deserialize)]
struct RawBalances {
    #[serde(default)]
    gold: i64,
    #[serde(default)]
    water: i64,
    #[serde(default)]
    energy: i64,
    #[serde(default)]
    materials: i64,
}

impl From<RawBalances> for Resources {
    fn from(raw: RawBalances) -> Self {
        Self::new(raw.gold, raw.water, raw.energy, raw.materials)
    }
}

impl Resources {
    /// Create balances; negative inputs are floored at zero.
    #[must_use]
    pub const fn new(gold: i64, water: i64, energy: i64, materials: i64) -> Self {
        const fn floor(v: i64) -> i64 {
            if v < 0 {
                0
            } else {
                v
            }
        }
        Self {
            gold: floor(gold),
            water: floor(water),
            energy: floor(energy),
            materials: floor(materials),
        }
    }

    #[must_use]
    pub const fn gold(&self) -> i64 {
        self.gold
    }

    #[must_use]
    pub const fn water(&self) -> i64 {
        self.water
    }

    #[must_use]
    pub const fn energy(&self) -> i64 {
        self.energy
    }

    #[must_use]
    pub const fn materials(&self) -> i64 {
        self.materials
    }

    /// Balance of a given resource.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> i64 {
        match kind {
            ResourceKind::Gold => self.gold,
            ResourceKind::Water => self.water,
            ResourceKind::Energy => self.energy,
            ResourceKind::Materials => self.materials,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut i64 {
        match kind {
            ResourceKind::Gold => &mut self.gold,
            ResourceKind::Water => &mut self.water,
            ResourceKind::Energy => &mut self.energy,
            ResourceKind::Materials => &mut self.materials,
        }
    }

    /// Add `delta` to a resource, flooring the result at zero.
    pub fn adjust(&mut self, kind: ResourceKind, delta: i64) -> ResourceChange {
        let slot = self.slot_mut(kind);
        let target = slot.saturating_add(delta);
        let next = target.max(0);
        let applied = next - *slot;
        *slot = next;

        ResourceChange {
            kind,
            applied,
            shortfall: next - target,
        }
    }

    /// Check whether `amount` gold can be paid in full.
    #[must_use]
    pub const fn can_afford(&self, amount: i64) -> bool {
        self.gold >= amount
    }
}
