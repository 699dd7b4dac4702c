//! Character roles and their static economic modifiers.
//!
//! Multipliers are whole percentages so every modified amount is an exact
//! integer floor, e.g. a 70% discount on 180 gold is 126, not 125.

use serde::{Deserialize, Serialize};

/// Player archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Builder,
    Explorer,
    Merchant,
    Politician,
}

impl Role {
    /// All roles in selection-screen order.
    pub const ALL: [Role; 4] = [Role::Builder, Role::Explorer, Role::Merchant, Role::Politician];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Builder => "Builder",
            Role::Explorer => "Explorer",
            Role::Merchant => "Merchant",
            Role::Politician => "Politician",
        }
    }

    /// One-line description of the role's perk.
    #[must_use]
    pub const fn perk(self) -> &'static str {
        match self {
            Role::Builder => "30% off city purchases and upgrades",
            Role::Explorer => "+50% event rewards, immune to sandstorms",
            Role::Merchant => "+50% gold when passing Start",
            Role::Politician => "Half tax, wins confrontations outright",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Something a role can modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoleEffect {
    PurchaseCost,
    UpgradeCost,
    /// EVENT tile payouts.
    RandomReward,
    PassStartBonus,
    Tax,
    SwampPenalty,
    Confrontation,
}

/// A whole-number percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Percent(pub u32);

impl Percent {
    pub const FULL: Percent = Percent(100);

    /// `floor(amount * self / 100)` for non-negative amounts, saturating.
    #[must_use]
    pub const fn of(self, amount: i64) -> i64 {
        amount.saturating_mul(self.0 as i64).div_euclid(100)
    }
}

/// Result of a role lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    /// No change.
    Neutral,
    /// Multiply the base amount.
    Scale(Percent),
    /// The effect does not apply.
    Immune,
    /// Skip the random contest and win it.
    Authority,
}

impl Modifier {
    /// The scaling percentage (100 for anything but `Scale`).
    #[must_use]
    pub const fn percent(self) -> Percent {
        match self {
            Modifier::Scale(p) => p,
            _ => Percent::FULL,
        }
    }

    /// Apply the scale to an amount.
    #[must_use]
    pub const fn apply(self, amount: i64) -> i64 {
        self.percent().of(amount)
    }
}

/// The static role table.
#[must_use]
pub const fn role_modifier(role: Role, effect: RoleEffect) -> Modifier {
    match (role, effect) {
        (Role::Builder, RoleEffect::PurchaseCost | RoleEffect::UpgradeCost) => {
            Modifier::Scale(Percent(70))
        }
        (Role::Explorer, RoleEffect::RandomReward) => Modifier::Scale(Percent(150)),
        (Role::Explorer, RoleEffect::SwampPenalty) => Modifier::Immune,
        (Role::Merchant, RoleEffect::PassStartBonus) => Modifier::Scale(Percent(150)),
        (Role::Politician, RoleEffect::Tax) => Modifier::Scale(Percent(50)),
        (Role::Politician, RoleEffect::Confrontation) => Modifier::Authority,
        _ => Modifier::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_floors() {
        assert_eq!(Percent(70).of(180), 126);
        assert_eq!(Percent(70).of(125), 87);
        assert_eq!(Percent(150).of(41), 61);
        assert_eq!(Percent(50).of(50), 25);
        assert_eq!(Percent(150).of(i64::MAX), i64::MAX / 100);
    }

    #[test]
    fn test_builder_discount_is_seventy_percent() {
        let m = role_modifier(Role::Builder, RoleEffect::PurchaseCost);
        assert_eq!(m, Modifier::Scale(Percent(70)));
        assert_eq!(m.apply(100), 70);
        assert_eq!(role_modifier(Role::Builder, RoleEffect::UpgradeCost).percent(), Percent(70));
    }

    #[test]
    fn test_role_table() {
        assert_eq!(role_modifier(Role::Merchant, RoleEffect::PassStartBonus).apply(100), 150);
        assert_eq!(role_modifier(Role::Politician, RoleEffect::Tax).apply(50), 25);
        assert_eq!(role_modifier(Role::Explorer, RoleEffect::RandomReward).apply(40), 60);
        assert_eq!(role_modifier(Role::Explorer, RoleEffect::SwampPenalty), Modifier::Immune);
        assert_eq!(role_modifier(Role::Politician, RoleEffect::Confrontation), Modifier::Authority);
    }

    #[test]
    fn test_neutral_entries() {
        for role in [Role::Builder, Role::Merchant, Role::Politician] {
            assert_eq!(role_modifier(role, RoleEffect::SwampPenalty), Modifier::Neutral);
        }
        assert_eq!(role_modifier(Role::Explorer, RoleEffect::Tax).apply(50), 50);
        assert_eq!(Modifier::Immune.apply(10), 10);
    }
}
