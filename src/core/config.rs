//! Game configuration.
//!
//! A game is configured at startup by providing:
//! - `TileSpec`s: the board layout
//! - `PlayerSetup`s: seats, with a fixed or random role
//! - `RulesConfig`: every tunable number in the rules
//!
//! `GameConfig` deserializes from JSON with defaults for everything except
//! the board, and is validated before a game starts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::TileType;
use super::resources::Resources;
use super::role::Role;

/// Largest gold amount, price or rent a configuration may name. Keeps
/// every cost and rent computation far from `i64` overflow.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Largest upgrade rate or rent growth percentage.
pub const MAX_RATE_PCT: u32 = 1_000;

/// Configuration errors found by [`GameConfig::validate`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("board needs at least 2 tiles, got {0}")]
    BoardTooSmall(usize),
    #[error("board has {0} tiles, more than a tile id can address")]
    BoardTooLarge(usize),
    #[error("city at index {0} needs a price and rent in 1..={max}", max = MAX_AMOUNT)]
    InvalidCity(usize),
    #[error("game needs 2-8 players, got {0}")]
    PlayerCount(usize),
    #[error("{field} must be a probability in [0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("{field} must be in {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("invalid config JSON: {0}")]
    Json(String),
}

/// Board layout entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub name: String,
    pub kind: TileType,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub rent: Option<i64>,
}

impl TileSpec {
    /// A tile without city data.
    pub fn new(name: impl Into<String>, kind: TileType) -> Self {
        Self {
            name: name.into(),
            kind,
            price: None,
            rent: None,
        }
    }

    /// A purchasable city.
    pub fn city(name: impl Into<String>, price: i64, rent: i64) -> Self {
        Self {
            name: name.into(),
            kind: TileType::City,
            price: Some(price),
            rent: Some(rent),
        }
    }
}

/// One seat at game start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    /// `None` draws a role not yet taken by an earlier seat.
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_ai: bool,
}

impl PlayerSetup {
    /// A human seat with a chosen role.
    pub fn human(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role: Some(role),
            is_ai: false,
        }
    }

    /// An AI seat with a random role.
    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
            is_ai: true,
        }
    }

    /// Fix the role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Uniform random payout `min..min + span`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRange {
    pub min: i64,
    pub span: i64,
}

impl RewardRange {
    #[must_use]
    pub const fn new(min: i64, span: i64) -> Self {
        Self { min, span }
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn end(self) -> i64 {
        self.min + self.span
    }
}

/// What happens when a player cannot cover a gold debit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankruptcyRule {
    /// The player is out; their cities return to the bank.
    #[default]
    Eliminate,
    /// Gold is floored at zero and play continues.
    Ignore,
}

/// Tunable rule constants. Role multipliers live in `role_modifier`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Gold at end of turn that wins the game.
    pub win_gold: i64,
    pub starting_resources: Resources,
    pub pass_start_bonus: i64,
    pub tax: i64,
    pub oasis_water: i64,
    pub event_reward: RewardRange,
    pub treasure_reward: RewardRange,
    /// Upgrade cost per current level, as a percentage of the base price.
    pub upgrade_rate_pct: u32,
    /// Rent growth per level above 1, as a percentage.
    pub rent_growth_pct: u32,
    pub jail_turns: u8,
    pub swamp_penalty: i32,
    pub duel_stake: i64,
    pub authority_duel_stake: i64,
    pub ai_purchase_probability: f64,
    pub ai_upgrade_probability: f64,
    pub oracle_fallback_gold: i64,
    pub bankruptcy: BankruptcyRule,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            win_gold: 2500,
            starting_resources: Resources::new(500, 100, 50, 20),
            pass_start_bonus: 100,
            tax: 50,
            oasis_water: 20,
            event_reward: RewardRange::new(20, 50),
            treasure_reward: RewardRange::new(100, 300),
            upgrade_rate_pct: 80,
            rent_growth_pct: 150,
            jail_turns: 2,
            swamp_penalty: -2,
            duel_stake: 50,
            authority_duel_stake: 100,
            ai_purchase_probability: 0.6,
            ai_upgrade_probability: 0.7,
            oracle_fallback_gold: 10,
            bankruptcy: BankruptcyRule::Eliminate,
        }
    }
}

impl RulesConfig {
    /// Set the winning gold threshold.
    #[must_use]
    pub fn with_win_gold(mut self, gold: i64) -> Self {
        self.win_gold = gold;
        self
    }

    /// Set starting resources for every seat.
    #[must_use]
    pub fn with_starting_resources(mut self, resources: Resources) -> Self {
        self.starting_resources = resources;
        self
    }

    /// Set AI purchase and upgrade probabilities.
    #[must_use]
    pub fn with_ai_probabilities(mut self, purchase: f64, upgrade: f64) -> Self {
        self.ai_purchase_probability = purchase;
        self.ai_upgrade_probability = upgrade;
        self
    }

    /// Set the bankruptcy rule.
    #[must_use]
    pub fn with_bankruptcy(mut self, rule: BankruptcyRule) -> Self {
        self.bankruptcy = rule;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("ai_purchase_probability", self.ai_purchase_probability),
            ("ai_upgrade_probability", self.ai_upgrade_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { field, value });
            }
        }

        let positive = [
            ("win_gold", self.win_gold),
            ("event_reward.span", self.event_reward.span),
            ("treasure_reward.span", self.treasure_reward.span),
        ];
        let non_negative = [
            ("pass_start_bonus", self.pass_start_bonus),
            ("tax", self.tax),
            ("oasis_water", self.oasis_water),
            ("event_reward.min", self.event_reward.min),
            ("treasure_reward.min", self.treasure_reward.min),
            ("duel_stake", self.duel_stake),
            ("authority_duel_stake", self.authority_duel_stake),
            ("oracle_fallback_gold", self.oracle_fallback_gold),
            ("starting_resources.gold", self.starting_resources.gold()),
            ("starting_resources.water", self.starting_resources.water()),
            ("starting_resources.energy", self.starting_resources.energy()),
            ("starting_resources.materials", self.starting_resources.materials()),
        ];
        let rates = [
            ("upgrade_rate_pct", self.upgrade_rate_pct),
            ("rent_growth_pct", self.rent_growth_pct),
        ];

        for (min, checks) in [(1, &positive[..]), (0, &non_negative[..])] {
            for &(field, value) in checks {
                check_range(field, value, min, MAX_AMOUNT)?;
            }
        }
        for (field, value) in rates {
            check_range(field, i64::from(value), 1, i64::from(MAX_RATE_PCT))?;
        }

        Ok(())
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub board: Vec<TileSpec>,
    #[serde(default)]
    pub players: Vec<PlayerSetup>,
    #[serde(default)]
    pub rules: RulesConfig,
}

impl GameConfig {
    /// Create a configuration for a board, with default rules and no seats.
    pub fn new(board: Vec<TileSpec>) -> Self {
        Self {
            board,
            players: Vec::new(),
            rules: RulesConfig::default(),
        }
    }

    /// Add a seat.
    #[must_use]
    pub fn with_player(mut self, player: PlayerSetup) -> Self {
        self.players.push(player);
        self
    }

    /// Replace the rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Parse a JSON configuration. The result is not validated yet.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Check everything a game needs before it starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        super::board::Board::from_specs(&self.board)?;

        if !(2..=8).contains(&self.players.len()) {
            return Err(ConfigError::PlayerCount(self.players.len()));
        }

        self.rules.validate()
    }
}
