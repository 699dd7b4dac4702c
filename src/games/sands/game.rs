//! Stock board, default seats and the game builder.

use crate::core::{
    ConfigError, GameConfig, GameRng, PlayerSetup, Role, RulesConfig, TileSpec, TileType,
};
use crate::rules::TurnController;

/// The 20-tile desert loop.
#[must_use]
pub fn stock_board() -> Vec<TileSpec> {
    vec![
        TileSpec::new("Start", TileType::Start),
        TileSpec::city("Damascus", 100, 20),
        TileSpec::new("Sandstorm", TileType::Swamp),
        TileSpec::city("Baghdad", 120, 25),
        TileSpec::new("Palm Oasis", TileType::Oasis),
        TileSpec::city("Cairo", 150, 30),
        TileSpec::new("Sultan's Tax", TileType::Tax),
        TileSpec::city("Alexandria", 140, 28),
        TileSpec::new("The Sage", TileType::Oracle),
        TileSpec::city("Riyadh", 160, 35),
        TileSpec::new("The Dungeon", TileType::Jail),
        TileSpec::city("Dubai", 200, 50),
        TileSpec::new("Trade Caravan", TileType::Event),
        TileSpec::city("Doha", 180, 40),
        TileSpec::new("Buried Cache", TileType::Treasure),
        TileSpec::city("Muscat", 130, 26),
        TileSpec::new("The Library", TileType::Oracle),
        TileSpec::city("Petra", 150, 30),
        TileSpec::new("Water Tax", TileType::Tax),
        TileSpec::city("Mecca", 250, 60),
    ]
}

/// One human with `role` against an AI rival with a random open role.
#[must_use]
pub fn stock_config(role: Role) -> GameConfig {
    GameConfig::new(stock_board())
        .with_player(PlayerSetup::human("You", role))
        .with_player(PlayerSetup::ai("Rival"))
}

/// Builder for a stock game.
pub struct SandsGameBuilder {
    role: Role,
    players: Vec<PlayerSetup>,
    rules: RulesConfig,
}

impl Default for SandsGameBuilder {
    fn default() -> Self {
        Self {
            role: Role::Merchant,
            players: Vec::new(),
            rules: RulesConfig::default(),
        }
    }
}

impl SandsGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Role for the human seat of the default table.
    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Add a seat. Once any seat is added, the default human/rival table is
    /// not used.
    pub fn player(mut self, setup: PlayerSetup) -> Self {
        self.players.push(setup);
        self
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// The configuration `build` will start from.
    #[must_use]
    pub fn config(&self) -> GameConfig {
        let config = if self.players.is_empty() {
            stock_config(self.role)
        } else {
            self.players
                .iter()
                .cloned()
                .fold(GameConfig::new(stock_board()), GameConfig::with_player)
        };
        config.with_rules(self.rules.clone())
    }

    /// Start a game with a seeded RNG.
    pub fn build(self, seed: u64) -> Result<TurnController<GameRng>, ConfigError> {
        TurnController::start(self.config(), GameRng::new(seed))
    }
}
