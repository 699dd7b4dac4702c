//! Core types: board, players, resources, roles, RNG and game state.

pub mod board;
pub mod command;
pub mod config;
pub mod log;
pub mod player;
pub mod resources;
pub mod rng;
pub mod role;
pub mod state;

pub use board::{Board, City, Tile, TileId, TileKind, TileType, MAX_CITY_LEVEL};
pub use command::{Choice, Command, CommandRecord};
pub use config::{
    BankruptcyRule, ConfigError, GameConfig, PlayerSetup, RewardRange, RulesConfig, TileSpec,
    MAX_AMOUNT, MAX_RATE_PCT,
};
pub use log::{EventLog, LogEntry, LogTone};
pub use player::{Player, PlayerId, PlayerMap};
pub use resources::{ResourceChange, ResourceKind, Resources};
pub use rng::{GameRng, RandomSource, ScriptedRandom};
pub use role::{role_modifier, Modifier, Percent, Role, RoleEffect};
pub use state::{GameSnapshot, GameState, SnapshotError};
