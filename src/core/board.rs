//! The circular board.
//!
//! A board is a fixed, ordered loop of tiles. Only CITY tiles carry mutable
//! data (owner and level), and only `GameState` mutates it so the owner's
//! property set stays in sync.

use serde::{Deserialize, Serialize};

use super::config::{ConfigError, TileSpec, MAX_AMOUNT};
use super::player::PlayerId;

/// Highest level a city can reach.
pub const MAX_CITY_LEVEL: u8 = 3;

/// Tile identifier, equal to its board index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile {}", self.0)
    }
}

/// Tile type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileType {
    Start,
    City,
    Event,
    Tax,
    Jail,
    Oracle,
    Oasis,
    Swamp,
    Treasure,
}

/// Purchasable city data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub base_price: i64,
    pub base_rent: i64,
    level: u8,
    owner: Option<PlayerId>,
}

impl City {
    #[must_use]
    pub const fn new(base_price: i64, base_rent: i64) -> Self {
        Self {
            base_price,
            base_rent,
            level: 1,
            owner: None,
        }
    }

    /// Current level in `1..=MAX_CITY_LEVEL`.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub const fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    #[must_use]
    pub const fn can_upgrade(&self) -> bool {
        self.level < MAX_CITY_LEVEL
    }

    pub(crate) fn acquire(&mut self, owner: PlayerId) {
        self.owner = Some(owner);
        self.level = 1;
    }

    /// Raise the level by one. Returns false at the cap.
    pub(crate) fn upgrade(&mut self) -> bool {
        if self.can_upgrade() {
            self.level += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn release(&mut self) {
        self.owner = None;
        self.level = 1;
    }
}

/// Type-specific tile payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Start,
    City(City),
    Event,
    Tax,
    Jail,
    Oracle,
    Oasis,
    Swamp,
    Treasure,
}

/// One board position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub name: String,
    pub kind: TileKind,
}

impl Tile {
    #[must_use]
    pub fn tile_type(&self) -> TileType {
        match self.kind {
            TileKind::Start => TileType::Start,
            TileKind::City(_) => TileType::City,
            TileKind::Event => TileType::Event,
            TileKind::Tax => TileType::Tax,
            TileKind::Jail => TileType::Jail,
            TileKind::Oracle => TileType::Oracle,
            TileKind::Oasis => TileType::Oasis,
            TileKind::Swamp => TileType::Swamp,
            TileKind::Treasure => TileType::Treasure,
        }
    }

    #[must_use]
    pub fn as_city(&self) -> Option<&City> {
        match &self.kind {
            TileKind::City(city) => Some(city),
            _ => None,
        }
    }

    /// Owner, for owned cities.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.as_city().and_then(City::owner)
    }
}

/// The closed loop of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Build a board from layout specs. Tile ids follow spec order.
    pub fn from_specs(specs: &[TileSpec]) -> Result<Self, ConfigError> {
        if specs.len() < 2 {
            return Err(ConfigError::BoardTooSmall(specs.len()));
        }
        if specs.len() > usize::from(u16::MAX) {
            return Err(ConfigError::BoardTooLarge(specs.len()));
        }

        let tiles = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let id = TileId::new(index as u16);
                let kind = match spec.kind {
                    TileType::Start => TileKind::Start,
                    TileType::City => {
                        let (price, rent) = spec
                            .price
                            .zip(spec.rent)
                            .filter(|&(price, rent)| {
                                (1..=MAX_AMOUNT).contains(&price) && (1..=MAX_AMOUNT).contains(&rent)
                            })
                            .ok_or(ConfigError::InvalidCity(index))?;
                        TileKind::City(City::new(price, rent))
                    }
                    TileType::Event => TileKind::Event,
                    TileType::Tax => TileKind::Tax,
                    TileType::Jail => TileKind::Jail,
                    TileType::Oracle => TileKind::Oracle,
                    TileType::Oasis => TileKind::Oasis,
                    TileType::Swamp => TileKind::Swamp,
                    TileType::Treasure => TileKind::Treasure,
                };
                Ok(Tile {
                    id,
                    name: spec.name.clone(),
                    kind,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self { tiles })
    }

    /// Number of tiles, `N`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Boards are never empty; present for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Tile at a position, wrapping around the loop.
    #[must_use]
    pub fn tile_at(&self, position: usize) -> &Tile {
        &self.tiles[position % self.tiles.len()]
    }

    pub(crate) fn city_mut(&mut self, id: TileId) -> Option<&mut City> {
        match self.tiles.get_mut(id.index()).map(|t| &mut t.kind) {
            Some(TileKind::City(city)) => Some(city),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Cities currently owned by `player`.
    pub fn cities_owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Tile> {
        self.tiles
            .iter()
            .filter(move |tile| tile.owner() == Some(player))
    }
}
