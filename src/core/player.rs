//! Player identification, per-player storage and the player registry entry.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier supporting up to 255 players.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexed by `PlayerId`.
//!
//! ## Player
//!
//! Economic and positional state of one seat. Resources go through
//! [`Resources`] so they can never drop below zero; the owned-city set is
//! only changed by `GameState` so it stays in sync with the board.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::board::TileId;
use super::resources::Resources;
use super::role::Role;

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use sands_engine::core::{PlayerId, PlayerMap};
///
/// let mut gold = PlayerMap::from_vec(vec![500_i64, 500]);
/// gold[PlayerId::new(1)] -= 50;
/// assert_eq!(gold[PlayerId::new(1)], 450);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a PlayerMap from already-ordered per-seat values.
    ///
    /// Entry `i` belongs to `PlayerId(i)`.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    /// Controlled by the built-in policy instead of a human.
    pub is_ai: bool,
    /// Board index in `0..board.len()`.
    pub position: usize,
    pub resources: Resources,
    pub in_jail: bool,
    pub jail_turns: u8,
    /// Added to the next raw roll, then reset to 0.
    pub movement_modifier: i32,
    /// Eliminated by an uncovered gold debit.
    pub bankrupt: bool,
    properties: OrdSet<TileId>,
}

impl Player {
    /// Create a player at the start tile.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, role: Role, resources: Resources) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            is_ai: false,
            position: 0,
            resources,
            in_jail: false,
            jail_turns: 0,
            movement_modifier: 0,
            bankrupt: false,
            properties: OrdSet::new(),
        }
    }

    /// Convenience accessor for the gold balance.
    #[must_use]
    pub fn gold(&self) -> i64 {
        self.resources.gold()
    }

    /// Cities owned by this player.
    #[must_use]
    pub fn properties(&self) -> &OrdSet<TileId> {
        &self.properties
    }

    /// Check ownership of a city.
    #[must_use]
    pub fn owns(&self, tile: TileId) -> bool {
        self.properties.contains(&tile)
    }

    pub(crate) fn add_property(&mut self, tile: TileId) {
        self.properties.insert(tile);
    }

    pub(crate) fn clear_properties(&mut self) -> OrdSet<TileId> {
        std::mem::take(&mut self.properties)
    }

    /// Still taking turns.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.bankrupt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_map_from_vec() {
        let map = PlayerMap::from_vec(vec!["a", "b", "c"]);
        let pairs: Vec<_> = map.iter().collect();

        assert_eq!(map.player_count(), 3);
        assert_eq!(map[PlayerId::new(2)], "c");
        assert!(map.get(PlayerId::new(3)).is_none());
        assert_eq!(pairs[..2], [(PlayerId::new(0), &"a"), (PlayerId::new(1), &"b")]);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::from_vec(Vec::new());
    }

    #[test]
    fn test_new_player_defaults() {
        let player = Player::new(PlayerId::new(1), "Rival", Role::Merchant, Resources::new(500, 100, 50, 20));

        assert!(!player.is_ai);
        assert_eq!(player.position, 0);
        assert_eq!(player.gold(), 500);
        assert!(player.properties().is_empty());
        assert!(player.is_active());
    }

    #[test]
    fn test_property_tracking() {
        let mut player = Player::new(PlayerId::new(0), "You", Role::Builder, Resources::default());
        player.add_property(TileId::new(3));
        player.add_property(TileId::new(1));

        assert!(player.owns(TileId::new(3)));
        assert_eq!(player.properties().len(), 2);

        let released = player.clear_properties();
        assert_eq!(released.len(), 2);
        assert!(player.properties().is_empty());
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new(PlayerId::new(0), "You", Role::Explorer, Resources::new(10, 0, 0, 0));
        let json = serde_json::to_string(&player).unwrap();
        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, back);
    }
}
