//! Game state and the presentation snapshot.
//!
//! ## GameState
//!
//! Everything a running game mutates:
//! - Board (city owners and levels)
//! - Player registry
//! - Turn progression and the current phase
//! - Event log and command history
//!
//! ## GameSnapshot
//!
//! A detached, serializable copy of the presentation boundary: board,
//! players, phase (including any pending decision) and the event log.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::{Board, TileId};
use super::command::{Command, CommandRecord};
use super::log::{EventLog, LogEntry, LogTone};
use super::player::{Player, PlayerId, PlayerMap};
use super::resources::ResourceKind;
use crate::effects::{Debt, Mutation};
use crate::rules::TurnPhase;

/// Full game state.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// The board, with live city ownership.
    pub board: Board,

    /// Player registry, one entry per seat.
    pub players: PlayerMap<Player>,

    /// Seat whose turn it is.
    pub current: PlayerId,

    /// Turn number (starts at 1, +1 per advance).
    pub turn_number: u32,

    /// Where the turn state machine is.
    pub phase: TurnPhase,

    /// Player-facing event log.
    pub log: EventLog,

    /// Accepted commands, in order.
    pub history: Vector<CommandRecord>,

    sequence: u32,
}

impl GameState {
    /// Create a fresh game. Player 0 moves first.
    #[must_use]
    pub fn new(board: Board, players: Vec<Player>) -> Self {
        Self {
            board,
            players: PlayerMap::from_vec(players),
            current: PlayerId::new(0),
            turn_number: 1,
            phase: TurnPhase::AwaitingRoll,
            log: EventLog::new(),
            history: Vector::new(),
            sequence: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Players still in the game, in seat order.
    #[must_use]
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, p)| p.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    /// Other active players standing on `position`, in seat order.
    pub fn opponents_at(&self, position: usize, actor: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(move |(id, p)| *id != actor && p.is_active() && p.position == position)
            .map(|(id, _)| id)
    }

    /// Next active seat after `player`, wrapping. `None` if nobody else is active.
    #[must_use]
    pub fn next_active_after(&self, player: PlayerId) -> Option<PlayerId> {
        let count = self.player_count();
        (1..count)
            .map(|offset| PlayerId::new(((player.index() + offset) % count) as u8))
            .find(|&id| self.players[id].is_active())
    }

    // === Mutations ===

    /// Apply one mutation. Returns the uncovered part of a gold debit.
    pub fn apply(&mut self, mutation: &Mutation) -> Option<Debt> {
        match *mutation {
            Mutation::Adjust { player, kind, delta } => {
                let change = self.players.get_mut(player)?.resources.adjust(kind, delta);
                (kind == ResourceKind::Gold && change.shortfall > 0).then_some(Debt {
                    player,
                    shortfall: change.shortfall,
                })
            }

            Mutation::Transfer { from, to, amount } => {
                let change = self
                    .players
                    .get_mut(from)?
                    .resources
                    .adjust(ResourceKind::Gold, -amount);
                if let Some(receiver) = self.players.get_mut(to) {
                    receiver.resources.adjust(ResourceKind::Gold, amount);
                }
                (change.shortfall > 0).then_some(Debt {
                    player: from,
                    shortfall: change.shortfall,
                })
            }

            Mutation::SetMovementModifier { player, value } => {
                self.players.get_mut(player)?.movement_modifier = value;
                None
            }

            Mutation::Imprison { player, turns } => {
                let p = self.players.get_mut(player)?;
                p.in_jail = true;
                p.jail_turns = turns;
                None
            }

            Mutation::Acquire { player, tile, cost } => {
                let city = self.board.city_mut(tile)?;
                if city.owner().is_some() {
                    return None;
                }
                city.acquire(player);
                let buyer = self.players.get_mut(player)?;
                buyer.add_property(tile);
                let change = buyer.resources.adjust(ResourceKind::Gold, -cost);
                (change.shortfall > 0).then_some(Debt {
                    player,
                    shortfall: change.shortfall,
                })
            }

            Mutation::Upgrade { player, tile, cost } => {
                let city = self.board.city_mut(tile)?;
                if city.owner() != Some(player) || !city.upgrade() {
                    return None;
                }
                let change = self
                    .players
                    .get_mut(player)?
                    .resources
                    .adjust(ResourceKind::Gold, -cost);
                (change.shortfall > 0).then_some(Debt {
                    player,
                    shortfall: change.shortfall,
                })
            }
        }
    }

    /// Return every city a player owns to the bank.
    pub fn release_cities(&mut self, player: PlayerId) -> Vec<TileId> {
        let Some(owner) = self.players.get_mut(player) else {
            return Vec::new();
        };
        let released: Vec<TileId> = owner.clear_properties().into_iter().collect();
        for &tile in &released {
            if let Some(city) = self.board.city_mut(tile) {
                city.release();
            }
        }
        released
    }

    // === Log and history ===

    /// Append a player-facing log entry for the current turn.
    pub fn note(&mut self, player: Option<PlayerId>, tone: LogTone, message: impl Into<String>) {
        self.log.push(LogEntry {
            turn: self.turn_number,
            player,
            tone,
            message: message.into(),
        });
    }

    /// Record an accepted command.
    pub fn record(&mut self, player: PlayerId, command: Command) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.history
            .push_back(CommandRecord::new(player, command, self.turn_number, sequence));
    }

    /// Detached copy of what the presentation layer shows.
    #[must_use]
    pub fn snapshot(&self, epoch: u64) -> GameSnapshot {
        GameSnapshot {
            epoch,
            turn_number: self.turn_number,
            current: self.current,
            phase: self.phase.clone(),
            board: self.board.clone(),
            players: self.players.values().cloned().collect(),
            log: self.log.iter().cloned().collect(),
        }
    }
}

/// Snapshot encoding errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary: {0}")]
    Binary(#[from] bincode::Error),
}

/// Serializable view of a game for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Game generation; bumps on every restart.
    pub epoch: u64,
    pub turn_number: u32,
    pub current: PlayerId,
    pub phase: TurnPhase,
    pub board: Board,
    pub players: Vec<Player>,
    pub log: Vec<LogEntry>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary encoding for shipping to another process.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
