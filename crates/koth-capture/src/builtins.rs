//! Built-in capture types: single players and factions

use std::sync::Arc;

use koth_core::{CaptureCategory, CapperKind, GroupDirectory, Player, PlayerDirectory};
use uuid::Uuid;

use crate::{CaptureError, CaptureResult, CaptureType};

/// Identifier of the single-player capture type
pub const PLAYER_TYPE: &str = "player";

/// Identifier of the faction capture type
pub const FACTION_TYPE: &str = "factionuuid";

/// Plugin whose presence enables the faction capture type
pub const FACTIONS_PLUGIN: &str = "Factions";

/// A single player holds the area
pub struct PlayerCaptureType {
    players: Arc<dyn PlayerDirectory>,
}

impl PlayerCaptureType {
    pub fn new(players: Arc<dyn PlayerDirectory>) -> Self {
        Self { players }
    }
}

impl CaptureType for PlayerCaptureType {
    fn category(&self) -> CaptureCategory {
        CaptureCategory::Single
    }

    fn description(&self) -> &str {
        "A single player"
    }

    fn from_object_key(&self, key: &str) -> CaptureResult<CapperKind> {
        let id = Uuid::parse_str(key).map_err(|e| CaptureError::InvalidKey {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        self.players
            .player(&id)
            .map(CapperKind::player)
            .ok_or_else(|| CaptureError::UnknownObject {
                kind: "player",
                key: key.to_string(),
            })
    }

    fn from_players(&self, players: &[Player]) -> CaptureResult<CapperKind> {
        players
            .first()
            .cloned()
            .map(CapperKind::player)
            .ok_or(CaptureError::NoPlayers)
    }
}

/// A faction holds the area
pub struct FactionCaptureType {
    groups: Arc<dyn GroupDirectory>,
}

impl FactionCaptureType {
    pub fn new(groups: Arc<dyn GroupDirectory>) -> Self {
        Self { groups }
    }
}

impl CaptureType for FactionCaptureType {
    fn category(&self) -> CaptureCategory {
        CaptureCategory::Group
    }

    fn description(&self) -> &str {
        "A faction"
    }

    fn from_object_key(&self, key: &str) -> CaptureResult<CapperKind> {
        self.groups
            .group(key)
            .map(CapperKind::group)
            .ok_or_else(|| CaptureError::UnknownObject {
                kind: "faction",
                key: key.to_string(),
            })
    }

    /// The faction of the first listed player that has one
    fn from_players(&self, players: &[Player]) -> CaptureResult<CapperKind> {
        let first = players.first().ok_or(CaptureError::NoPlayers)?;
        players
            .iter()
            .find_map(|p| self.groups.group_of(p))
            .map(CapperKind::group)
            .ok_or_else(|| CaptureError::NoGroup(first.name.clone()))
    }
}
