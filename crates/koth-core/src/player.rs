//! Players and player groups as seen by the capture core

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_online() -> bool {
    true
}

/// A player known to the host server.
///
/// Identity is the UUID alone; name and online flag are a snapshot taken
/// when the value was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_online")]
    pub online: bool,
}

impl Player {
    /// Create an online player
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            online: true,
        }
    }

    /// Create an online player with a fresh random UUID
    pub fn random(name: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4(), name)
    }

    /// Builder: mark the player as offline
    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }

    pub fn is_online(&self) -> bool {
        self.online
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A group of players (a faction, a team) that can hold an area together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Stable identifier used as the persisted object key
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Player>,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>, members: Vec<Player>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members,
        }
    }

    pub fn contains(&self, player: &Player) -> bool {
        self.members.contains(player)
    }

    /// Members that are currently online
    pub fn online_members(&self) -> Vec<Player> {
        self.members.iter().filter(|p| p.online).cloned().collect()
    }
}
