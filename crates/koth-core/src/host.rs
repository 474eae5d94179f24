//! Collaborator traits implemented by the host server
//!
//! The capture core never talks to the game server directly. Everything it
//! needs (running console commands, probing for optional plugins, looking up
//! players and factions, asking the running event about its area) goes
//! through these traits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Group, Player};

/// Executes commands with console privileges
pub trait ConsoleSender: Send + Sync {
    /// Dispatch a command line as the server console (no leading slash)
    fn dispatch_console(&self, command: &str);
}

/// Probes for optional server plugins
pub trait PluginProbe: Send + Sync {
    fn is_plugin_present(&self, name: &str) -> bool;
}

/// Game mode variants the capture core can unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamemodeKind {
    /// Classic king of the hill
    Classic,
    /// Group-vs-group point race, needs a group capture type
    Conquest,
}

/// Receives notifications about newly available game modes
pub trait GamemodeRegistry: Send + Sync {
    fn register_gamemode(&self, identifier: &str, kind: GamemodeKind);
}

/// Player lookup by UUID
pub trait PlayerDirectory: Send + Sync {
    fn player(&self, id: &Uuid) -> Option<Player>;
}

/// Group (faction) lookup
pub trait GroupDirectory: Send + Sync {
    /// Group by its persisted id
    fn group(&self, id: &str) -> Option<Group>;

    /// Group a player belongs to
    fn group_of(&self, player: &Player) -> Option<Group>;
}

/// The capture event that is currently running
pub trait CaptureEvent {
    /// Name of the contested area
    fn name(&self) -> &str;

    /// Number of commands to draw when a loot uses random selection
    fn loot_amount(&self) -> usize;

    /// Whether a player stands inside the contested area
    fn is_in_area(&self, player: &Player) -> bool;
}
