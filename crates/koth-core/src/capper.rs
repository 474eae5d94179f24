//! Capper model: whoever currently holds (or just captured) an area

use serde::{Deserialize, Serialize};

use crate::{CaptureEvent, Group, Player};

/// Capture category for compatibility checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureCategory {
    /// A single player holds the area
    Single,
    /// A group of players (faction, team) holds the area
    Group,
}

impl CaptureCategory {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Group => "Group",
        }
    }
}

impl std::fmt::Display for CaptureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single capping player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappingPlayer {
    type_identifier: String,
    player: Player,
}

impl CappingPlayer {
    pub fn player(&self) -> &Player {
        &self.player
    }
}

/// A capping group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CappingGroup {
    type_identifier: String,
    group: Group,
}

impl CappingGroup {
    pub fn group(&self) -> &Group {
        &self.group
    }
}

/// Polymorphic capper: a player or a group of players.
///
/// The type identifier is the registry key of the capture type that built
/// this value; it is persisted next to [`CapperKind::object_key`] so the capper
/// can be resolved again later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapperKind {
    Player(CappingPlayer),
    Group(CappingGroup),
}

impl CapperKind {
    /// Capper for a single player, not yet tagged with a type identifier
    pub fn player(player: Player) -> Self {
        Self::Player(CappingPlayer {
            type_identifier: String::new(),
            player,
        })
    }

    /// Capper for a group, not yet tagged with a type identifier
    pub fn group(group: Group) -> Self {
        Self::Group(CappingGroup {
            type_identifier: String::new(),
            group,
        })
    }

    /// Builder: tag with the capture type identifier it was resolved through
    pub fn with_type_identifier(mut self, identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        match &mut self {
            Self::Player(p) => p.type_identifier = identifier,
            Self::Group(g) => g.type_identifier = identifier,
        }
        self
    }

    pub fn type_identifier(&self) -> &str {
        match self {
            Self::Player(p) => &p.type_identifier,
            Self::Group(g) => &g.type_identifier,
        }
    }

    pub fn category(&self) -> CaptureCategory {
        match self {
            Self::Player(_) => CaptureCategory::Single,
            Self::Group(_) => CaptureCategory::Group,
        }
    }

    /// Unique key of the underlying object (player UUID or group id)
    pub fn object_key(&self) -> String {
        match self {
            Self::Player(p) => p.player.id.to_string(),
            Self::Group(g) => g.group.id.clone(),
        }
    }

    /// Display name of the underlying object
    pub fn name(&self) -> &str {
        match self {
            Self::Player(p) => &p.player.name,
            Self::Group(g) => &g.group.name,
        }
    }

    /// Check if a player is (part of) this capper
    pub fn contains(&self, player: &Player) -> bool {
        match self {
            Self::Player(p) => &p.player == player,
            Self::Group(g) => g.group.contains(player),
        }
    }

    /// Every online player represented by this capper
    pub fn all_online_players(&self) -> Vec<Player> {
        match self {
            Self::Player(p) if p.player.online => vec![p.player.clone()],
            Self::Player(_) => Vec::new(),
            Self::Group(g) => g.group.online_members(),
        }
    }

    /// Players eligible for rewards of `event`.
    ///
    /// A single capper is always eligible; a group contributes the members
    /// the event reports inside the area.
    pub fn available_players(&self, event: &dyn CaptureEvent) -> Vec<Player> {
        match self {
            Self::Player(p) => vec![p.player.clone()],
            Self::Group(g) => g
                .group
                .members
                .iter()
                .filter(|m| event.is_in_area(m))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Area(Vec<Player>);

    impl CaptureEvent for Area {
        fn name(&self) -> &str {
            "test"
        }
        fn loot_amount(&self) -> usize {
            1
        }
        fn is_in_area(&self, player: &Player) -> bool {
            self.0.contains(player)
        }
    }

    #[test]
    fn test_player_capper_accessors() {
        let steve = Player::random("Steve");
        let capper = CapperKind::player(steve.clone()).with_type_identifier("player");

        assert_eq!(capper.type_identifier(), "player");
        assert_eq!(capper.category(), CaptureCategory::Single);
        assert_eq!(capper.object_key(), steve.id.to_string());
        assert_eq!(capper.name(), "Steve");
        assert_eq!(capper.available_players(&Area(Vec::new())), vec![steve]);
    }

    #[test]
    fn test_group_available_players_follow_area() {
        let alex = Player::random("Alex");
        let steve = Player::random("Steve");
        let bob = Player::random("Bob").offline();
        let group = Group::new("f-7", "Wolves", vec![alex.clone(), steve.clone(), bob.clone()]);
        let capper = CapperKind::group(group);

        let area = Area(vec![steve.clone(), bob.clone()]);
        assert_eq!(capper.available_players(&area), vec![steve.clone(), bob]);
        assert_eq!(capper.all_online_players(), vec![alex, steve]);
        assert_eq!(capper.category(), CaptureCategory::Group);
        assert_eq!(capper.object_key(), "f-7");
    }

    #[test]
    fn test_offline_player_has_no_online_players() {
        let capper = CapperKind::player(Player::random("Herobrine").offline());
        assert!(capper.all_online_players().is_empty());
    }
}
