//! Capture type trait and capability classes

use std::sync::Arc;

use koth_core::{CaptureCategory, CapperKind, Player};

use crate::CaptureResult;

/// Class identifier that admits every capture type
pub const CAPPER_CLASS: &str = "capperclass";

/// Class identifier registered once a group capture type exists
pub const GROUP_CLASS: &str = "groupclass";

/// A registrable kind of capper.
///
/// Implementations build [`CapperKind`] values either from a persisted object
/// key or from the players currently holding an area. The registry tags the
/// result with the identifier the type was registered under, so factories do
/// not need to know their own key.
///
/// ## Example Implementation
///
/// ```rust,ignore
/// struct TeamCaptureType { teams: Arc<TeamManager> }
///
/// impl CaptureType for TeamCaptureType {
///     fn category(&self) -> CaptureCategory {
///         CaptureCategory::Group
///     }
///     fn from_object_key(&self, key: &str) -> CaptureResult<CapperKind> {
///         self.teams.group(key).map(CapperKind::group).ok_or(...)
///     }
///     // ...
/// }
/// ```
pub trait CaptureType: Send + Sync {
    /// Category used for compatibility checks
    fn category(&self) -> CaptureCategory;

    /// Human-readable description
    fn description(&self) -> &str {
        ""
    }

    /// Rebuild a capper from its persisted object key.
    ///
    /// Must fail when the referenced object no longer exists.
    fn from_object_key(&self, key: &str) -> CaptureResult<CapperKind>;

    /// Build a capper from a non-empty list of online players
    fn from_players(&self, players: &[Player]) -> CaptureResult<CapperKind>;
}

/// Shared capture type handle
pub type BoxedCaptureType = Arc<dyn CaptureType>;

/// Capture type built from two factory closures
pub struct FnCaptureType<K, P> {
    category: CaptureCategory,
    from_key: K,
    from_players: P,
}

impl<K, P> FnCaptureType<K, P>
where
    K: Fn(&str) -> CaptureResult<CapperKind> + Send + Sync,
    P: Fn(&[Player]) -> CaptureResult<CapperKind> + Send + Sync,
{
    pub fn new(category: CaptureCategory, from_key: K, from_players: P) -> Self {
        Self {
            category,
            from_key,
            from_players,
        }
    }
}

impl<K, P> CaptureType for FnCaptureType<K, P>
where
    K: Fn(&str) -> CaptureResult<CapperKind> + Send + Sync,
    P: Fn(&[Player]) -> CaptureResult<CapperKind> + Send + Sync,
{
    fn category(&self) -> CaptureCategory {
        self.category
    }

    fn from_object_key(&self, key: &str) -> CaptureResult<CapperKind> {
        (self.from_key)(key)
    }

    fn from_players(&self, players: &[Player]) -> CaptureResult<CapperKind> {
        (self.from_players)(players)
    }
}

/// Capability a capture type can be asked for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaptureClass {
    /// Any capper at all
    Any,
    /// Any capper of the given category
    Category(CaptureCategory),
    /// Exactly the capture type registered under this identifier
    Type(String),
}

impl CaptureClass {
    /// Class of the capture type registered as `identifier`
    pub fn of_type(identifier: impl Into<String>) -> Self {
        Self::Type(identifier.into())
    }

    /// Check whether a capture type registered as `identifier` satisfies this class
    pub fn admits(&self, identifier: &str, capture_type: &dyn CaptureType) -> bool {
        match self {
            Self::Any => true,
            Self::Category(category) => capture_type.category() == *category,
            Self::Type(id) => id == identifier,
        }
    }
}

impl std::fmt::Display for CaptureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "any capper"),
            Self::Category(category) => write!(f, "{} cappers", category),
            Self::Type(id) => write!(f, "capture type '{}'", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CaptureError;

    fn group_type() -> impl CaptureType {
        FnCaptureType::new(
            CaptureCategory::Group,
            |_: &str| Err(CaptureError::NoPlayers),
            |_: &[Player]| Err(CaptureError::NoPlayers),
        )
    }

    #[test]
    fn test_class_admits() {
        let team = group_type();

        assert!(CaptureClass::Any.admits("team", &team));
        assert!(CaptureClass::Category(CaptureCategory::Group).admits("team", &team));
        assert!(!CaptureClass::Category(CaptureCategory::Single).admits("team", &team));
        assert!(CaptureClass::of_type("team").admits("team", &team));
        assert!(!CaptureClass::of_type("player").admits("team", &team));
    }

    #[test]
    fn test_fn_capture_type_delegates() {
        let single = FnCaptureType::new(
            CaptureCategory::Single,
            |key: &str| Ok(CapperKind::player(Player::random(key))),
            |players: &[Player]| {
                players
                    .first()
                    .cloned()
                    .map(CapperKind::player)
                    .ok_or(CaptureError::NoPlayers)
            },
        );

        let capper = single.from_object_key("Steve").unwrap();
        assert_eq!(capper.name(), "Steve");
        assert!(matches!(single.from_players(&[]), Err(CaptureError::NoPlayers)));
    }
}
