//! Capture Type Registry: central storage for all capture types

use std::collections::HashMap;
use std::sync::Arc;

use koth_core::{
    CaptureCategory, CapperKind, GamemodeKind, GamemodeRegistry, GroupDirectory, HookSettings,
    Player, PlayerDirectory, PluginProbe,
};
use parking_lot::RwLock;

use crate::{
    BoxedCaptureType, CAPPER_CLASS, CaptureClass, CaptureError, CaptureResult, CaptureType,
    FACTION_TYPE, FACTIONS_PLUGIN, FactionCaptureType, GROUP_CLASS, PLAYER_TYPE,
    PlayerCaptureType,
};

/// Game mode unlocked by the first group capture type
pub const CONQUEST_GAMEMODE: &str = "conquest";

/// Registry shared between threads of a multi-threaded host
pub type SharedRegistry = Arc<RwLock<CaptureTypeRegistry>>;

/// Central registry for capture types
///
/// Capture types are registered during the load phase (built-ins first, then
/// other plugins), and the preferred type is fixed during the enable phase so
/// late registrations do not silently override the configured default.
///
/// ## Usage
///
/// ```rust,ignore
/// let mut registry = CaptureTypeRegistry::new(gamemodes);
/// registry.on_load(&config.hooks, &probe, players, groups);
/// registry.register("team", Arc::new(TeamCaptureType::new()), false);
/// registry.on_enable(&config.koth.default_capture_type);
///
/// let capper = registry.resolve_from_players(&CaptureClass::Any, &in_area);
/// ```
pub struct CaptureTypeRegistry {
    /// Capture types by identifier
    capture_types: HashMap<String, BoxedCaptureType>,

    /// Registration order of `capture_types`
    order: Vec<String>,

    /// Capability classes by identifier (superset of `capture_types`)
    capture_classes: HashMap<String, CaptureClass>,

    /// Registration order of `capture_classes`
    class_order: Vec<String>,

    /// Identifier of the preferred capture type
    preferred: Option<String>,

    gamemodes: Arc<dyn GamemodeRegistry>,
}

impl CaptureTypeRegistry {
    /// Create a new empty registry
    pub fn new(gamemodes: Arc<dyn GamemodeRegistry>) -> Self {
        Self {
            capture_types: HashMap::new(),
            order: Vec::new(),
            capture_classes: HashMap::new(),
            class_order: Vec::new(),
            preferred: None,
            gamemodes,
        }
    }

    /// Wrap into a lock for multi-threaded hosts
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Load phase: reset and register the built-in capture types.
    ///
    /// The faction type is only registered when the factions hook is enabled,
    /// the factions plugin is present and a group directory is available.
    pub fn on_load(
        &mut self,
        hooks: &HookSettings,
        probe: &dyn PluginProbe,
        players: Arc<dyn PlayerDirectory>,
        groups: Option<Arc<dyn GroupDirectory>>,
    ) {
        self.clear();

        self.register_capability(CAPPER_CLASS, CaptureClass::Any);
        self.register(PLAYER_TYPE, Arc::new(PlayerCaptureType::new(players)), true);

        if !hooks.factions {
            return;
        }
        if !probe.is_plugin_present(FACTIONS_PLUGIN) {
            log::info!(
                "[CaptureRegistry] {} not present, skipping faction capture type",
                FACTIONS_PLUGIN
            );
            return;
        }
        match groups {
            Some(groups) => {
                self.register(FACTION_TYPE, Arc::new(FactionCaptureType::new(groups)), true);
            }
            None => log::warn!(
                "[CaptureRegistry] {} present but no faction directory was provided",
                FACTIONS_PLUGIN
            ),
        }
    }

    /// Enable phase: prefer the configured default capture type.
    ///
    /// Returns false (and keeps the current preference) when the identifier is
    /// not registered.
    pub fn on_enable(&mut self, default_identifier: &str) -> bool {
        match self.set_preferred(default_identifier) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[CaptureRegistry] Default capture type ignored: {}", e);
                false
            }
        }
    }

    /// Remove every capture type and class
    pub fn clear(&mut self) {
        self.capture_types.clear();
        self.order.clear();
        self.capture_classes.clear();
        self.class_order.clear();
        self.preferred = None;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Register a capture type.
    ///
    /// Re-registering an identifier replaces the previous type. The first
    /// group type of a load cycle also registers the `groupclass` capability
    /// and unlocks the conquest game mode.
    pub fn register(
        &mut self,
        identifier: impl Into<String>,
        capture_type: BoxedCaptureType,
        make_default: bool,
    ) {
        let identifier = identifier.into();

        if capture_type.category() == CaptureCategory::Group
            && !self.capture_classes.contains_key(GROUP_CLASS)
        {
            self.register_capability(GROUP_CLASS, CaptureClass::Category(CaptureCategory::Group));
            self.gamemodes
                .register_gamemode(CONQUEST_GAMEMODE, GamemodeKind::Conquest);
        }

        log::debug!(
            "[CaptureRegistry] Registering '{}' ({}): {}",
            identifier,
            capture_type.category(),
            capture_type.description()
        );
        if self
            .capture_types
            .insert(identifier.clone(), capture_type)
            .is_some()
        {
            log::debug!("[CaptureRegistry] Replaced capture type '{}'", identifier);
        } else {
            self.order.push(identifier.clone());
        }

        self.register_capability(identifier.clone(), CaptureClass::of_type(identifier.clone()));

        if make_default {
            self.preferred = Some(identifier);
        }
    }

    /// Register a capture type from two factory closures
    pub fn register_fn<K, P>(
        &mut self,
        identifier: impl Into<String>,
        category: CaptureCategory,
        from_key: K,
        from_players: P,
        make_default: bool,
    ) where
        K: Fn(&str) -> CaptureResult<CapperKind> + Send + Sync + 'static,
        P: Fn(&[Player]) -> CaptureResult<CapperKind> + Send + Sync + 'static,
    {
        let capture_type = crate::FnCaptureType::new(category, from_key, from_players);
        self.register(identifier, Arc::new(capture_type), make_default);
    }

    /// Register a capability class under an identifier
    pub fn register_capability(&mut self, identifier: impl Into<String>, class: CaptureClass) {
        let identifier = identifier.into();
        if self
            .capture_classes
            .insert(identifier.clone(), class)
            .is_none()
        {
            self.class_order.push(identifier);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP
    // ═══════════════════════════════════════════════════════════════════════════

    /// Get a capture type by identifier
    pub fn capture_type(&self, identifier: &str) -> Option<&dyn CaptureType> {
        self.capture_types.get(identifier).map(|t| t.as_ref())
    }

    /// Get a capability class by identifier
    pub fn capture_class(&self, identifier: &str) -> Option<&CaptureClass> {
        self.capture_classes.get(identifier)
    }

    /// Check if a capture type is registered
    pub fn has(&self, identifier: &str) -> bool {
        self.capture_types.contains_key(identifier)
    }

    /// Capture type identifiers in registration order
    pub fn identifiers(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Number of registered capture types
    pub fn len(&self) -> usize {
        self.capture_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capture_types.is_empty()
    }

    /// Identifier a capability class is registered under; the earliest
    /// registration wins when several share a class
    pub fn identifier_for(&self, class: &CaptureClass) -> Option<&str> {
        self.class_order
            .iter()
            .find(|id| self.capture_classes.get(id.as_str()) == Some(class))
            .map(String::as_str)
    }

    /// Identifier of the preferred capture type
    pub fn preferred(&self) -> Option<&str> {
        self.preferred.as_deref()
    }

    /// The preferred capture type
    pub fn preferred_type(&self) -> Option<&dyn CaptureType> {
        self.preferred().and_then(|id| self.capture_type(id))
    }

    /// Prefer a registered capture type
    pub fn set_preferred(&mut self, identifier: &str) -> CaptureResult<()> {
        if !self.has(identifier) {
            return Err(CaptureError::UnknownType(identifier.to_string()));
        }
        self.preferred = Some(identifier.to_string());
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // RESOLUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Rebuild a capper from a persisted capture type identifier and object key
    pub fn try_resolve_by_identifier(
        &self,
        identifier: &str,
        object_key: &str,
    ) -> CaptureResult<CapperKind> {
        let capture_type = self
            .capture_types
            .get(identifier)
            .ok_or_else(|| CaptureError::UnknownType(identifier.to_string()))?;

        Ok(capture_type
            .from_object_key(object_key)?
            .with_type_identifier(identifier))
    }

    /// Rebuild a capper, treating any failure as "no capper".
    ///
    /// Persisted references may be stale, so failures are logged, never
    /// propagated.
    pub fn resolve_by_identifier(&self, identifier: &str, object_key: &str) -> Option<CapperKind> {
        match self.try_resolve_by_identifier(identifier, object_key) {
            Ok(capper) => Some(capper),
            Err(CaptureError::UnknownType(id)) => {
                log::debug!("[CaptureRegistry] Unknown capture type '{}'", id);
                None
            }
            Err(e) => {
                log::warn!(
                    "[CaptureRegistry] Could not resolve {}:{}: {}",
                    identifier,
                    object_key,
                    e
                );
                None
            }
        }
    }

    /// Build a capper of at least `required` capability from a set of players.
    ///
    /// The preferred type is tried first, then the others in registration
    /// order; the first compatible type decides the outcome.
    pub fn try_resolve_from_players(
        &self,
        required: &CaptureClass,
        players: &[Player],
    ) -> CaptureResult<CapperKind> {
        if players.is_empty() {
            return Err(CaptureError::NoPlayers);
        }

        let candidates = self
            .preferred
            .iter()
            .chain(self.order.iter().filter(|id| Some(*id) != self.preferred.as_ref()));

        for identifier in candidates {
            let Some(capture_type) = self.capture_types.get(identifier) else {
                continue;
            };
            if !required.admits(identifier, capture_type.as_ref()) {
                continue;
            }
            return Ok(capture_type
                .from_players(players)?
                .with_type_identifier(identifier.as_str()));
        }

        Err(CaptureError::Incompatible(required.clone()))
    }

    /// Build a capper from a set of players, treating any failure as "no capper"
    pub fn resolve_from_players(
        &self,
        required: &CaptureClass,
        players: &[Player],
    ) -> Option<CapperKind> {
        match self.try_resolve_from_players(required, players) {
            Ok(capper) => Some(capper),
            Err(CaptureError::NoPlayers) => None,
            Err(e) => {
                log::warn!("[CaptureRegistry] Could not build capper: {}", e);
                None
            }
        }
    }

    /// Iterate over all capture types
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn CaptureType)> {
        self.order.iter().filter_map(|id| {
            self.capture_types
                .get(id)
                .map(|t| (id.as_str(), t.as_ref()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use koth_core::Group;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Gamemodes(Mutex<Vec<(String, GamemodeKind)>>);

    impl GamemodeRegistry for Gamemodes {
        fn register_gamemode(&self, identifier: &str, kind: GamemodeKind) {
            self.0.lock().push((identifier.to_string(), kind));
        }
    }

    fn registry() -> (CaptureTypeRegistry, Arc<Gamemodes>) {
        let gamemodes = Arc::new(Gamemodes::default());
        (CaptureTypeRegistry::new(gamemodes.clone()), gamemodes)
    }

    fn single_named(tag: &'static str) -> BoxedCaptureType {
        Arc::new(crate::FnCaptureType::new(
            CaptureCategory::Single,
            move |_: &str| Ok(CapperKind::player(Player::random(tag))),
            |players: &[Player]| Ok(CapperKind::player(players[0].clone())),
        ))
    }

    fn group_type() -> BoxedCaptureType {
        Arc::new(crate::FnCaptureType::new(
            CaptureCategory::Group,
            |key: &str| Ok(CapperKind::group(Group::new(key, "Team", Vec::new()))),
            |players: &[Player]| {
                Ok(CapperKind::group(Group::new("t-1", "Team", players.to_vec())))
            },
        ))
    }

    #[test]
    fn test_last_writer_wins() {
        let (mut registry, _) = registry();
        registry.register("custom", single_named("first"), false);
        registry.register("custom", single_named("second"), false);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.identifiers(), vec!["custom"]);
        let capper = registry.resolve_by_identifier("custom", "x").unwrap();
        assert_eq!(capper.name(), "second");
        assert_eq!(capper.type_identifier(), "custom");
    }

    #[test]
    fn test_group_registration_unlocks_conquest_once() {
        let (mut registry, gamemodes) = registry();
        registry.register("team", group_type(), false);
        registry.register("clan", group_type(), false);

        assert_eq!(
            registry.capture_class(GROUP_CLASS),
            Some(&CaptureClass::Category(CaptureCategory::Group))
        );
        assert_eq!(
            *gamemodes.0.lock(),
            vec![(CONQUEST_GAMEMODE.to_string(), GamemodeKind::Conquest)]
        );
    }

    #[test]
    fn test_single_registration_does_not_unlock_conquest() {
        let (mut registry, gamemodes) = registry();
        registry.register("solo", single_named("solo"), false);

        assert!(registry.capture_class(GROUP_CLASS).is_none());
        assert!(gamemodes.0.lock().is_empty());
    }

    #[test]
    fn test_unknown_identifier_resolves_to_none() {
        let (registry, _) = registry();
        assert!(registry.resolve_by_identifier("nope", "key").is_none());
        assert!(matches!(
            registry.try_resolve_by_identifier("nope", "key"),
            Err(CaptureError::UnknownType(_))
        ));
    }

    #[test]
    fn test_empty_players_resolve_to_none() {
        let (mut registry, _) = registry();
        registry.register("solo", single_named("solo"), true);
        assert!(registry.resolve_from_players(&CaptureClass::Any, &[]).is_none());
    }

    #[test]
    fn test_resolve_from_players_filters_by_class() {
        let (mut registry, _) = registry();
        registry.register("solo", single_named("solo"), true);
        registry.register("team", group_type(), false);
        let players = vec![Player::random("Alex"), Player::random("Steve")];

        let any = registry.resolve_from_players(&CaptureClass::Any, &players).unwrap();
        assert_eq!(any.type_identifier(), "solo");

        let group = registry
            .resolve_from_players(&CaptureClass::Category(CaptureCategory::Group), &players)
            .unwrap();
        assert_eq!(group.type_identifier(), "team");
        assert_eq!(group.category(), CaptureCategory::Group);

        assert!(matches!(
            registry.try_resolve_from_players(&CaptureClass::of_type("ghost"), &players),
            Err(CaptureError::Incompatible(_))
        ));
    }

    #[test]
    fn test_preferred_type_is_tried_first() {
        let (mut registry, _) = registry();
        registry.register("solo", single_named("solo"), false);
        registry.register("team", group_type(), true);

        let capper = registry
            .resolve_from_players(&CaptureClass::Any, &[Player::random("Alex")])
            .unwrap();
        assert_eq!(capper.type_identifier(), "team");
    }

    #[test]
    fn test_identifier_for_class() {
        let (mut registry, _) = registry();
        registry.register_capability(CAPPER_CLASS, CaptureClass::Any);
        registry.register("team", group_type(), false);

        assert_eq!(registry.identifier_for(&CaptureClass::Any), Some(CAPPER_CLASS));
        assert_eq!(registry.identifier_for(&CaptureClass::of_type("team")), Some("team"));
        assert_eq!(
            registry.identifier_for(&CaptureClass::Category(CaptureCategory::Group)),
            Some(GROUP_CLASS)
        );
        assert_eq!(registry.identifier_for(&CaptureClass::of_type("ghost")), None);
    }

    #[test]
    fn test_identifier_for_shared_class_is_earliest() {
        let (mut registry, _) = registry();
        registry.register_capability(CAPPER_CLASS, CaptureClass::Any);
        registry.register("team", group_type(), false);
        registry.register_capability("alias", CaptureClass::of_type("team"));
        registry.register_capability("anything", CaptureClass::Any);
        // re-registering keeps the original position
        registry.register_capability(CAPPER_CLASS, CaptureClass::Any);

        for _ in 0..8 {
            assert_eq!(registry.identifier_for(&CaptureClass::of_type("team")), Some("team"));
            assert_eq!(registry.identifier_for(&CaptureClass::Any), Some(CAPPER_CLASS));
        }
    }

    #[test]
    fn test_iter_lists_types_in_registration_order() {
        let (mut registry, _) = registry();
        registry.register("solo", single_named("solo"), false);
        registry.register("team", group_type(), false);
        registry.register("solo", single_named("again"), false);

        let listed: Vec<_> = registry
            .iter()
            .map(|(id, t)| (id.to_string(), t.category()))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("solo".to_string(), CaptureCategory::Single),
                ("team".to_string(), CaptureCategory::Group),
            ]
        );
    }

    #[test]
    fn test_set_preferred_requires_registration() {
        let (mut registry, _) = registry();
        registry.register("solo", single_named("solo"), false);

        assert!(registry.preferred().is_none());
        assert!(registry.set_preferred("ghost").is_err());
        registry.set_preferred("solo").unwrap();
        assert_eq!(registry.preferred(), Some("solo"));
        assert!(registry.preferred_type().is_some());
    }

    #[test]
    fn test_factory_error_resolves_to_none() {
        let (mut registry, _) = registry();
        registry.register_fn(
            "stale",
            CaptureCategory::Single,
            |key: &str| {
                Err(CaptureError::UnknownObject {
                    kind: "player",
                    key: key.to_string(),
                })
            },
            |_: &[Player]| Err(CaptureError::NoPlayers),
            false,
        );

        assert!(registry.resolve_by_identifier("stale", "abc").is_none());
        assert!(
            registry
                .resolve_from_players(&CaptureClass::Any, &[Player::random("Alex")])
                .is_none()
        );
    }
}
