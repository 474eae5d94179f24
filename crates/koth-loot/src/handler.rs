//! Loot store: every named loot plus the loot file on disk

use std::path::Path;

use koth_core::LootSettings;
use parking_lot::RwLock;
use serde_json::Value;

use crate::{Loot, LootError, LootResult};

/// Holds all loots of the plugin.
///
/// Names are matched case-insensitively. The loot file is a JSON array of
/// loot documents; entries that fail to load are logged and skipped.
pub struct LootHandler {
    loots: RwLock<Vec<Loot>>,
    settings: LootSettings,
}

impl LootHandler {
    pub fn new(settings: LootSettings) -> Self {
        Self {
            loots: RwLock::new(Vec::new()),
            settings,
        }
    }

    pub fn settings(&self) -> &LootSettings {
        &self.settings
    }

    /// Get a copy of a loot by name
    pub fn get(&self, name: &str) -> Option<Loot> {
        self.loots
            .read()
            .iter()
            .find(|l| l.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// The configured default loot, if it exists
    pub fn default_loot(&self) -> Option<Loot> {
        self.get(&self.settings.default_loot)
    }

    /// Check if a loot exists
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// All loot names
    pub fn names(&self) -> Vec<String> {
        self.loots.read().iter().map(|l| l.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.loots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loots.read().is_empty()
    }

    /// Create an empty loot titled with the configured template
    pub fn create(&self, name: &str) -> LootResult<Loot> {
        let mut loots = self.loots.write();
        if loots.iter().any(|l| l.name().eq_ignore_ascii_case(name)) {
            return Err(LootError::AlreadyExists(name.to_string()));
        }

        let loot = Loot::named(name).with_title_template(self.settings.chest_title.as_str());
        loots.push(loot.clone());
        Ok(loot)
    }

    /// Insert or replace a loot with the same name
    pub fn insert(&self, loot: Loot) {
        let mut loots = self.loots.write();
        match loots
            .iter_mut()
            .find(|l| l.name().eq_ignore_ascii_case(loot.name()))
        {
            Some(existing) => *existing = loot,
            None => loots.push(loot),
        }
    }

    /// Edit a loot in place
    pub fn update<R>(&self, name: &str, f: impl FnOnce(&mut Loot) -> R) -> LootResult<R> {
        let mut loots = self.loots.write();
        let loot = loots
            .iter_mut()
            .find(|l| l.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| LootError::NotFound(name.to_string()))?;
        Ok(f(loot))
    }

    /// Remove a loot
    pub fn remove(&self, name: &str) -> Option<Loot> {
        let mut loots = self.loots.write();
        let pos = loots
            .iter()
            .position(|l| l.name().eq_ignore_ascii_case(name))?;
        Some(loots.remove(pos))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PERSISTENCE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Replace all loots with the entries of a JSON array, returning how many
    /// were loaded.
    ///
    /// Names differing only by case are one loot: a later entry replaces an
    /// earlier one in place.
    pub fn load_str(&self, json: &str) -> LootResult<usize> {
        let value: Value = serde_json::from_str(json)?;
        let entries = value
            .as_array()
            .ok_or_else(|| LootError::InvalidDocument("expected a list of loots".to_string()))?;

        let mut loaded: Vec<Loot> = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let loot = match Loot::from_document(entry, &self.settings.chest_title) {
                Ok(loot) => loot,
                Err(e) => {
                    log::error!("[LootHandler] Skipping loot #{}: {}", index, e);
                    continue;
                }
            };
            match loaded
                .iter_mut()
                .find(|l| l.name().eq_ignore_ascii_case(loot.name()))
            {
                Some(existing) => {
                    log::warn!(
                        "[LootHandler] Loot #{} '{}' replaces duplicate '{}'",
                        index,
                        loot.name(),
                        existing.name()
                    );
                    *existing = loot;
                }
                None => loaded.push(loot),
            }
        }

        let count = loaded.len();
        *self.loots.write() = loaded;
        Ok(count)
    }

    /// All loots as a JSON array
    pub fn save_string(&self) -> LootResult<String> {
        let documents: Vec<Value> = self.loots.read().iter().map(Loot::save).collect();
        Ok(serde_json::to_string_pretty(&documents)?)
    }

    /// Load the loot file; a missing file leaves the store empty
    pub fn load_from_path(&self, path: &Path) -> LootResult<usize> {
        if !path.exists() {
            log::info!("[LootHandler] No loot file at {}", path.display());
            self.loots.write().clear();
            return Ok(0);
        }

        let json = std::fs::read_to_string(path)?;
        let count = self.load_str(&json)?;
        log::info!("[LootHandler] Loaded {} loot(s) from {}", count, path.display());
        Ok(count)
    }

    /// Write the loot file, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> LootResult<()> {
        let json = self.save_string()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Default for LootHandler {
    fn default() -> Self {
        Self::new(LootSettings::default())
    }
}
