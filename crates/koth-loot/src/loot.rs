//! Loot: the reward handed to whoever captures an area

use koth_core::{DEFAULT_CHEST_TITLE, MessageBuilder};
use serde_json::{Map, Value, json};

use crate::{ItemStack, LootError, LootInventory, LootResult};

/// Chest title of a loot that has no name yet
pub const UNNAMED_CHEST_TITLE: &str = "Loot chest!";

/// Longest chest title the client displays
pub const MAX_TITLE_CHARS: usize = 32;

/// Placeholder expanded once per eligible player
pub const PLAYER_PLACEHOLDER: &str = "%player%";

/// Placeholder expanded once per eligible, online group member
pub const FACTION_PLACEHOLDER: &str = "%faction%";

/// A named loot: chest contents plus reward commands
#[derive(Debug, Clone, PartialEq)]
pub struct Loot {
    name: String,
    inventory: LootInventory,
    commands: Vec<String>,
    use_random: bool,
    title_template: String,
}

impl Loot {
    /// Create an unnamed, empty loot
    pub fn new() -> Self {
        Self {
            name: String::new(),
            inventory: LootInventory::new(UNNAMED_CHEST_TITLE),
            commands: Vec::new(),
            use_random: false,
            title_template: DEFAULT_CHEST_TITLE.to_string(),
        }
    }

    /// Create an empty loot with a name
    pub fn named(name: impl Into<String>) -> Self {
        let mut loot = Self::new();
        loot.set_name(name);
        loot
    }

    /// Create a loot with a name and reward commands
    pub fn with_commands(name: impl Into<String>, commands: Vec<String>, use_random: bool) -> Self {
        let mut loot = Self::named(name);
        loot.commands = commands;
        loot.use_random = use_random;
        loot
    }

    /// Builder: use a different chest title template
    pub fn with_title_template(mut self, template: impl Into<String>) -> Self {
        self.title_template = template.into();
        let name = self.name.clone();
        self.set_name(name);
        self
    }

    /// Build a loot from a persisted document
    pub fn from_document(document: &Value, title_template: &str) -> LootResult<Self> {
        let mut loot = Self::new().with_title_template(title_template);
        loot.load(document)?;
        Ok(loot)
    }

    /// Chest title for a loot name: template filled in, cut to 32 characters
    pub fn create_title(name: &str, template: &str) -> String {
        let title = MessageBuilder::new(template).loot(name).build();
        title.chars().take(MAX_TITLE_CHARS).collect()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chest title shown to players
    pub fn title(&self) -> &str {
        self.inventory.title()
    }

    /// Rename; the chest is re-titled and keeps its contents
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        let title = Self::create_title(&self.name, &self.title_template);
        self.inventory = self.inventory.retitled(title);
    }

    pub fn inventory(&self) -> &LootInventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut LootInventory {
        &mut self.inventory
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut Vec<String> {
        &mut self.commands
    }

    pub fn add_command(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    pub fn use_random(&self) -> bool {
        self.use_random
    }

    pub fn set_random(&mut self, use_random: bool) {
        self.use_random = use_random;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PERSISTENCE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Replace this loot with the contents of a document.
    ///
    /// Only a missing object or name fails the load. A slot or command entry
    /// that cannot be decoded is logged and skipped.
    pub fn load(&mut self, document: &Value) -> LootResult<&mut Self> {
        let obj = document
            .as_object()
            .ok_or_else(|| LootError::InvalidDocument("expected an object".to_string()))?;
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| LootError::InvalidDocument("missing string field 'name'".to_string()))?;

        self.set_name(name);
        self.inventory.clear();
        self.commands.clear();
        self.use_random = false;

        match obj.get("items") {
            None | Some(Value::Null) => {}
            Some(Value::Object(items)) => {
                for (key, blob) in items {
                    if let Err(e) = self.load_slot(key, blob) {
                        log::error!("[Loot] {}: skipping slot {}: {}", name, key, e);
                    }
                }
            }
            Some(other) => log::error!("[Loot] {}: 'items' is not an object: {}", name, other),
        }

        match obj.get("commands") {
            None | Some(Value::Null) => {}
            Some(Value::Array(entries)) => {
                for entry in entries {
                    match entry.as_str() {
                        Some(command) => self.commands.push(command.to_string()),
                        None => log::error!(
                            "[Loot] {}: skipping command: {}",
                            name,
                            LootError::InvalidCommand(entry.to_string())
                        ),
                    }
                }
            }
            Some(other) => log::error!("[Loot] {}: 'commands' is not a list: {}", name, other),
        }

        match obj.get("useRandom") {
            None | Some(Value::Null) => {}
            Some(Value::Bool(use_random)) => self.use_random = *use_random,
            Some(other) => log::error!("[Loot] {}: 'useRandom' is not a boolean: {}", name, other),
        }

        Ok(self)
    }

    fn load_slot(&mut self, key: &str, blob: &Value) -> LootResult<()> {
        let slot: usize = key
            .trim()
            .parse()
            .map_err(|_| LootError::InvalidSlot(key.to_string()))?;
        let blob = blob
            .as_str()
            .ok_or_else(|| LootError::ItemDecode(format!("expected a string blob, got {}", blob)))?;

        self.inventory.set(slot, Some(ItemStack::from_base64(blob)?))
    }

    /// Serialize to a document; empty slots are left out, as is an empty
    /// command list.
    pub fn save(&self) -> Value {
        let mut items = Map::new();
        for (slot, item) in self.inventory.occupied() {
            match item.to_base64() {
                Ok(blob) => {
                    items.insert(slot.to_string(), Value::String(blob));
                }
                Err(e) => log::error!("[Loot] {}: could not encode slot {}: {}", self.name, slot, e),
            }
        }

        let mut obj = Map::new();
        obj.insert("name".to_string(), json!(self.name));
        obj.insert("useRandom".to_string(), json!(self.use_random));
        obj.insert("items".to_string(), Value::Object(items));
        if !self.commands.is_empty() {
            obj.insert("commands".to_string(), json!(self.commands));
        }

        Value::Object(obj)
    }
}

impl Default for Loot {
    fn default() -> Self {
        Self::new()
    }
}
