//! Item stacks and their persisted blob form

use std::collections::BTreeMap;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::{LootError, LootResult};

/// Largest stack the client accepts
pub const MAX_STACK_SIZE: u32 = 64;

/// An item stack placed in a loot chest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Namespaced material, e.g. `minecraft:diamond`
    pub material: String,
    pub amount: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lore: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub enchantments: BTreeMap<String, u32>,
}

impl ItemStack {
    pub fn new(material: impl Into<String>, amount: u32) -> Self {
        Self {
            material: material.into(),
            amount,
            display_name: None,
            lore: Vec::new(),
            enchantments: BTreeMap::new(),
        }
    }

    /// Builder: set display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Builder: add a lore line
    pub fn with_lore(mut self, line: impl Into<String>) -> Self {
        self.lore.push(line.into());
        self
    }

    /// Builder: add an enchantment
    pub fn with_enchantment(mut self, enchantment: impl Into<String>, level: u32) -> Self {
        self.enchantments.insert(enchantment.into(), level);
        self
    }

    /// Check the stack can be stored and decoded again: a material and a
    /// stack size in `1..=MAX_STACK_SIZE`
    pub fn validate(&self) -> LootResult<()> {
        if self.material.trim().is_empty() {
            return Err(LootError::InvalidItem("empty material".to_string()));
        }
        if self.amount == 0 || self.amount > MAX_STACK_SIZE {
            return Err(LootError::InvalidItem(format!(
                "stack size {} out of range 1..={}",
                self.amount, MAX_STACK_SIZE
            )));
        }
        Ok(())
    }

    /// Encode as a base64 blob for loot documents
    pub fn to_base64(&self) -> LootResult<String> {
        let json = serde_json::to_vec(self)?;
        Ok(base64::engine::general_purpose::STANDARD.encode(json))
    }

    /// Decode a blob produced by [`ItemStack::to_base64`]
    pub fn from_base64(blob: &str) -> LootResult<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(blob.trim())
            .map_err(|e| LootError::ItemDecode(e.to_string()))?;
        let item: ItemStack =
            serde_json::from_slice(&bytes).map_err(|e| LootError::ItemDecode(e.to_string()))?;
        item.validate()?;
        Ok(item)
    }
}

impl std::fmt::Display for ItemStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{}x {} ({})", self.amount, self.material, name),
            None => write!(f, "{}x {}", self.amount, self.material),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_keeps_metadata() {
        let sword = ItemStack::new("minecraft:diamond_sword", 1)
            .with_name("Excalibur")
            .with_lore("Pulled from the hill")
            .with_enchantment("sharpness", 5);

        let blob = sword.to_base64().unwrap();
        assert_eq!(ItemStack::from_base64(&blob).unwrap(), sword);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            ItemStack::from_base64("%%%not base64%%%"),
            Err(LootError::ItemDecode(_))
        ));

        let not_an_item = base64::engine::general_purpose::STANDARD.encode(b"[1,2,3]");
        assert!(ItemStack::from_base64(&not_an_item).is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_stack_size() {
        let blob = ItemStack::new("minecraft:dirt", 65).to_base64().unwrap();
        assert!(matches!(
            ItemStack::from_base64(&blob),
            Err(LootError::InvalidItem(_))
        ));
        assert!(ItemStack::new("  ", 1).validate().is_err());
        assert!(ItemStack::new("minecraft:dirt", MAX_STACK_SIZE).validate().is_ok());
    }
}
