//! Fixed-size loot chest inventory

use crate::{ItemStack, LootError, LootResult};

/// Number of slots in a loot chest (double chest)
pub const LOOT_SLOTS: usize = 54;

/// A 54-slot chest inventory with a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootInventory {
    title: String,
    slots: Vec<Option<ItemStack>>,
}

impl LootInventory {
    /// Create an empty inventory
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slots: vec![None; LOOT_SLOTS],
        }
    }

    /// Copy of this inventory under a new title, same contents
    pub fn retitled(&self, title: impl Into<String>) -> Self {
        let mut inventory = Self::new(title);
        inventory.slots.clone_from_slice(&self.slots);
        inventory
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Slot count, always [`LOOT_SLOTS`]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Get the item in a slot
    pub fn get(&self, slot: usize) -> Option<&ItemStack> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Put an item into (or clear) a slot.
    ///
    /// Items that could not be decoded again after a save are rejected.
    pub fn set(&mut self, slot: usize, item: Option<ItemStack>) -> LootResult<()> {
        if let Some(item) = &item {
            item.validate()?;
        }
        let target = self
            .slots
            .get_mut(slot)
            .ok_or_else(|| LootError::InvalidSlot(slot.to_string()))?;
        *target = item;
        Ok(())
    }

    /// Take the item out of a slot
    pub fn take(&mut self, slot: usize) -> Option<ItemStack> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Put an item into the first empty slot, returning the slot used, or
    /// `None` when the chest is full
    pub fn add(&mut self, item: ItemStack) -> LootResult<Option<usize>> {
        item.validate()?;
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            return Ok(None);
        };
        self.slots[slot] = Some(item);
        Ok(Some(slot))
    }

    /// Occupied slots in index order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &ItemStack)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| item.as_ref().map(|i| (slot, i)))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// All slots, empty ones included
    pub fn contents(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}
