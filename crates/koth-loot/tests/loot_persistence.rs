//! Loot document and loot file tests

use koth_core::LootSettings;
use koth_loot::{ItemStack, LOOT_SLOTS, Loot, LootError, LootHandler, MAX_STACK_SIZE};
use serde_json::json;

fn gold_chest() -> Loot {
    let mut loot = Loot::with_commands(
        "Gold Chest",
        vec!["give %player% diamond".to_string(), "say won".to_string()],
        false,
    );
    let inventory = loot.inventory_mut();
    inventory.set(0, Some(ItemStack::new("minecraft:gold_ingot", 32))).unwrap();
    inventory
        .set(13, Some(ItemStack::new("minecraft:golden_apple", 2).with_name("Prize")))
        .unwrap();
    inventory.set(53, Some(ItemStack::new("minecraft:diamond", 1))).unwrap();
    loot
}

#[test]
fn test_gold_chest_round_trip() {
    let original = gold_chest();
    let document = original.save();

    assert_eq!(document["name"], "Gold Chest");
    assert_eq!(document["useRandom"], false);
    assert_eq!(document["items"].as_object().unwrap().len(), 3);
    assert_eq!(document["commands"], json!(["give %player% diamond", "say won"]));

    let mut restored = Loot::new();
    restored.load(&document).unwrap();

    assert_eq!(restored.name(), "Gold Chest");
    assert!(!restored.use_random());
    assert_eq!(restored.commands(), original.commands());
    assert_eq!(
        restored.inventory().occupied().map(|(slot, _)| slot).collect::<Vec<_>>(),
        vec![0, 13, 53]
    );
    assert_eq!(restored.inventory().get(13), original.inventory().get(13));
    assert_eq!(restored, original);
}

#[test]
fn test_edge_case_stacks_round_trip() {
    let mut loot = Loot::named("Edges");
    let inventory = loot.inventory_mut();
    inventory
        .set(0, Some(ItemStack::new("minecraft:cobblestone", MAX_STACK_SIZE)))
        .unwrap();
    inventory.set(1, Some(ItemStack::new("minecraft:nether_star", 1))).unwrap();
    assert!(matches!(
        inventory.set(2, Some(ItemStack::new("minecraft:cobblestone", 128))),
        Err(LootError::InvalidItem(_))
    ));
    assert!(inventory.set(3, Some(ItemStack::new("", 1))).is_err());

    let document = loot.save();
    assert_eq!(document["items"].as_object().unwrap().len(), 2);

    let mut restored = Loot::new();
    restored.load(&document).unwrap();
    assert_eq!(restored.inventory().occupied_count(), 2);
    assert_eq!(restored, loot);
}

#[test]
fn test_missing_commands_loads_empty() {
    let mut loot = Loot::new();
    loot.load(&json!({"name": "Quiet", "useRandom": true})).unwrap();

    assert!(loot.commands().is_empty());
    assert!(loot.use_random());
    assert_eq!(loot.inventory().size(), LOOT_SLOTS);
}

#[test]
fn test_corrupt_entries_are_skipped() {
    let _ = env_logger::builder().is_test(true).try_init();

    let blob = ItemStack::new("minecraft:emerald", 8).to_base64().unwrap();
    let document = json!({
        "name": "Messy",
        "items": {
            "4": blob,
            "abc": blob,
            "60": blob,
            "5": "not a blob",
            "6": 12
        },
        "commands": ["say a", 5, null, "say b"]
    });

    let mut loot = Loot::new();
    loot.load(&document).unwrap();

    assert_eq!(loot.inventory().occupied_count(), 1);
    assert_eq!(loot.inventory().get(4).map(|i| i.amount), Some(8));
    assert_eq!(loot.commands(), ["say a".to_string(), "say b".to_string()]);
}

#[test]
fn test_loot_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("loots.json");

    let handler = LootHandler::default();
    handler.insert(gold_chest());
    handler.create("default").unwrap();
    handler
        .update("default", |loot| loot.set_random(true))
        .unwrap();
    handler.save_to_path(&path).unwrap();

    let reloaded = LootHandler::default();
    assert_eq!(reloaded.load_from_path(&path).unwrap(), 2);
    assert_eq!(reloaded.names(), vec!["Gold Chest", "default"]);
    assert_eq!(reloaded.get("gold chest"), Some(gold_chest()));
    assert!(reloaded.default_loot().unwrap().use_random());
}

#[test]
fn test_missing_loot_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();

    let handler = LootHandler::default();
    handler.create("stale").unwrap();
    assert_eq!(handler.load_from_path(&dir.path().join("loots.json")).unwrap(), 0);
    assert!(handler.is_empty());
}

#[test]
fn test_loot_file_uses_configured_title() {
    let settings = LootSettings {
        chest_title: "&e%loot% chest".to_string(),
        ..LootSettings::default()
    };
    let handler = LootHandler::new(settings);
    handler.load_str(r#"[{"name": "Keep"}]"#).unwrap();

    assert_eq!(handler.get("keep").unwrap().title(), "§eKeep chest");
}
