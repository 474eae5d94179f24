//! # koth-loot: Loot chests and capture rewards
//!
//! A loot is a named bundle of chest contents and console commands handed to
//! whoever captures an area.
//!
//! ## Features
//!
//! - **Loot chests**: 54-slot inventories with a templated chest title
//! - **Reward commands**: `%player%` / `%faction%` expansion per eligible player
//! - **Random subsets**: draw a configured number of commands instead of all
//! - **Persistence**: JSON documents with per-entry failure tolerance
//!
//! ## Architecture
//!
//! ```text
//! LootHandler (named loots, loot file)
//!     │
//!     └── Loot
//!           ├── LootInventory (54 × Option<ItemStack>)
//!           ├── commands
//!           └── use_random
//!                 │
//!                 v
//!     RewardDispatcher ──> ConsoleSender
//! ```

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod inventory;
pub mod item;
pub mod loot;

pub use dispatch::*;
pub use error::*;
pub use handler::*;
pub use inventory::*;
pub use item::*;
pub use loot::*;
