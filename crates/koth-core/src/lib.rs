//! koth-core: Shared types, traits, and configuration for the KoTH capture core
//!
//! This crate provides the foundational types used by the capture registry and
//! the loot engine: players and groups, the `CapperKind` data model, the
//! collaborator traits the host server implements, and the plugin config.
//!
//! ## Architecture
//!
//! ```text
//! host server ──implements──> ConsoleSender / PluginProbe / GamemodeRegistry
//!                              PlayerDirectory / GroupDirectory / CaptureEvent
//!                                          │
//!            koth-capture (registry) ──────┼────── koth-loot (rewards)
//!                                          │
//!                                     CapperKind
//! ```

mod capper;
mod config;
mod error;
mod host;
mod message;
mod player;

pub use capper::*;
pub use config::*;
pub use error::*;
pub use host::*;
pub use message::*;
pub use player::*;
