//! # koth-capture: Capture type registry
//!
//! Lets integrations register the kinds of participants that can capture an
//! area (a single player, a faction, a team) and resolves cappers back from
//! persisted keys or from the players standing in the area.
//!
//! ## Architecture
//!
//! ```text
//! CaptureTypeRegistry
//!     │
//!     ├── capture types   "player" ──> PlayerCaptureType
//!     │                   "factionuuid" ──> FactionCaptureType
//!     │                   "<custom>" ──> FnCaptureType / your impl
//!     │
//!     ├── capture classes "capperclass" (Any), "groupclass" (Group),
//!     │                   one Type(id) entry per capture type
//!     │
//!     └── preferred type (fixed in on_enable)
//!           │
//!           v
//!     resolve_by_identifier / resolve_from_players → Option<CapperKind>
//! ```
//!
//! ## Lifecycle
//!
//! 1. `on_load()`: clear, register built-ins and hook-conditional types
//! 2. other plugins call `register()` / `register_capability()`
//! 3. `on_enable()`: prefer the configured default capture type

mod builtins;
mod error;
mod registry;
mod types;

pub use builtins::*;
pub use error::*;
pub use registry::*;
pub use types::*;
