//! # mapassist-core
//!
//! Configuration layer for the MapAssist overlay: a flat key/value settings
//! store, a typed reader on top of it, and the nested configuration model
//! assembled from those typed reads.
//!
//! This crate has zero dependencies on OS APIs, UI frameworks, or the file
//! system.  Where the settings come from (a TOML file, a test fixture) is the
//! caller's business; everything here only sees the [`SettingsStore`] trait.
//!
//! # Architecture overview (for beginners)
//!
//! Data flows strictly one way and exactly once, at startup:
//!
//! ```text
//! SettingsStore (key → string)
//!       │  ConfigurationReader::read_*   (typed conversion)
//!       ▼
//! ApiConfig / MapConfig / RenderingConfig / OffsetConfig / MapColorConfig
//!       │  MapAssistConfig::from_settings (all-or-nothing)
//!       ▼
//! MapAssistConfig  (immutable, shared by reference)
//! ```
//!
//! - **`settings`** – The store abstraction, the typed reader, and the single
//!   [`ConfigurationReadError`] every conversion failure funnels into.
//!
//! - **`domain`** – Value types the configuration is made of: colours, the
//!   configuration enums, point-of-interest rendering records, and the
//!   area / NPC name tables.
//!
//! - **`config`** – The typed configuration sections and their root.

pub mod config;
pub mod domain;
pub mod settings;

// Re-export the most-used types at the crate root so callers can write
// `mapassist_core::MapAssistConfig` instead of the full module path.
pub use config::{
    ApiConfig, MapAssistConfig, MapColorCache, MapColorConfig, MapConfig, OffsetConfig,
    RenderingConfig,
};
pub use domain::{
    color::Color,
    enums::{ConfigEnum, IconShape, MapPosition, TextAlign},
    names::{AreaId, NameLookup, NpcId, StaticNames},
    rendering::PointOfInterestRendering,
};
pub use settings::{ConfigurationReadError, ConfigurationReader, MemorySettings, SettingsStore};
