//! Typed configuration sections and their root.
//!
//! Each section is a plain struct with a fixed set of typed fields, filled in
//! by a single [`ConfigSection::read`] call.  There is no "half-read"
//! section: `read` either returns a fully populated value or the first
//! [`ConfigurationReadError`] it hit.  The same holds one level up for
//! [`MapAssistConfig`], which is built from all sections with `?`, so a failure
//! anywhere means no root configuration exists at all.
//!
//! # Sections
//!
//! | Section             | Keys                                           |
//! |---------------------|------------------------------------------------|
//! | [`ApiConfig`]       | `ApiEndpoint`, `ApiToken`                      |
//! | [`MapConfig`]       | `Opacity`, `Size`, `MapPosition`, key bindings, area lists, NPC warning style, … |
//! | [`RenderingConfig`] | `<Category>IconColor`, `<Category>LineThickness`, … |
//! | [`OffsetConfig`]    | `UnitHashTable`, `UiSettings`, `ExpansionCheck` (hex) |
//! | [`MapColorConfig`]  | `MapColor[-1]` … `MapColor[599]`               |

use serde::Serialize;
use tracing::debug;

use crate::settings::{ConfigurationReadError, ConfigurationReader, SettingsStore};

pub mod api;
pub mod map;
pub mod map_colors;
pub mod offsets;
pub mod rendering;

pub use api::ApiConfig;
pub use map::MapConfig;
pub use map_colors::{MapColorCache, MapColorConfig, MAP_COLOR_CODES};
pub use offsets::OffsetConfig;
pub use rendering::RenderingConfig;

/// A configuration section populated once from settings.
pub trait ConfigSection: Sized {
    /// Section name used in log output.
    const NAME: &'static str;

    /// Reads every field of the section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationReadError`] encountered; no partially
    /// populated section is ever returned.
    fn read(reader: &ConfigurationReader<'_>) -> Result<Self, ConfigurationReadError>;
}

/// The complete MapAssist configuration.
///
/// Read once at startup and then only shared by immutable reference.
#[derive(Debug, Clone, Serialize)]
pub struct MapAssistConfig {
    pub api: ApiConfig,
    pub map_colors: MapColorConfig,
    pub map: MapConfig,
    pub rendering: RenderingConfig,
    pub offsets: OffsetConfig,
}

impl MapAssistConfig {
    /// Builds the configuration from `store`, resolving names with the
    /// built-in tables.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationReadError`] from any section.
    pub fn from_settings(store: &dyn SettingsStore) -> Result<Self, ConfigurationReadError> {
        Self::from_reader(&ConfigurationReader::new(store))
    }

    /// Builds the configuration through an existing reader.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationReadError`] from any section.
    pub fn from_reader(reader: &ConfigurationReader<'_>) -> Result<Self, ConfigurationReadError> {
        let config = Self {
            api: read_section(reader)?,
            map_colors: read_section(reader)?,
            map: read_section(reader)?,
            rendering: read_section(reader)?,
            offsets: read_section(reader)?,
        };
        debug!("all configuration sections read");
        Ok(config)
    }
}

fn read_section<S: ConfigSection>(
    reader: &ConfigurationReader<'_>,
) -> Result<S, ConfigurationReadError> {
    debug!(section = S::NAME, "reading configuration section");
    S::read(reader).map_err(|e| {
        debug!(section = S::NAME, parameter = %e.parameter, "configuration section failed");
        e
    })
}
