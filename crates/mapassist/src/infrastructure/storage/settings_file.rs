//! TOML settings file loading.
//!
//! Reads the flat settings table from the platform-appropriate file:
//! - Windows:  `%APPDATA%\MapAssist\settings.toml`
//! - Linux:    `~/.config/mapassist/settings.toml`
//! - macOS:    `~/Library/Application Support/MapAssist/settings.toml`
//!
//! # File layout (for beginners)
//!
//! The configuration reader expects a flat `key → string` table, so the file
//! is a flat list of top-level entries.  Scalars of any TOML type are turned
//! into their text form before the reader sees them:
//!
//! ```toml
//! Opacity = 0.5             # → "0.5"
//! Rotate = true             # → "true"
//! MapPosition = "TopRight"
//! PrefetchAreas = ["Rogue Encampment", "Lut Gholein"]   # → "Rogue Encampment, Lut Gholein"
//! "MapColor[0]" = "70, 51, 41"                           # brackets need quotes
//! ```
//!
//! The same entries may instead live under a single `[settings]` table.
//! Any other nested table is rejected, as are dates and nested arrays: the
//! reader has no way to interpret them.
//!
//! There are no defaults.  A missing file is an error, same as a missing key.

use std::path::{Path, PathBuf};

use mapassist_core::{MemorySettings, SettingsStore};
use thiserror::Error;
use toml_edit::{DocumentMut, Item, Value};
use tracing::{debug, info};

/// Optional table whose entries are treated as top-level settings.
const SETTINGS_TABLE: &str = "settings";

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsFileError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml_edit::TomlError),

    /// The entry holds a TOML value with no flat string form.
    #[error("setting \"{key}\" holds a {found}, which is not a supported value")]
    UnsupportedValue { key: String, found: &'static str },

    /// The same key appears at top level and inside `[settings]`.
    #[error("setting \"{key}\" is defined more than once")]
    DuplicateKey { key: String },
}

/// Something the startup code can load a settings table from.
pub trait SettingsSource {
    /// Produces the flat settings table.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsFileError`] when the underlying source cannot be
    /// read or holds values with no string form.
    fn load(&self) -> Result<MemorySettings, SettingsFileError>;

    /// Human-readable description for log output.
    fn describe(&self) -> String;
}

/// A settings file at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The settings file at [`settings_file_path`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsFileError::NoPlatformConfigDir`] if the base
    /// directory cannot be determined.
    pub fn platform_default() -> Result<Self, SettingsFileError> {
        settings_file_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsSource for SettingsFile {
    fn load(&self) -> Result<MemorySettings, SettingsFileError> {
        load_settings(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

impl SettingsSource for MemorySettings {
    fn load(&self) -> Result<MemorySettings, SettingsFileError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory settings ({} entries)", self.len())
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Resolves the full path to the settings file.
///
/// # Errors
///
/// Returns [`SettingsFileError::NoPlatformConfigDir`] if the base directory
/// cannot be determined.
pub fn settings_file_path() -> Result<PathBuf, SettingsFileError> {
    platform_config_dir()
        .map(|dir| dir.join("settings.toml"))
        .ok_or(SettingsFileError::NoPlatformConfigDir)
}

/// Reads and flattens the settings file at `path`.
///
/// # Errors
///
/// Returns [`SettingsFileError::Io`] if the file cannot be read (including
/// when it does not exist), [`SettingsFileError::Parse`] for malformed TOML,
/// and [`SettingsFileError::UnsupportedValue`] /
/// [`SettingsFileError::DuplicateKey`] for entries with no flat form.
pub fn load_settings(path: &Path) -> Result<MemorySettings, SettingsFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&content)?;
    info!(path = %path.display(), entries = settings.len(), "settings file loaded");
    Ok(settings)
}

/// Flattens TOML text into a settings table.
///
/// Integers keep the text they were written with (minus `_` separators), so
/// `UnitHashTable = 0x20AF660` reaches the reader as `"0x20AF660"` rather
/// than as its decimal value.
///
/// # Errors
///
/// See [`load_settings`].
pub fn parse_settings(content: &str) -> Result<MemorySettings, SettingsFileError> {
    let document: DocumentMut = content.parse()?;
    let mut settings = MemorySettings::new();

    for (key, item) in document.iter() {
        match item.as_table_like() {
            Some(inner) if key == SETTINGS_TABLE => {
                debug!(entries = inner.len(), "flattening [settings] table");
                for (key, item) in inner.iter() {
                    insert_unique(&mut settings, key, item)?;
                }
            }
            _ => insert_unique(&mut settings, key, item)?,
        }
    }
    Ok(settings)
}

fn insert_unique(
    settings: &mut MemorySettings,
    key: &str,
    item: &Item,
) -> Result<(), SettingsFileError> {
    let text = flatten_item(key, item)?;
    if settings.get(key).is_some() {
        return Err(SettingsFileError::DuplicateKey {
            key: key.to_string(),
        });
    }
    settings.insert(key, text);
    Ok(())
}

fn flatten_item(key: &str, item: &Item) -> Result<String, SettingsFileError> {
    match item {
        Item::Value(value) => flatten(key, value),
        Item::Table(_) => Err(unsupported(key, "table")),
        Item::ArrayOfTables(_) => Err(unsupported(key, "array of tables")),
        Item::None => Err(unsupported(key, "empty item")),
    }
}

/// Text form of one TOML value as the configuration reader expects it.
fn flatten(key: &str, value: &Value) -> Result<String, SettingsFileError> {
    match value {
        Value::String(s) => Ok(s.value().clone()),
        Value::Integer(i) => Ok(i.display_repr().replace('_', "")),
        Value::Float(f) => Ok(f.value().to_string()),
        Value::Boolean(b) => Ok(b.value().to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) | Value::InlineTable(_) => {
                    Err(unsupported(key, "nested array or table"))
                }
                scalar => flatten(key, scalar),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|parts| parts.join(", ")),
        Value::InlineTable(_) => Err(unsupported(key, "table")),
        Value::Datetime(_) => Err(unsupported(key, "datetime")),
    }
}

fn unsupported(key: &str, found: &'static str) -> SettingsFileError {
    SettingsFileError::UnsupportedValue {
        key: key.to_string(),
        found,
    }
}

/// Resolves the platform config directory including the `MapAssist` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("MapAssist"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("mapassist"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("MapAssist")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
