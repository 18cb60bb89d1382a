//! Storage infrastructure: the settings file on disk.
//!
//! The `settings_file` sub-module turns a TOML file into the flat
//! [`MemorySettings`](mapassist_core::MemorySettings) table the configuration
//! reader works on.  Nothing outside this module knows the file format.

pub mod settings_file;

pub use settings_file::{
    load_settings, parse_settings, settings_file_path, SettingsFile, SettingsFileError,
    SettingsSource,
};
