//! Memory-layout offsets for the process reader.
//!
//! Offsets are written in hexadecimal in the settings file (`UnitHashTable =
//! "20AD5F0"`) because that is how they are published after each game patch.

use serde::{Serialize, Serializer};

use super::ConfigSection;
use crate::settings::{ConfigurationReadError, ConfigurationReader};

const OFFSET_BASE: u32 = 16;

/// Offsets into the game's memory, relative to the module base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OffsetConfig {
    #[serde(serialize_with = "as_hex")]
    pub unit_hash_table: i32,
    #[serde(serialize_with = "as_hex")]
    pub ui_settings: i32,
    #[serde(serialize_with = "as_hex")]
    pub expansion_check: i32,
}

impl ConfigSection for OffsetConfig {
    const NAME: &'static str = "offsets";

    fn read(reader: &ConfigurationReader<'_>) -> Result<Self, ConfigurationReadError> {
        Ok(Self {
            unit_hash_table: reader.read_i32_radix("UnitHashTable", OFFSET_BASE)?,
            ui_settings: reader.read_i32_radix("UiSettings", OFFSET_BASE)?,
            expansion_check: reader.read_i32_radix("ExpansionCheck", OFFSET_BASE)?,
        })
    }
}

fn as_hex<S: Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("0x{:X}", *value as u32))
}
