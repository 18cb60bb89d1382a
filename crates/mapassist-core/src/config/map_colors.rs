//! Map tile colours keyed by the game's tile type code.
//!
//! The settings file carries one optional colour per type code:
//!
//! ```toml
//! "MapColor[-1]" = ""
//! "MapColor[0]"  = "70, 51, 41"
//! "MapColor[1]"  = ""
//! ```
//!
//! Most codes are unset.  Rather than hitting the store for every tile on every
//! frame, the [`MapColorCache`] resolves each code at most once and remembers
//! the result, including "no colour".
//!
//! # Lifecycle (for beginners)
//!
//! ```text
//! MapColorConfig::read ──► warm(-1..=599) ──► ready: lookup() is a pure cache read
//! ```
//!
//! Warming happens while the configuration is being built, the only time the
//! cache is mutated.  After that the whole configuration is immutable and
//! `lookup` takes `&self`.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use serde::{Serialize, Serializer};
use tracing::debug;

use super::ConfigSection;
use crate::domain::color::Color;
use crate::settings::{ConfigurationReadError, ConfigurationReader};

/// Tile type codes the configuration warms at startup.
pub const MAP_COLOR_CODES: RangeInclusive<i32> = -1..=599;

/// Lazily filled cache of `type code → optional colour`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapColorCache {
    entries: HashMap<i32, Option<Color>>,
}

impl MapColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings key for a type code, e.g. `MapColor[12]`.
    pub fn key(code: i32) -> String {
        format!("MapColor[{code}]")
    }

    /// Returns the colour for `code`, reading the store only on a cache miss.
    ///
    /// A missing or empty setting caches `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationReadError`] if the setting holds something that
    /// is not a colour.  Nothing is cached in that case.
    pub fn get_or_compute(
        &mut self,
        code: i32,
        reader: &ConfigurationReader<'_>,
    ) -> Result<Option<Color>, ConfigurationReadError> {
        if let Some(cached) = self.entries.get(&code) {
            return Ok(*cached);
        }
        let color = reader.read_optional_color(&Self::key(code))?;
        self.entries.insert(code, color);
        Ok(color)
    }

    /// Resolves every code in `range` once.
    ///
    /// # Errors
    ///
    /// Stops at the first malformed colour.
    pub fn warm(
        &mut self,
        range: RangeInclusive<i32>,
        reader: &ConfigurationReader<'_>,
    ) -> Result<(), ConfigurationReadError> {
        for code in range {
            self.get_or_compute(code, reader)?;
        }
        Ok(())
    }

    /// Cached entry for `code`: `None` on a miss, `Some(None)` for a code
    /// known to have no colour.
    pub fn get(&self, code: i32) -> Option<Option<Color>> {
        self.entries.get(&code).copied()
    }

    pub fn is_cached(&self, code: i32) -> bool {
        self.entries.contains_key(&code)
    }

    /// Number of cached codes (with or without a colour).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Codes that have a colour, sorted, with their colour.
    pub fn colored(&self) -> Vec<(i32, Color)> {
        let mut out: Vec<(i32, Color)> = self
            .entries
            .iter()
            .filter_map(|(code, color)| color.map(|c| (*code, c)))
            .collect();
        out.sort_unstable_by_key(|(code, _)| *code);
        out
    }
}

impl Serialize for MapColorCache {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // TOML tables need string keys.
        serializer.collect_map(
            self.colored()
                .into_iter()
                .map(|(code, color)| (code.to_string(), color)),
        )
    }
}

/// The map-colour section: a [`MapColorCache`] warmed over [`MAP_COLOR_CODES`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MapColorConfig {
    cache: MapColorCache,
}

impl ConfigSection for MapColorConfig {
    const NAME: &'static str = "map_colors";

    fn read(reader: &ConfigurationReader<'_>) -> Result<Self, ConfigurationReadError> {
        let mut config = Self::default();
        config.warm(MAP_COLOR_CODES, reader)?;
        debug!(
            codes = config.cache.len(),
            colored = config.cache.colored().len(),
            "map colours warmed"
        );
        Ok(config)
    }
}

impl MapColorConfig {
    /// Colour for a tile type code, from the cache.
    ///
    /// Codes outside the warmed range are never cached and read as `None`;
    /// use [`get_or_compute`](Self::get_or_compute) to resolve them.
    pub fn lookup(&self, code: i32) -> Option<Color> {
        self.cache.get(code).flatten()
    }

    /// See [`MapColorCache::get_or_compute`].
    pub fn get_or_compute(
        &mut self,
        code: i32,
        reader: &ConfigurationReader<'_>,
    ) -> Result<Option<Color>, ConfigurationReadError> {
        self.cache.get_or_compute(code, reader)
    }

    /// See [`MapColorCache::warm`].
    pub fn warm(
        &mut self,
        range: RangeInclusive<i32>,
        reader: &ConfigurationReader<'_>,
    ) -> Result<(), ConfigurationReadError> {
        self.cache.warm(range, reader)
    }

    pub fn cache(&self) -> &MapColorCache {
        &self.cache
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
