//! Per-category point-of-interest rendering styles.
//!
//! Each category owns a group of keys sharing its name as prefix:
//!
//! ```text
//! WaypointIconColor      WaypointIconShape      WaypointIconSize
//! WaypointLineColor      WaypointLineThickness  WaypointArrowHeadSize
//! WaypointLabelColor     WaypointLabelFont      WaypointLabelFontSize
//! ```
//!
//! Colours may be left empty to switch that part of the marker off.

use serde::Serialize;

use super::ConfigSection;
use crate::domain::rendering::PointOfInterestRendering;
use crate::settings::{ConfigurationReadError, ConfigurationReader};

/// Category prefixes, in the order the sections are read.
pub const CATEGORIES: [&str; 6] = [
    "NextArea",
    "PreviousArea",
    "Waypoint",
    "Quest",
    "Player",
    "SuperChest",
];

/// Rendering style for every point-of-interest category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderingConfig {
    pub next_area: PointOfInterestRendering,
    pub previous_area: PointOfInterestRendering,
    pub waypoint: PointOfInterestRendering,
    pub quest: PointOfInterestRendering,
    pub player: PointOfInterestRendering,
    pub super_chest: PointOfInterestRendering,
}

impl ConfigSection for RenderingConfig {
    const NAME: &'static str = "rendering";

    fn read(reader: &ConfigurationReader<'_>) -> Result<Self, ConfigurationReadError> {
        let [next_area, previous_area, waypoint, quest, player, super_chest] = CATEGORIES;
        Ok(Self {
            next_area: read_for_prefix(reader, next_area)?,
            previous_area: read_for_prefix(reader, previous_area)?,
            waypoint: read_for_prefix(reader, waypoint)?,
            quest: read_for_prefix(reader, quest)?,
            player: read_for_prefix(reader, player)?,
            super_chest: read_for_prefix(reader, super_chest)?,
        })
    }
}

impl RenderingConfig {
    /// Iterates `(prefix, style)` pairs in [`CATEGORIES`] order.
    pub fn categories(&self) -> impl Iterator<Item = (&'static str, &PointOfInterestRendering)> {
        CATEGORIES.into_iter().zip([
            &self.next_area,
            &self.previous_area,
            &self.waypoint,
            &self.quest,
            &self.player,
            &self.super_chest,
        ])
    }
}

/// Reads the rendering style stored under `prefix`.
///
/// # Errors
///
/// Returns the first [`ConfigurationReadError`] for any of the nine keys.
pub fn read_for_prefix(
    reader: &ConfigurationReader<'_>,
    prefix: &str,
) -> Result<PointOfInterestRendering, ConfigurationReadError> {
    let key = |suffix: &str| format!("{prefix}{suffix}");
    Ok(PointOfInterestRendering {
        icon_color: reader.read_optional_color(&key("IconColor"))?,
        icon_shape: reader.parse_enum(&key("IconShape"))?,
        icon_size: reader.read_i32(&key("IconSize"))?,
        line_color: reader.read_optional_color(&key("LineColor"))?,
        line_thickness: reader.read_f32(&key("LineThickness"))?,
        arrow_head_size: reader.read_i32(&key("ArrowHeadSize"))?,
        label_color: reader.read_optional_color(&key("LabelColor"))?,
        label_font: reader.read_string(&key("LabelFont"))?,
        label_font_size: reader.read_i32(&key("LabelFontSize"))?,
    })
}
