//! Overlay map display options.

use serde::Serialize;

use super::ConfigSection;
use crate::domain::{
    color::Color,
    enums::{MapPosition, TextAlign},
    names::{AreaId, NpcId},
};
use crate::settings::{ConfigurationReadError, ConfigurationReader};

/// How and where the overlay map is shown, plus its key bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    /// Redraw interval in milliseconds (`UpdateTime`).
    pub update_time: i16,
    /// Rotate the map 45° to match the isometric game view (`Rotate`).
    pub rotate: bool,
    pub toggle_key: char,
    pub zoom_in_key: char,
    pub zoom_out_key: char,
    /// Initial zoom factor (`ZoomLevelDefault`).
    pub zoom_level: f32,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f64,
    /// Draw over the game's own automap instead of in a corner.
    pub overlay_mode: bool,
    pub always_on_top: bool,
    /// Show the overlay only while the in-game map is open.
    pub toggle_via_in_game_map: bool,
    /// Map size in pixels (`Size`).
    pub size: i16,
    pub position: MapPosition,
    /// Areas whose map data is fetched ahead of time.
    pub prefetch_areas: Vec<AreaId>,
    /// Areas for which no map is drawn.
    pub hidden_areas: Vec<AreaId>,
    /// NPCs that trigger an immunity warning label (`WarnNPCImmune`).
    pub warn_immune_npcs: Vec<NpcId>,
    pub warn_npc_font_size: i32,
    pub warn_npc_font: String,
    pub warn_npc_vertical_align: TextAlign,
    pub warn_npc_horizontal_align: TextAlign,
    pub warn_npc_font_color: Color,
    pub clear_prefetched_on_area_change: bool,
}

impl ConfigSection for MapConfig {
    const NAME: &'static str = "map";

    fn read(reader: &ConfigurationReader<'_>) -> Result<Self, ConfigurationReadError> {
        Ok(Self {
            update_time: reader.read_i16("UpdateTime")?,
            rotate: reader.read_bool("Rotate")?,
            toggle_key: reader.read_char("ToggleKey")?,
            zoom_in_key: reader.read_char("ZoomInKey")?,
            zoom_out_key: reader.read_char("ZoomOutKey")?,
            zoom_level: reader.read_f32("ZoomLevelDefault")?,
            opacity: reader.read_f64("Opacity")?,
            overlay_mode: reader.read_bool("OverlayMode")?,
            always_on_top: reader.read_bool("AlwaysOnTop")?,
            toggle_via_in_game_map: reader.read_bool("ToggleViaInGameMap")?,
            size: reader.read_i16("Size")?,
            position: reader.parse_enum("MapPosition")?,
            prefetch_areas: reader.read_areas("PrefetchAreas")?,
            hidden_areas: reader.read_areas("HiddenAreas")?,
            warn_immune_npcs: reader.read_npcs("WarnNPCImmune")?,
            warn_npc_font_size: reader.read_i32("WarnNPCFontSize")?,
            warn_npc_font: reader.read_string("WarnNPCFont")?,
            warn_npc_vertical_align: reader.parse_enum("WarnNPCVerticalAlign")?,
            warn_npc_horizontal_align: reader.parse_enum("WarnNPCHorizontalAlign")?,
            warn_npc_font_color: reader.read_color("WarnNPCFontColor")?,
            clear_prefetched_on_area_change: reader.read_bool("ClearPrefetchedOnAreaChange")?,
        })
    }
}

impl MapConfig {
    /// `true` if no map should be drawn in `area`.
    pub fn is_hidden(&self, area: AreaId) -> bool {
        self.hidden_areas.contains(&area)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;

    const MAP_SETTINGS: &[(&str, &str)] = &[
        ("UpdateTime", "70"),
        ("Rotate", "true"),
        ("ToggleKey", "\t"),
        ("ZoomInKey", "+"),
        ("ZoomOutKey", "-"),
        ("ZoomLevelDefault", "1"),
        ("Opacity", "0.5"),
        ("OverlayMode", "false"),
        ("AlwaysOnTop", "true"),
        ("ToggleViaInGameMap", "true"),
        ("Size", "450"),
        ("MapPosition", "topright"),
        ("PrefetchAreas", "Rogue Encampment, Blood Moor,Cold Plains"),
        ("HiddenAreas", ""),
        ("WarnNPCImmune", "Baal"),
        ("WarnNPCFontSize", "14"),
        ("WarnNPCFont", "Consolas"),
        ("WarnNPCVerticalAlign", "near"),
        ("WarnNPCHorizontalAlign", "Center"),
        ("WarnNPCFontColor", "Red"),
        ("ClearPrefetchedOnAreaChange", "false"),
    ];

    fn store_without(key: &str) -> MemorySettings {
        MAP_SETTINGS.iter().copied().filter(|(k, _)| *k != key).collect()
    }

    #[test]
    fn test_reads_every_field() {
        // Arrange
        let store: MemorySettings = MAP_SETTINGS.iter().copied().collect();

        // Act
        let map = MapConfig::read(&ConfigurationReader::new(&store)).unwrap();

        // Assert
        assert_eq!(map.update_time, 70);
        assert!(map.rotate);
        assert_eq!(map.toggle_key, '\t');
        assert_eq!(map.zoom_in_key, '+');
        assert_eq!(map.zoom_out_key, '-');
        assert_eq!(map.zoom_level, 1.0);
        assert_eq!(map.opacity, 0.5);
        assert!(!map.overlay_mode);
        assert!(map.always_on_top);
        assert!(map.toggle_via_in_game_map);
        assert_eq!(map.size, 450);
        assert_eq!(map.position, MapPosition::TopRight);
        assert_eq!(map.prefetch_areas, vec![AreaId(1), AreaId(2), AreaId(3)]);
        assert!(map.hidden_areas.is_empty());
        assert_eq!(map.warn_immune_npcs, vec![NpcId(544)]);
        assert_eq!(map.warn_npc_font_size, 14);
        assert_eq!(map.warn_npc_font, "Consolas");
        assert_eq!(map.warn_npc_vertical_align, TextAlign::Near);
        assert_eq!(map.warn_npc_horizontal_align, TextAlign::Center);
        assert_eq!(map.warn_npc_font_color, Color::from_rgb(255, 0, 0));
        assert!(!map.clear_prefetched_on_area_change);
    }

    #[test]
    fn test_every_key_is_required() {
        for (key, _) in MAP_SETTINGS {
            // Arrange
            let store = store_without(key);

            // Act
            let err = MapConfig::read(&ConfigurationReader::new(&store)).unwrap_err();

            // Assert
            assert_eq!(err.parameter, *key, "removing {key} must fail on {key}");
        }
    }

    #[test]
    fn test_is_hidden() {
        let mut store: MemorySettings = MAP_SETTINGS.iter().copied().collect();
        store.insert("HiddenAreas", "Tristram");
        let map = MapConfig::read(&ConfigurationReader::new(&store)).unwrap();
        assert!(map.is_hidden(AreaId(38)));
        assert!(!map.is_hidden(AreaId(1)));
    }
}
