//! Area and NPC name tables.
//!
//! Settings refer to game areas and NPCs by their human-readable names
//! (`PrefetchAreas = "Rogue Encampment, Blood Moor"`).  The memory-reading
//! side of the application works with the game's numeric identifiers, so the
//! configuration resolves names to ids once, at load time.
//!
//! # Name matching
//!
//! Lookups ignore case and every non-alphanumeric character, so all of these
//! resolve to the same area:
//!
//! ```text
//! Rogue Encampment    RogueEncampment    rogue encampment    ROGUE_ENCAMPMENT
//! ```
//!
//! # Pluggable tables
//!
//! The tables are reached through the [`NameLookup`] trait.  [`StaticNames`]
//! carries the built-in tables; tests (or a future data-file loader) can
//! provide their own.

use std::fmt;

use serde::Serialize;

/// Numeric identifier of a game area (level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AreaId(pub u32);

/// Numeric identifier of an NPC / monster class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NpcId(pub u32);

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match area_name(*self) {
            Some(name) => f.write_str(name),
            None => write!(f, "Area({})", self.0),
        }
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match npc_name(*self) {
            Some(name) => f.write_str(name),
            None => write!(f, "Npc({})", self.0),
        }
    }
}

/// Resolves human-readable names to game identifiers.
#[cfg_attr(test, mockall::automock)]
pub trait NameLookup {
    fn area_by_name(&self, name: &str) -> Option<AreaId>;
    fn npc_by_name(&self, name: &str) -> Option<NpcId>;
}

/// The built-in area and NPC tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticNames;

impl NameLookup for StaticNames {
    fn area_by_name(&self, name: &str) -> Option<AreaId> {
        find_by_name(AREAS, name).map(AreaId)
    }

    fn npc_by_name(&self, name: &str) -> Option<NpcId> {
        find_by_name(NPCS, name).map(NpcId)
    }
}

/// Display name of a built-in area.
pub fn area_name(id: AreaId) -> Option<&'static str> {
    AREAS.iter().find(|(i, _)| *i == id.0).map(|(_, n)| *n)
}

/// Display name of a built-in NPC.
pub fn npc_name(id: NpcId) -> Option<&'static str> {
    NPCS.iter().find(|(i, _)| *i == id.0).map(|(_, n)| *n)
}

fn find_by_name(table: &[(u32, &str)], name: &str) -> Option<u32> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    table
        .iter()
        .find(|(_, known)| normalize(known) == wanted)
        .map(|(id, _)| *id)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

const AREAS: &[(u32, &str)] = &[
    // Act 1
    (1, "Rogue Encampment"),
    (2, "Blood Moor"),
    (3, "Cold Plains"),
    (4, "Stony Field"),
    (5, "Dark Wood"),
    (6, "Black Marsh"),
    (7, "Tamoe Highland"),
    (8, "Den of Evil"),
    (9, "Cave Level 1"),
    (10, "Underground Passage Level 1"),
    (11, "Hole Level 1"),
    (12, "Pit Level 1"),
    (13, "Cave Level 2"),
    (14, "Underground Passage Level 2"),
    (15, "Hole Level 2"),
    (16, "Pit Level 2"),
    (17, "Burial Grounds"),
    (18, "Crypt"),
    (19, "Mausoleum"),
    (20, "Forgotten Tower"),
    (21, "Tower Cellar Level 1"),
    (22, "Tower Cellar Level 2"),
    (23, "Tower Cellar Level 3"),
    (24, "Tower Cellar Level 4"),
    (25, "Tower Cellar Level 5"),
    (26, "Monastery Gate"),
    (27, "Outer Cloister"),
    (28, "Barracks"),
    (29, "Jail Level 1"),
    (30, "Jail Level 2"),
    (31, "Jail Level 3"),
    (32, "Inner Cloister"),
    (33, "Cathedral"),
    (34, "Catacombs Level 1"),
    (35, "Catacombs Level 2"),
    (36, "Catacombs Level 3"),
    (37, "Catacombs Level 4"),
    (38, "Tristram"),
    (39, "Moo Moo Farm"),
    // Act 2
    (40, "Lut Gholein"),
    (41, "Rocky Waste"),
    (42, "Dry Hills"),
    (43, "Far Oasis"),
    (44, "Lost City"),
    (45, "Valley of Snakes"),
    (46, "Canyon of the Magi"),
    (47, "Sewers Level 1 Act 2"),
    (48, "Sewers Level 2 Act 2"),
    (49, "Sewers Level 3 Act 2"),
    (50, "Harem Level 1"),
    (51, "Harem Level 2"),
    (52, "Palace Cellar Level 1"),
    (53, "Palace Cellar Level 2"),
    (54, "Palace Cellar Level 3"),
    (55, "Stony Tomb Level 1"),
    (56, "Halls of the Dead Level 1"),
    (57, "Halls of the Dead Level 2"),
    (58, "Claw Viper Temple Level 1"),
    (59, "Stony Tomb Level 2"),
    (60, "Halls of the Dead Level 3"),
    (61, "Claw Viper Temple Level 2"),
    (62, "Maggot Lair Level 1"),
    (63, "Maggot Lair Level 2"),
    (64, "Maggot Lair Level 3"),
    (65, "Ancient Tunnels"),
    (66, "Tal Rasha's Tomb 1"),
    (67, "Tal Rasha's Tomb 2"),
    (68, "Tal Rasha's Tomb 3"),
    (69, "Tal Rasha's Tomb 4"),
    (70, "Tal Rasha's Tomb 5"),
    (71, "Tal Rasha's Tomb 6"),
    (72, "Tal Rasha's Tomb 7"),
    (73, "Duriel's Lair"),
    (74, "Arcane Sanctuary"),
    // Act 3
    (75, "Kurast Docks"),
    (76, "Spider Forest"),
    (77, "Great Marsh"),
    (78, "Flayer Jungle"),
    (79, "Lower Kurast"),
    (80, "Kurast Bazaar"),
    (81, "Upper Kurast"),
    (82, "Kurast Causeway"),
    (83, "Travincal"),
    (84, "Arachnid Lair"),
    (85, "Spider Cavern"),
    (86, "Swampy Pit Level 1"),
    (87, "Swampy Pit Level 2"),
    (88, "Flayer Dungeon Level 1"),
    (89, "Flayer Dungeon Level 2"),
    (90, "Swampy Pit Level 3"),
    (91, "Flayer Dungeon Level 3"),
    (92, "Sewers Level 1 Act 3"),
    (93, "Sewers Level 2 Act 3"),
    (94, "Ruined Temple"),
    (95, "Disused Fane"),
    (96, "Forgotten Reliquary"),
    (97, "Forgotten Temple"),
    (98, "Ruined Fane"),
    (99, "Disused Reliquary"),
    (100, "Durance of Hate Level 1"),
    (101, "Durance of Hate Level 2"),
    (102, "Durance of Hate Level 3"),
    // Act 4
    (103, "The Pandemonium Fortress"),
    (104, "Outer Steppes"),
    (105, "Plains of Despair"),
    (106, "City of the Damned"),
    (107, "River of Flame"),
    (108, "Chaos Sanctuary"),
    // Act 5
    (109, "Harrogath"),
    (110, "Bloody Foothills"),
    (111, "Frigid Highlands"),
    (112, "Arreat Plateau"),
    (113, "Crystalline Passage"),
    (114, "Frozen River"),
    (115, "Glacial Trail"),
    (116, "Drifter Cavern"),
    (117, "Frozen Tundra"),
    (118, "The Ancients' Way"),
    (119, "Icy Cellar"),
    (120, "Arreat Summit"),
    (121, "Nihlathak's Temple"),
    (122, "Halls of Anguish"),
    (123, "Halls of Pain"),
    (124, "Halls of Vaught"),
    (125, "Abaddon"),
    (126, "Pit of Acheron"),
    (127, "Infernal Pit"),
    (128, "The Worldstone Keep Level 1"),
    (129, "The Worldstone Keep Level 2"),
    (130, "The Worldstone Keep Level 3"),
    (131, "Throne of Destruction"),
    (132, "The Worldstone Chamber"),
    // Uber levels
    (133, "Matron's Den"),
    (134, "Forgotten Sands"),
    (135, "Furnace of Pain"),
    (136, "Uber Tristram"),
];

const NPCS: &[(u32, &str)] = &[
    (156, "Andariel"),
    (211, "Duriel"),
    (229, "Radament"),
    (242, "Mephisto"),
    (243, "Diablo"),
    (250, "Summoner"),
    (256, "Izual"),
    (267, "Blood Raven"),
    (365, "Griswold"),
    (526, "Nihlathak"),
    (540, "Talic the Defender"),
    (541, "Madawc the Guardian"),
    (542, "Korlic the Protector"),
    (544, "Baal"),
    (704, "Uber Mephisto"),
    (705, "Uber Diablo"),
    (706, "Uber Izual"),
    (707, "Lilith"),
    (708, "Uber Duriel"),
    (709, "Uber Baal"),
];

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_lookup_ignores_case_spaces_and_punctuation() {
        let names = StaticNames;
        for spelling in [
            "Rogue Encampment",
            "RogueEncampment",
            "rogue encampment",
            "ROGUE_ENCAMPMENT",
        ] {
            assert_eq!(names.area_by_name(spelling), Some(AreaId(1)), "{spelling}");
        }
        assert_eq!(names.area_by_name("Tal Rashas Tomb 3"), Some(AreaId(68)));
        assert_eq!(names.area_by_name("TheAncientsWay"), Some(AreaId(118)));
    }

    #[test]
    fn test_area_lookup_unknown_returns_none() {
        assert_eq!(StaticNames.area_by_name("Narnia"), None);
        assert_eq!(StaticNames.area_by_name(""), None);
        assert_eq!(StaticNames.area_by_name("   "), None);
    }

    #[test]
    fn test_npc_lookup() {
        assert_eq!(StaticNames.npc_by_name("baal"), Some(NpcId(544)));
        assert_eq!(StaticNames.npc_by_name("Blood Raven"), Some(NpcId(267)));
        assert_eq!(StaticNames.npc_by_name("Deckard Cain"), None);
    }

    #[test]
    fn test_area_table_ids_are_unique_and_dense() {
        // Area ids 1..=136 each appear exactly once.
        let mut ids: Vec<u32> = AREAS.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=136).collect::<Vec<_>>());
    }

    #[test]
    fn test_normalized_area_names_do_not_collide() {
        let mut seen = std::collections::HashSet::new();
        for (_, name) in AREAS {
            assert!(seen.insert(normalize(name)), "duplicate normalized name {name}");
        }
    }

    #[test]
    fn test_display_uses_table_name_or_number() {
        assert_eq!(AreaId(40).to_string(), "Lut Gholein");
        assert_eq!(AreaId(9999).to_string(), "Area(9999)");
        assert_eq!(NpcId(243).to_string(), "Diablo");
    }
}
