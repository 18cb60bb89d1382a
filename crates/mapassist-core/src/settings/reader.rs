//! Typed reads on top of a [`SettingsStore`].
//!
//! Every `read_*` method fetches exactly one key and converts it.  Any problem
//! (the key is absent, the value is empty, the text does not convert) comes
//! back as a [`ConfigurationReadError`] naming the key and the type that was
//! expected, so the caller can simply `?` its way through a section.
//!
//! # Conversion rules
//!
//! | Method                 | Accepts                                             |
//! |------------------------|-----------------------------------------------------|
//! | `read_string`          | any present value, including `""`                   |
//! | `read_bool`            | `true` / `false`, any case                          |
//! | `read_i16`, `read_i32` | decimal with optional sign                          |
//! | `read_i32_radix`       | base 2, 8, 10 or 16; `0x` prefix allowed in base 16 |
//! | `read_char`            | exactly one character, not trimmed                  |
//! | `read_f32`, `read_f64` | `.` as decimal separator regardless of locale       |
//! | `parse_enum`           | member name, any case                               |
//!
//! Surrounding whitespace is ignored everywhere except `read_string` and
//! `read_char`, where it is part of the value.

use tracing::{debug, trace};

use super::{error::ConfigurationReadError, store::SettingsStore};
use crate::domain::{
    color::Color,
    enums::ConfigEnum,
    names::{AreaId, NameLookup, NpcId, StaticNames},
};

/// Converts settings values to typed values.
///
/// Borrowing the store (rather than owning it) keeps the reader a cheap,
/// short-lived view: build one, read a configuration tree with it, drop it.
#[derive(Clone, Copy)]
pub struct ConfigurationReader<'a> {
    store: &'a dyn SettingsStore,
    names: &'a dyn NameLookup,
}

impl<'a> ConfigurationReader<'a> {
    /// Creates a reader that resolves area / NPC names with [`StaticNames`].
    pub fn new(store: &'a dyn SettingsStore) -> Self {
        Self {
            store,
            names: &StaticNames,
        }
    }

    /// Creates a reader with custom name tables.
    pub fn with_names(store: &'a dyn SettingsStore, names: &'a dyn NameLookup) -> Self {
        Self { store, names }
    }

    // ── Strings ───────────────────────────────────────────────────────────────

    /// Reads a value verbatim.  Only a missing key is an error.
    pub fn read_string(&self, key: &str) -> Result<String, ConfigurationReadError> {
        // Empty is a value here, not a failure: `ApiToken`, colour strings
        // and area lists are all allowed to be blank.
        self.raw(key, "string")
    }

    /// Reads a value that may legitimately be absent.  Missing and empty both
    /// yield `None`.
    pub fn read_optional_string(&self, key: &str) -> Option<String> {
        trace!(parameter = key, "reading optional setting");
        self.store.get(key).filter(|v| !v.trim().is_empty())
    }

    // ── Primitives ────────────────────────────────────────────────────────────

    pub fn read_bool(&self, key: &str) -> Result<bool, ConfigurationReadError> {
        const TYPE: &str = "bool";
        let text = self.non_empty(key, TYPE)?;
        if text.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if text.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConfigurationReadError::new(key, TYPE))
        }
    }

    pub fn read_i16(&self, key: &str) -> Result<i16, ConfigurationReadError> {
        const TYPE: &str = "i16";
        self.non_empty(key, TYPE)?
            .parse()
            .map_err(|_| ConfigurationReadError::new(key, TYPE))
    }

    pub fn read_i32(&self, key: &str) -> Result<i32, ConfigurationReadError> {
        self.read_i32_radix(key, 10)
    }

    /// Reads a 32-bit integer in `base` (2, 8, 10 or 16).
    ///
    /// Non-decimal bases describe a bit pattern, not a signed quantity: signs
    /// are rejected and `FFFFFFFF` in base 16 reads as `-1`.
    pub fn read_i32_radix(&self, key: &str, base: u32) -> Result<i32, ConfigurationReadError> {
        const TYPE: &str = "i32";
        let text = self.non_empty(key, TYPE)?;
        let invalid = || ConfigurationReadError::new(key, TYPE);

        match base {
            10 => text.parse::<i32>().map_err(|_| invalid()),
            2 | 8 | 16 => {
                let digits = if base == 16 {
                    text.strip_prefix("0x")
                        .or_else(|| text.strip_prefix("0X"))
                        .unwrap_or(text.as_str())
                } else {
                    text.as_str()
                };
                if digits.starts_with(['+', '-']) {
                    return Err(invalid());
                }
                u32::from_str_radix(digits, base)
                    .map(|bits| bits as i32)
                    .map_err(|_| invalid().with_hint(format!("Expected a base-{base} number.")))
            }
            _ => Err(invalid().with_hint(format!(
                "Base {base} is not supported; use 2, 8, 10 or 16."
            ))),
        }
    }

    /// Reads a single character, e.g. a key binding.
    pub fn read_char(&self, key: &str) -> Result<char, ConfigurationReadError> {
        const TYPE: &str = "char";
        let raw = self.raw(key, TYPE)?;
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConfigurationReadError::new(key, TYPE)
                .with_hint("Expected exactly one character.")),
        }
    }

    pub fn read_f32(&self, key: &str) -> Result<f32, ConfigurationReadError> {
        const TYPE: &str = "f32";
        self.non_empty(key, TYPE)?
            .parse()
            .map_err(|_| ConfigurationReadError::new(key, TYPE))
    }

    pub fn read_f64(&self, key: &str) -> Result<f64, ConfigurationReadError> {
        const TYPE: &str = "f64";
        self.non_empty(key, TYPE)?
            .parse()
            .map_err(|_| ConfigurationReadError::new(key, TYPE))
    }

    /// Parses an enum member by name, ignoring case.
    ///
    /// The error lists every valid member so the user can fix the value
    /// without looking anything up.
    pub fn parse_enum<T: ConfigEnum>(&self, key: &str) -> Result<T, ConfigurationReadError> {
        let invalid =
            || ConfigurationReadError::new(key, T::TYPE_NAME).with_valid_values(T::variant_names());
        let text = self.non_empty(key, T::TYPE_NAME).map_err(|_| invalid())?;
        T::from_name(&text).ok_or_else(invalid)
    }

    // ── Composite values ──────────────────────────────────────────────────────

    pub fn read_color(&self, key: &str) -> Result<Color, ConfigurationReadError> {
        let text = self.non_empty(key, "Color")?;
        parse_color(key, &text)
    }

    /// Like [`read_color`](Self::read_color), but missing or empty means "no
    /// colour".  A present value must still be a valid colour.
    pub fn read_optional_color(&self, key: &str) -> Result<Option<Color>, ConfigurationReadError> {
        match self.read_optional_string(key) {
            Some(text) => parse_color(key, &text).map(Some),
            None => Ok(None),
        }
    }

    /// Reads a comma-separated list of area names and resolves each one.
    pub fn read_areas(&self, key: &str) -> Result<Vec<AreaId>, ConfigurationReadError> {
        const TYPE: &str = "Area list";
        let value = self.raw(key, TYPE)?;
        split_names(&value)
            .map(|name| {
                self.names.area_by_name(name).ok_or_else(|| {
                    ConfigurationReadError::new(key, TYPE)
                        .with_hint(format!("Unknown area \"{name}\"."))
                })
            })
            .collect()
    }

    /// Reads a comma-separated list of NPC names and resolves each one.
    pub fn read_npcs(&self, key: &str) -> Result<Vec<NpcId>, ConfigurationReadError> {
        const TYPE: &str = "NPC list";
        let value = self.raw(key, TYPE)?;
        split_names(&value)
            .map(|name| {
                self.names.npc_by_name(name).ok_or_else(|| {
                    ConfigurationReadError::new(key, TYPE)
                        .with_hint(format!("Unknown NPC \"{name}\"."))
                })
            })
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn raw(&self, key: &str, expected: &'static str) -> Result<String, ConfigurationReadError> {
        trace!(parameter = key, "reading setting");
        self.store.get(key).ok_or_else(|| {
            debug!(parameter = key, "setting is missing");
            ConfigurationReadError::new(key, expected)
        })
    }

    /// Present, trimmed, non-empty value.
    fn non_empty(
        &self,
        key: &str,
        expected: &'static str,
    ) -> Result<String, ConfigurationReadError> {
        let raw = self.raw(key, expected)?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            debug!(parameter = key, "setting is empty");
            return Err(ConfigurationReadError::new(key, expected));
        }
        Ok(trimmed.to_string())
    }
}

/// Splits a comma-separated name list, trimming each entry and dropping
/// empty ones.  Order is preserved.
pub fn split_names(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_color(key: &str, text: &str) -> Result<Color, ConfigurationReadError> {
    text.parse().map_err(|_| {
        ConfigurationReadError::new(key, "Color")
            .with_hint("Use #RRGGBB, #AARRGGBB, r,g,b, a,r,g,b or a colour name.")
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::MapPosition;
    use crate::domain::names::MockNameLookup;
    use crate::settings::store::MemorySettings;

    fn store(pairs: &[(&str, &str)]) -> MemorySettings {
        pairs.iter().copied().collect()
    }

    // ── Strings ───────────────────────────────────────────────────────────────

    #[test]
    fn test_read_string_returns_value_verbatim() {
        let s = store(&[("WarnNPCFont", " Arial ")]);
        let reader = ConfigurationReader::new(&s);
        assert_eq!(reader.read_string("WarnNPCFont").unwrap(), " Arial ");
    }

    #[test]
    fn test_read_string_accepts_empty_value() {
        let s = store(&[("ApiToken", "")]);
        assert_eq!(ConfigurationReader::new(&s).read_string("ApiToken").unwrap(), "");
    }

    #[test]
    fn test_read_string_missing_key_fails_with_key_and_type() {
        // Arrange
        let s = store(&[]);

        // Act
        let err = ConfigurationReader::new(&s).read_string("ApiEndpoint").unwrap_err();

        // Assert
        assert_eq!(err.parameter, "ApiEndpoint");
        assert_eq!(err.expected_type, "string");
    }

    #[test]
    fn test_read_optional_string_treats_empty_as_none() {
        let s = store(&[("A", ""), ("B", "  "), ("C", "x")]);
        let reader = ConfigurationReader::new(&s);
        assert_eq!(reader.read_optional_string("A"), None);
        assert_eq!(reader.read_optional_string("B"), None);
        assert_eq!(reader.read_optional_string("C").as_deref(), Some("x"));
        assert_eq!(reader.read_optional_string("D"), None);
    }

    // ── Booleans ──────────────────────────────────────────────────────────────

    #[test]
    fn test_read_bool_is_case_insensitive_and_trimmed() {
        let s = store(&[("Rotate", "true"), ("OverlayMode", " FALSE "), ("AlwaysOnTop", "True")]);
        let reader = ConfigurationReader::new(&s);
        assert!(reader.read_bool("Rotate").unwrap());
        assert!(!reader.read_bool("OverlayMode").unwrap());
        assert!(reader.read_bool("AlwaysOnTop").unwrap());
    }

    #[test]
    fn test_read_bool_rejects_other_spellings() {
        let s = store(&[("Rotate", "yes"), ("OverlayMode", "1"), ("AlwaysOnTop", "")]);
        let reader = ConfigurationReader::new(&s);
        for key in ["Rotate", "OverlayMode", "AlwaysOnTop", "Missing"] {
            let err = reader.read_bool(key).unwrap_err();
            assert_eq!(err.parameter, key);
            assert_eq!(err.expected_type, "bool");
        }
    }

    // ── Integers ──────────────────────────────────────────────────────────────

    #[test]
    fn test_read_i16_accepts_signed_decimal() {
        let s = store(&[("Size", "450"), ("Neg", "-12"), ("Pos", "+7")]);
        let reader = ConfigurationReader::new(&s);
        assert_eq!(reader.read_i16("Size").unwrap(), 450);
        assert_eq!(reader.read_i16("Neg").unwrap(), -12);
        assert_eq!(reader.read_i16("Pos").unwrap(), 7);
    }

    #[test]
    fn test_read_i16_rejects_overflow() {
        let s = store(&[("UpdateTime", "40000")]);
        let err = ConfigurationReader::new(&s).read_i16("UpdateTime").unwrap_err();
        assert_eq!(err.expected_type, "i16");
    }

    #[test]
    fn test_read_i32_rejects_fraction() {
        let s = store(&[("WarnNPCFontSize", "14.5")]);
        let err = ConfigurationReader::new(&s).read_i32("WarnNPCFontSize").unwrap_err();
        assert_eq!(err.parameter, "WarnNPCFontSize");
        assert_eq!(err.expected_type, "i32");
    }

    #[test]
    fn test_read_i32_radix_16_parses_hex() {
        // Arrange
        let s = store(&[("UnitHashTable", "1234"), ("UiSettings", "0x20AD5F0"), ("Lower", "ff")]);
        let reader = ConfigurationReader::new(&s);

        // Act / Assert
        assert_eq!(reader.read_i32_radix("UnitHashTable", 16).unwrap(), 0x1234);
        assert_eq!(reader.read_i32_radix("UiSettings", 16).unwrap(), 0x20AD5F0);
        assert_eq!(reader.read_i32_radix("Lower", 16).unwrap(), 0xFF);
    }

    #[test]
    fn test_read_i32_radix_16_wraps_full_bit_pattern() {
        let s = store(&[("Offset", "FFFFFFFF"), ("High", "80000000")]);
        let reader = ConfigurationReader::new(&s);
        assert_eq!(reader.read_i32_radix("Offset", 16).unwrap(), -1);
        assert_eq!(reader.read_i32_radix("High", 16).unwrap(), i32::MIN);
    }

    #[test]
    fn test_read_i32_radix_rejects_sign_and_overflow() {
        let s = store(&[("Neg", "-10"), ("Big", "100000000"), ("Prefix", "0x")]);
        let reader = ConfigurationReader::new(&s);
        assert!(reader.read_i32_radix("Neg", 16).is_err());
        assert!(reader.read_i32_radix("Big", 16).is_err());
        assert!(reader.read_i32_radix("Prefix", 16).is_err());
    }

    #[test]
    fn test_read_i32_radix_binary_and_octal() {
        let s = store(&[("Bin", "1011"), ("Oct", "777")]);
        let reader = ConfigurationReader::new(&s);
        assert_eq!(reader.read_i32_radix("Bin", 2).unwrap(), 11);
        assert_eq!(reader.read_i32_radix("Oct", 8).unwrap(), 0o777);
    }

    #[test]
    fn test_read_i32_radix_unsupported_base_has_hint() {
        let s = store(&[("Odd", "12")]);
        let err = ConfigurationReader::new(&s).read_i32_radix("Odd", 7).unwrap_err();
        assert!(err.hint.as_deref().unwrap_or_default().contains("Base 7"));
    }

    // ── Characters and floats ─────────────────────────────────────────────────

    #[test]
    fn test_read_char_takes_exactly_one_character() {
        let s = store(&[("ToggleKey", "\t"), ("ZoomInKey", "+"), ("Bad", "ab"), ("Empty", "")]);
        let reader = ConfigurationReader::new(&s);
        assert_eq!(reader.read_char("ToggleKey").unwrap(), '\t');
        assert_eq!(reader.read_char("ZoomInKey").unwrap(), '+');
        assert_eq!(reader.read_char("Bad").unwrap_err().expected_type, "char");
        assert!(reader.read_char("Empty").is_err());
    }

    #[test]
    fn test_read_floats_use_dot_separator() {
        let s = store(&[("Opacity", "0.5"), ("ZoomLevelDefault", " 1.25 "), ("Comma", "0,5")]);
        let reader = ConfigurationReader::new(&s);
        assert_eq!(reader.read_f64("Opacity").unwrap(), 0.5);
        assert_eq!(reader.read_f32("ZoomLevelDefault").unwrap(), 1.25);
        assert_eq!(reader.read_f64("Comma").unwrap_err().expected_type, "f64");
        assert_eq!(reader.read_f32("Comma").unwrap_err().expected_type, "f32");
    }

    // ── Enums ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_enum_ignores_case() {
        let lower = store(&[("MapPosition", "topright")]);
        let mixed = store(&[("MapPosition", "TopRight")]);
        let a: MapPosition = ConfigurationReader::new(&lower).parse_enum("MapPosition").unwrap();
        let b: MapPosition = ConfigurationReader::new(&mixed).parse_enum("MapPosition").unwrap();
        assert_eq!(a, MapPosition::TopRight);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_enum_reads_the_requested_key() {
        let s = store(&[("MapPosition", "TopLeft"), ("OtherPosition", "Center")]);
        let pos: MapPosition = ConfigurationReader::new(&s).parse_enum("OtherPosition").unwrap();
        assert_eq!(pos, MapPosition::Center);
    }

    #[test]
    fn test_parse_enum_error_lists_every_member() {
        // Arrange
        let s = store(&[("MapPosition", "BottomLeft")]);

        // Act
        let err = ConfigurationReader::new(&s)
            .parse_enum::<MapPosition>("MapPosition")
            .unwrap_err();

        // Assert
        assert_eq!(err.expected_type, "MapPosition");
        assert_eq!(err.valid_values, Some(vec!["TopLeft", "TopRight", "Center"]));
        assert!(err.to_string().contains("TopLeft, TopRight, Center"));
    }

    #[test]
    fn test_parse_enum_missing_key_still_lists_members() {
        let s = store(&[]);
        let err = ConfigurationReader::new(&s)
            .parse_enum::<MapPosition>("MapPosition")
            .unwrap_err();
        assert!(err.valid_values.is_some());
    }

    // ── Colours ───────────────────────────────────────────────────────────────

    #[test]
    fn test_read_color_and_optional_color() {
        let s = store(&[("WarnNPCFontColor", "Red"), ("MapColor[1]", ""), ("Bad", "#12")]);
        let reader = ConfigurationReader::new(&s);
        assert_eq!(reader.read_color("WarnNPCFontColor").unwrap(), Color::from_rgb(255, 0, 0));
        assert_eq!(reader.read_optional_color("MapColor[1]").unwrap(), None);
        assert_eq!(reader.read_optional_color("MapColor[2]").unwrap(), None);
        assert_eq!(reader.read_optional_color("Bad").unwrap_err().expected_type, "Color");
        assert!(reader.read_color("MapColor[1]").is_err());
    }

    // ── Name lists ────────────────────────────────────────────────────────────

    #[test]
    fn test_split_names_trims_and_keeps_order() {
        let names: Vec<&str> = split_names("A, B,C").collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(split_names(" , ,").count(), 0);
    }

    #[test]
    fn test_read_areas_resolves_in_order_through_lookup() {
        // Arrange
        let s = store(&[("PrefetchAreas", "A, B,C")]);
        let mut names = MockNameLookup::new();
        names.expect_area_by_name().returning(|n| match n {
            "A" => Some(AreaId(10)),
            "B" => Some(AreaId(20)),
            "C" => Some(AreaId(30)),
            _ => None,
        });
        let reader = ConfigurationReader::with_names(&s, &names);

        // Act
        let areas = reader.read_areas("PrefetchAreas").unwrap();

        // Assert
        assert_eq!(areas, vec![AreaId(10), AreaId(20), AreaId(30)]);
    }

    #[test]
    fn test_read_areas_empty_value_is_empty_list() {
        let s = store(&[("HiddenAreas", "")]);
        assert!(ConfigurationReader::new(&s).read_areas("HiddenAreas").unwrap().is_empty());
    }

    #[test]
    fn test_read_areas_unknown_name_names_key() {
        let s = store(&[("HiddenAreas", "Blood Moor, Narnia")]);
        let err = ConfigurationReader::new(&s).read_areas("HiddenAreas").unwrap_err();
        assert_eq!(err.parameter, "HiddenAreas");
        assert!(err.to_string().contains("Narnia"));
    }

    #[test]
    fn test_read_npcs_with_static_tables() {
        let s = store(&[("WarnNPCImmune", "Baal, diablo")]);
        let npcs = ConfigurationReader::new(&s).read_npcs("WarnNPCImmune").unwrap();
        assert_eq!(npcs, vec![NpcId(544), NpcId(243)]);
    }
}
