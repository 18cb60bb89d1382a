//! ARGB colours as written in the settings file.
//!
//! Four notations are accepted:
//!
//! | Notation            | Example              | Alpha      |
//! |---------------------|----------------------|------------|
//! | HTML hex            | `#F00`, `#FF0000`    | 255        |
//! | HTML hex with alpha | `#80FF0000`          | from text  |
//! | Channel list        | `255,0,0` / `128,255,0,0` | 255 / first value |
//! | Known colour name   | `Red`, `transparent` | table      |
//!
//! Name matching is case-insensitive.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A 32-bit ARGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned when a string is not a colour in any accepted notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{0}\" is not a colour (expected #RRGGBB, #AARRGGBB, r,g,b, a,r,g,b or a colour name)")]
pub struct ParseColorError(pub String);

impl Color {
    pub const TRANSPARENT: Color = Color::from_argb(0, 255, 255, 255);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// `true` when the colour is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    fn parse_hex(digits: &str) -> Option<Self> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|n| n * 17);
                Some(Self::from_rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Self::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    fn parse_channels(text: &str) -> Option<Self> {
        let channels: Vec<u8> = text
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .ok()?;
        match channels.as_slice() {
            [r, g, b] => Some(Self::from_rgb(*r, *g, *b)),
            [a, r, g, b] => Some(Self::from_argb(*a, *r, *g, *b)),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        KNOWN_COLORS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, color)| *color)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parsed = if let Some(digits) = text.strip_prefix('#') {
            Self::parse_hex(digits)
        } else if text.contains(',') {
            Self::parse_channels(text)
        } else {
            Self::from_name(text)
        };
        parsed.ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// Standard web colour names, the subset people actually put in settings files.
const KNOWN_COLORS: &[(&str, Color)] = &[
    ("Transparent", Color::TRANSPARENT),
    ("Black", Color::from_rgb(0, 0, 0)),
    ("White", Color::WHITE),
    ("Red", Color::from_rgb(255, 0, 0)),
    ("DarkRed", Color::from_rgb(139, 0, 0)),
    ("Crimson", Color::from_rgb(220, 20, 60)),
    ("Orange", Color::from_rgb(255, 165, 0)),
    ("DarkOrange", Color::from_rgb(255, 140, 0)),
    ("OrangeRed", Color::from_rgb(255, 69, 0)),
    ("Gold", Color::from_rgb(255, 215, 0)),
    ("Yellow", Color::from_rgb(255, 255, 0)),
    ("LightYellow", Color::from_rgb(255, 255, 224)),
    ("Lime", Color::from_rgb(0, 255, 0)),
    ("Green", Color::from_rgb(0, 128, 0)),
    ("DarkGreen", Color::from_rgb(0, 100, 0)),
    ("LightGreen", Color::from_rgb(144, 238, 144)),
    ("LimeGreen", Color::from_rgb(50, 205, 50)),
    ("Olive", Color::from_rgb(128, 128, 0)),
    ("Teal", Color::from_rgb(0, 128, 128)),
    ("Cyan", Color::from_rgb(0, 255, 255)),
    ("Aqua", Color::from_rgb(0, 255, 255)),
    ("LightBlue", Color::from_rgb(173, 216, 230)),
    ("SkyBlue", Color::from_rgb(135, 206, 235)),
    ("DeepSkyBlue", Color::from_rgb(0, 191, 255)),
    ("Blue", Color::from_rgb(0, 0, 255)),
    ("RoyalBlue", Color::from_rgb(65, 105, 225)),
    ("DarkBlue", Color::from_rgb(0, 0, 139)),
    ("Navy", Color::from_rgb(0, 0, 128)),
    ("Purple", Color::from_rgb(128, 0, 128)),
    ("Magenta", Color::from_rgb(255, 0, 255)),
    ("Fuchsia", Color::from_rgb(255, 0, 255)),
    ("Violet", Color::from_rgb(238, 130, 238)),
    ("Pink", Color::from_rgb(255, 192, 203)),
    ("HotPink", Color::from_rgb(255, 105, 180)),
    ("Brown", Color::from_rgb(165, 42, 42)),
    ("Maroon", Color::from_rgb(128, 0, 0)),
    ("Tan", Color::from_rgb(210, 180, 140)),
    ("Beige", Color::from_rgb(245, 245, 220)),
    ("Silver", Color::from_rgb(192, 192, 192)),
    ("LightGray", Color::from_rgb(211, 211, 211)),
    ("Gray", Color::from_rgb(128, 128, 128)),
    ("DarkGray", Color::from_rgb(169, 169, 169)),
    ("DimGray", Color::from_rgb(105, 105, 105)),
    ("Coral", Color::from_rgb(255, 127, 80)),
    ("Salmon", Color::from_rgb(250, 128, 114)),
    ("Khaki", Color::from_rgb(240, 230, 140)),
    ("Indigo", Color::from_rgb(75, 0, 130)),
    ("Turquoise", Color::from_rgb(64, 224, 208)),
];

// ── Tests ─────────────────────────────────────────────────────────────────────
