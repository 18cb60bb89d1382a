//! Enumerations that appear as settings values.
//!
//! Every enum implements [`ConfigEnum`], which gives the reader what it needs
//! to parse a value case-insensitively and, on failure, to list every valid
//! member in the error message.

use std::fmt;

use serde::{Serialize, Serializer};

/// An enum that can be parsed from a settings value.
pub trait ConfigEnum: Copy + 'static {
    /// Type name shown in error messages.
    const TYPE_NAME: &'static str;
    /// All members, in declaration order.
    const VARIANTS: &'static [Self];

    /// Canonical spelling of this member.
    fn name(self) -> &'static str;

    /// Case-insensitive lookup by name.
    fn from_name(text: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.name().eq_ignore_ascii_case(text))
    }

    /// Canonical spellings of all members.
    fn variant_names() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(|v| v.name()).collect()
    }
}

/// Declares a `ConfigEnum` with `Display` and `Serialize` rendering the
/// canonical member name.
macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl ConfigEnum for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }
    };
}

config_enum! {
    /// Where the overlay map is anchored on screen.
    pub enum MapPosition {
        TopLeft,
        TopRight,
        Center,
    }
}

config_enum! {
    /// Text alignment along one axis.
    ///
    /// `Near` is left/top, `Far` is right/bottom.
    pub enum TextAlign {
        Near,
        Center,
        Far,
    }
}

config_enum! {
    /// Marker shape for a point-of-interest icon.  `None` disables the icon.
    pub enum IconShape {
        None,
        Square,
        Ellipse,
        Polygon,
        Cross,
    }
}
