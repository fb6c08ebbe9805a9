//! Named colours used by the ready button

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::display::ColourCategory;

/// RGB colour, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Colour {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(format!("Invalid colour '{}': expected 6 hex digits", s));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|e| format!("Invalid colour '{}': {}", s, e))
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Colours applied to the button for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonColours {
    pub background: Colour,
    pub triangles_dark: Colour,
    pub triangles_light: Colour,
}

/// Palette the button draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub green: Colour,
    pub green_light: Colour,
    pub yellow: Colour,
    pub yellow_dark: Colour,
}

impl Palette {
    pub fn resolve(&self, category: ColourCategory) -> ButtonColours {
        match category {
            ColourCategory::Ready => ButtonColours {
                background: self.green,
                triangles_dark: self.green,
                triangles_light: self.green_light,
            },
            ColourCategory::Pending => ButtonColours {
                background: self.yellow_dark,
                triangles_dark: self.yellow_dark,
                triangles_light: self.yellow,
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            green: Colour::from_hex(0x88b300),
            green_light: Colour::from_hex(0xb3d944),
            yellow: Colour::from_hex(0xffcc22),
            yellow_dark: Colour::from_hex(0xee7700),
        }
    }
}
