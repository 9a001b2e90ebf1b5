// File: crates/graph-core/src/palette.rs
// Summary: Series colors: RGB hex type, border/background pairs and the fixed diverging palette.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Opacity used to derive a background from a border color over white.
pub const BACKGROUND_OPACITY: f32 = 0.28;

/// Opaque RGB color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(v: u32) -> Self {
        Self { r: (v >> 16) as u8, g: (v >> 8) as u8, b: v as u8 }
    }

    /// Blend this color over white at `opacity` (0..=1).
    pub fn over_white(&self, opacity: f32) -> Self {
        let a = opacity.clamp(0.0, 1.0);
        let mix = |c: u8| -> u8 { (255.0 - a * (255.0 - c as f32)).round() as u8 };
        Self { r: mix(self.r), g: mix(self.g), b: mix(self.b) }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let v = u32::from_str_radix(hex, 16).map_err(|_| ConfigError::InvalidColor(s.to_string()))?;
        Ok(Self::from_hex(v))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Border (line) and background (fill) color of one series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub border: Rgb,
    pub background: Rgb,
}

impl ColorPair {
    pub const fn new(border: Rgb, background: Rgb) -> Self {
        Self { border, background }
    }

    /// Pair whose background is the border at [`BACKGROUND_OPACITY`].
    pub fn from_border(border: Rgb) -> Self {
        Self { border, background: border.over_white(BACKGROUND_OPACITY) }
    }
}

// ColorBrewer RdBu (diverging), light middle entries dropped so every line stays visible.
const RDBU: [ColorPair; 8] = [
    ColorPair::new(Rgb::from_hex(0x67001f), Rgb::from_hex(0xd3b5bc)),
    ColorPair::new(Rgb::from_hex(0xb2182b), Rgb::from_hex(0xeabdc0)),
    ColorPair::new(Rgb::from_hex(0xd6604d), Rgb::from_hex(0xf3d0ca)),
    ColorPair::new(Rgb::from_hex(0xf4a582), Rgb::from_hex(0xfce4d9)),
    ColorPair::new(Rgb::from_hex(0x92c5de), Rgb::from_hex(0xdeedf5)),
    ColorPair::new(Rgb::from_hex(0x4393c3), Rgb::from_hex(0xc9deed)),
    ColorPair::new(Rgb::from_hex(0x2166ac), Rgb::from_hex(0xbfd2e7)),
    ColorPair::new(Rgb::from_hex(0x053061), Rgb::from_hex(0xb6c3d1)),
];

/// Ordered color table; series `i` gets entry `i`, wrapping past the end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    name: String,
    pairs: Vec<ColorPair>,
}

impl Palette {
    /// Custom palette. Contract: `pairs` is non-empty.
    pub fn new(name: impl Into<String>, pairs: Vec<ColorPair>) -> Result<Self, ConfigError> {
        if pairs.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { name: name.into(), pairs })
    }

    pub fn diverging_rdbu() -> Self {
        Self { name: "rdbu".to_string(), pairs: RDBU.to_vec() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Color for the series at `index` in output order. Cycles once the
    /// palette is exhausted, so series `len()` reuses the first color.
    pub fn pair_for(&self, index: usize) -> ColorPair {
        self.pairs[index % self.pairs.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::diverging_rdbu()
    }
}
