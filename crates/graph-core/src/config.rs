// File: crates/graph-core/src/config.rs
// Summary: TOML-backed configuration for the transformer (window, labels, style, palette) and the loader.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::palette::{ColorPair, Palette, Rgb};
use crate::precedence::{SemverPrecedence, StableFirstPrecedence, VersionPrecedence};
use crate::types::{SeriesStyle, OTHER_LABEL};

/// How far back each series reaches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Every series spans the whole window.
    #[default]
    Uniform,
    /// A version's series stops the day before it was published; "Other"
    /// still spans the whole window.
    SinceCreation,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrecedenceKind {
    #[default]
    Semver,
    StableFirst,
}

impl PrecedenceKind {
    pub fn strategy(self) -> Box<dyn VersionPrecedence> {
        match self {
            Self::Semver => Box::new(SemverPrecedence),
            Self::StableFirst => Box::new(StableFirstPrecedence),
        }
    }
}

/// One custom palette entry; a missing background is derived from the border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub border: Rgb,
    #[serde(default)]
    pub background: Option<Rgb>,
}

impl From<PaletteEntry> for ColorPair {
    fn from(e: PaletteEntry) -> Self {
        match e.background {
            Some(bg) => ColorPair::new(e.border, bg),
            None => ColorPair::from_border(e.border),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Give up on the chart library after this many seconds. `None` waits forever.
    pub timeout_secs: Option<u64>,
}

impl LoaderSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Top-level configuration. Every field has a default, so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub window: WindowMode,
    /// Cap on the number of charted days. `None` charts the full span.
    pub max_days: Option<u32>,
    pub other_label: String,
    pub precedence: PrecedenceKind,
    pub style: SeriesStyle,
    /// Replaces the built-in diverging palette. Must not be empty when given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<PaletteEntry>>,
    pub loader: LoaderSettings,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            window: WindowMode::Uniform,
            max_days: None,
            other_label: OTHER_LABEL.to_string(),
            precedence: PrecedenceKind::Semver,
            style: SeriesStyle::default(),
            palette: None,
            loader: LoaderSettings::default(),
        }
    }
}

impl GraphConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_days == Some(0) {
            return Err(ConfigError::ZeroWindow);
        }
        if self.palette.as_ref().is_some_and(Vec::is_empty) {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }

    /// Configured palette, or the built-in one when none is given.
    pub fn palette(&self) -> Palette {
        let Some(entries) = &self.palette else {
            return Palette::diverging_rdbu();
        };
        let pairs = entries.iter().copied().map(ColorPair::from).collect();
        // An empty list is caught by `validate`; fall back if it was skipped.
        Palette::new("custom", pairs).unwrap_or_default()
    }
}
