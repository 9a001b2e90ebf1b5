// File: crates/graph-core/src/types.rs
// Summary: Shared constants and the per-series style block (line width, smoothing, hover sizing).

use serde::{Deserialize, Serialize};

/// Label of the aggregate series built from extra downloads.
pub const OTHER_LABEL: &str = "Other";
/// Default line thickness, in pixels.
pub const BORDER_WIDTH: u32 = 2;
/// Default hover radius of a data point, in pixels.
pub const POINT_HOVER_RADIUS: u32 = 5;
/// Default hover border width of a data point, in pixels.
pub const POINT_HOVER_BORDER_WIDTH: u32 = 2;
/// Number of days the registry front end charts by default.
pub const RECENT_DAYS: u32 = 90;

/// Line smoothing mode understood by the charting library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Monotone,
    Default,
}

/// Presentational constants copied onto every series.
/// Contract: these are configuration, never computed from data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesStyle {
    pub border_width: u32,
    pub interpolation: Interpolation,
    pub point_hover_radius: u32,
    pub point_hover_border_width: u32,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            border_width: BORDER_WIDTH,
            interpolation: Interpolation::Monotone,
            point_hover_radius: POINT_HOVER_RADIUS,
            point_hover_border_width: POINT_HOVER_BORDER_WIDTH,
        }
    }
}
