// File: crates/graph-core/src/series.rs
// Summary: Output model: chart points, labeled/colored series and the dataset collection.
// Notes:
// - Field names serialize in the charting library's camelCase layout so the
//   output can be handed to a renderer untouched.

use chrono::NaiveDate;
use serde::Serialize;

use crate::palette::{ColorPair, Rgb};
use crate::types::{Interpolation, SeriesStyle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub x: NaiveDate,
    pub y: u64,
}

/// What a series was built from. Not serialized; renderers only see the label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesKind {
    Version { id: u64 },
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    #[serde(skip)]
    pub kind: SeriesKind,
    pub border_color: Rgb,
    pub background_color: Rgb,
    pub border_width: u32,
    pub cubic_interpolation_mode: Interpolation,
    pub point_hover_border_width: u32,
    pub point_hover_radius: u32,
    /// Newest date first.
    pub data: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(
        label: impl Into<String>,
        kind: SeriesKind,
        colors: ColorPair,
        style: &SeriesStyle,
        data: Vec<ChartPoint>,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            border_color: colors.border,
            background_color: colors.background,
            border_width: style.border_width,
            cubic_interpolation_mode: style.interpolation,
            point_hover_border_width: style.point_hover_border_width,
            point_hover_radius: style.point_hover_radius,
            data,
        }
    }

    pub fn colors(&self) -> ColorPair {
        ColorPair::new(self.border_color, self.background_color)
    }

    pub fn is_other(&self) -> bool {
        matches!(self.kind, SeriesKind::Other)
    }

    /// Sum of all `y` values in the window, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.data.iter().fold(0u64, |acc, p| acc.saturating_add(p.y))
    }

    /// `y` on `date`, or `None` when the date lies outside this series.
    pub fn value_on(&self, date: NaiveDate) -> Option<u64> {
        self.data.iter().find(|p| p.x == date).map(|p| p.y)
    }
}

/// Chart-library-ready result: `{ "datasets": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub datasets: Vec<ChartSeries>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.datasets.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn series(&self, label: &str) -> Option<&ChartSeries> {
        self.datasets.iter().find(|s| s.label == label)
    }
}
