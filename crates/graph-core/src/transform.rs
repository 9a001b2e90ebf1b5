// File: crates/graph-core/src/transform.rs
// Summary: Raw per-version daily downloads -> ordered, colored, zero-filled chart series.
// Notes:
// - Pure: the only notion of "today" is `TransformOptions::today`, injected by the caller.
// - Records repeating a (version, date) pair are summed.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{GraphConfig, WindowMode};
use crate::error::TransformError;
use crate::palette::Palette;
use crate::precedence::{SemverPrecedence, VersionPrecedence};
use crate::record::{AggregateExtraRecord, RawDownloadRecord};
use crate::series::{ChartData, ChartPoint, ChartSeries, SeriesKind};
use crate::types::{SeriesStyle, OTHER_LABEL};
use crate::window::DateWindow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformOptions {
    pub mode: WindowMode,
    /// Upper bound of the window. Defaults to the latest record date.
    pub today: Option<NaiveDate>,
    /// Keep only the most recent `max_days` days.
    pub max_days: Option<u32>,
    pub other_label: String,
    pub style: SeriesStyle,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            mode: WindowMode::Uniform,
            today: None,
            max_days: None,
            other_label: OTHER_LABEL.to_string(),
            style: SeriesStyle::default(),
        }
    }
}

/// Configured transformer. Holds no per-call state; `transform` may be called
/// any number of times and returns equal output for equal input.
pub struct Transformer {
    options: TransformOptions,
    palette: Palette,
    precedence: Box<dyn VersionPrecedence>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self {
            options: TransformOptions::default(),
            palette: Palette::diverging_rdbu(),
            precedence: Box::new(SemverPrecedence),
        }
    }
}

impl Transformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &GraphConfig) -> Self {
        Self {
            options: TransformOptions {
                mode: cfg.window,
                today: None,
                max_days: cfg.max_days,
                other_label: cfg.other_label.clone(),
                style: cfg.style,
            },
            palette: cfg.palette(),
            precedence: cfg.precedence.strategy(),
        }
    }

    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.options.today = Some(today);
        self
    }

    pub fn with_mode(mut self, mode: WindowMode) -> Self {
        self.options.mode = mode;
        self
    }

    pub fn with_max_days(mut self, days: u32) -> Self {
        self.options.max_days = Some(days);
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_precedence(mut self, precedence: Box<dyn VersionPrecedence>) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Build the chart datasets.
    ///
    /// Series are ordered newest version first (per the precedence strategy,
    /// ties broken by descending version id); the aggregate series built from
    /// `extra` is always last. Colors follow that order.
    pub fn transform(
        &self,
        records: &[RawDownloadRecord],
        extra: &[AggregateExtraRecord],
    ) -> Result<ChartData, TransformError> {
        let versions = partition(records)?;

        let mut extra_by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for e in extra {
            let slot = extra_by_date.entry(e.date).or_default();
            *slot = slot.saturating_add(e.downloads);
        }

        let Some(window) = self.window(records, &versions, &extra_by_date) else {
            debug!(records = records.len(), extra = extra.len(), "no dates to chart");
            return Ok(ChartData::default());
        };

        let mut ordered: Vec<&VersionDownloads> = versions.iter().collect();
        ordered.sort_by(|a, b| {
            self.precedence
                .compare(&b.num, &a.num)
                .then_with(|| b.id.cmp(&a.id))
        });

        let style = &self.options.style;
        let mut datasets = Vec::with_capacity(ordered.len() + 1);
        for (i, v) in ordered.iter().enumerate() {
            let floor = match self.options.mode {
                WindowMode::Uniform => window.start,
                WindowMode::SinceCreation => v.created_at.pred_opt().unwrap_or(v.created_at),
            };
            let data = zero_filled(&window, floor, &v.counts);
            datasets.push(ChartSeries::new(
                v.num.clone(),
                SeriesKind::Version { id: v.id },
                self.palette.pair_for(i),
                style,
                data,
            ));
        }

        // "Other" has no creation date, so it spans the window in either mode.
        if !extra_by_date.is_empty() {
            let data = zero_filled(&window, window.start, &extra_by_date);
            datasets.push(ChartSeries::new(
                self.options.other_label.clone(),
                SeriesKind::Other,
                self.palette.pair_for(ordered.len()),
                style,
                data,
            ));
        }

        debug!(
            series = datasets.len(),
            start = %window.start,
            end = %window.end,
            days = window.day_count(),
            precedence = self.precedence.id(),
            "built download chart data"
        );
        Ok(ChartData { datasets })
    }

    fn window(
        &self,
        records: &[RawDownloadRecord],
        versions: &[VersionDownloads],
        extra_by_date: &BTreeMap<NaiveDate, u64>,
    ) -> Option<DateWindow> {
        let record_end = records.iter().map(|r| r.date).max();
        let extra_end = extra_by_date.keys().next_back().copied();
        let end = self.options.today.or(record_end.max(extra_end))?;

        let start = if records.is_empty() {
            *extra_by_date.keys().next()?
        } else {
            versions
                .iter()
                .map(|v| v.created_at)
                .chain(records.iter().map(|r| r.date))
                .min()?
        };

        let window = DateWindow::new(start, end);
        Some(match self.options.max_days {
            Some(days) => window.limit_to(days),
            None => window,
        })
    }
}

/// Convenience over [`Transformer::transform`] with default options.
pub fn to_chart_data(
    records: &[RawDownloadRecord],
    extra: &[AggregateExtraRecord],
) -> Result<ChartData, TransformError> {
    Transformer::default().transform(records, extra)
}

struct VersionDownloads {
    id: u64,
    num: String,
    created_at: NaiveDate,
    counts: HashMap<NaiveDate, u64>,
}

/// Group records by version id, validating each version's metadata.
fn partition(records: &[RawDownloadRecord]) -> Result<Vec<VersionDownloads>, TransformError> {
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut out: Vec<VersionDownloads> = Vec::new();

    for r in records {
        let v = &r.version;
        let created_at = v.created_at.ok_or_else(|| TransformError::MissingCreationDate {
            id: v.id,
            version: v.num.clone(),
        })?;

        let slot = match index.get(&v.id) {
            Some(&i) => {
                let known = &out[i];
                if known.num != v.num || known.created_at != created_at {
                    return Err(TransformError::ConflictingVersion {
                        id: v.id,
                        first: format!("{} created {}", known.num, known.created_at),
                        second: format!("{} created {}", v.num, created_at),
                    });
                }
                i
            }
            None => {
                index.insert(v.id, out.len());
                out.push(VersionDownloads {
                    id: v.id,
                    num: v.num.clone(),
                    created_at,
                    counts: HashMap::new(),
                });
                out.len() - 1
            }
        };

        let count = out[slot].counts.entry(r.date).or_default();
        *count = count.saturating_add(r.downloads);
    }
    Ok(out)
}

fn zero_filled<M>(window: &DateWindow, floor: NaiveDate, counts: &M) -> Vec<ChartPoint>
where
    M: DailyCounts,
{
    window
        .days_desc_from(floor)
        .map(|x| ChartPoint { x, y: counts.on(x) })
        .collect()
}

trait DailyCounts {
    fn on(&self, date: NaiveDate) -> u64;
}

impl DailyCounts for HashMap<NaiveDate, u64> {
    fn on(&self, date: NaiveDate) -> u64 {
        self.get(&date).copied().unwrap_or(0)
    }
}

impl DailyCounts for BTreeMap<NaiveDate, u64> {
    fn on(&self, date: NaiveDate) -> u64 {
        self.get(&date).copied().unwrap_or(0)
    }
}
