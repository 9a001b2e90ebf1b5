// File: crates/graph-core/src/record.rs
// Summary: Input records: versions, per-version daily downloads and the "other versions" aggregate.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// A published version, as referenced by download records.
/// Identity is `id`; `num` is the display label (e.g. "1.0.56").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRef {
    pub id: u64,
    pub num: String,
    #[serde(default, deserialize_with = "date_or_timestamp")]
    pub created_at: Option<NaiveDate>,
}

impl VersionRef {
    pub fn new(id: u64, num: impl Into<String>, created_at: NaiveDate) -> Self {
        Self { id, num: num.into(), created_at: Some(created_at) }
    }
}

/// Downloads of one version on one calendar day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDownloadRecord {
    pub version: VersionRef,
    pub date: NaiveDate,
    pub downloads: u64,
}

impl RawDownloadRecord {
    pub fn new(version: &VersionRef, date: NaiveDate, downloads: u64) -> Self {
        Self { version: version.clone(), date, downloads }
    }
}

/// Downloads on one day attributed to versions not listed individually.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateExtraRecord {
    pub date: NaiveDate,
    pub downloads: u64,
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (reduced to its UTC date).
fn date_or_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_calendar_date(&raw).map(Some).map_err(serde::de::Error::custom)
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, String> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.naive_utc().date())
        .map_err(|_| format!("invalid date {raw:?}; expected YYYY-MM-DD or RFC 3339"))
}
