// File: crates/demo/src/input.rs
// Summary: Load download records from a JSON fixture (versions + API payload) or a CSV export.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use graph_core::record::parse_calendar_date;
use graph_core::{AggregateExtraRecord, DownloadsResponse, RawDownloadRecord, VersionRef};
use serde::Deserialize;
use tracing::{debug, info};

pub struct Input {
    pub records: Vec<RawDownloadRecord>,
    pub extra: Vec<AggregateExtraRecord>,
}

/// JSON fixture: the downloads endpoint payload plus the versions it references.
#[derive(Deserialize)]
struct Fixture {
    #[serde(default)]
    versions: Vec<VersionRef>,
    #[serde(flatten)]
    response: DownloadsResponse,
}

pub fn load(path: &Path) -> Result<Input> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let input = match ext.as_str() {
        "csv" => load_csv(path)?,
        _ => load_json(path)?,
    };
    info!(
        path = %path.display(),
        records = input.records.len(),
        extra = input.extra.len(),
        "loaded download records"
    );
    Ok(input)
}

fn load_json(path: &Path) -> Result<Input> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let fixture: Fixture =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    let records = fixture.response.to_records(&fixture.versions)?;
    Ok(Input { records, extra: fixture.response.meta.extra_downloads })
}

/// One CSV row. Rows with an empty `version` are "other versions" downloads.
#[derive(Deserialize)]
struct Row {
    #[serde(default)]
    version: String,
    #[serde(default)]
    created_at: String,
    date: String,
    downloads: u64,
}

fn load_csv(path: &Path) -> Result<Input> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut ids: HashMap<String, u64> = HashMap::new();
    let mut records = Vec::new();
    let mut extra = Vec::new();

    for (line, row) in rdr.deserialize::<Row>().enumerate() {
        let row = row.with_context(|| format!("row {}", line + 2))?;
        let date = parse_calendar_date(&row.date).map_err(anyhow::Error::msg)?;

        if row.version.is_empty() {
            extra.push(AggregateExtraRecord { date, downloads: row.downloads });
            continue;
        }

        // Left as None when blank so the transformer reports it.
        let created_at = if row.created_at.is_empty() {
            None
        } else {
            Some(parse_calendar_date(&row.created_at).map_err(anyhow::Error::msg)?)
        };
        let next_id = ids.len() as u64 + 1;
        let id = *ids.entry(row.version.clone()).or_insert(next_id);
        let version = VersionRef { id, num: row.version, created_at };
        records.push(RawDownloadRecord { version, date, downloads: row.downloads });
    }
    debug!(versions = ids.len(), "assigned CSV version ids");
    Ok(Input { records, extra })
}
