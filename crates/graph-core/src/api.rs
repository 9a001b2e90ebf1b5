// File: crates/graph-core/src/api.rs
// Summary: Shape of the registry's `GET /crates/:id/downloads` payload and its conversion into records.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ApiError, TransformError};
use crate::record::{AggregateExtraRecord, RawDownloadRecord, VersionRef};

/// One `version_downloads` entry; `version` is a version id, sent either as
/// a number or as a numeric string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDownload {
    pub date: NaiveDate,
    pub downloads: u64,
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub version: u64,
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid version id {s:?}"))),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadsMeta {
    #[serde(default)]
    pub extra_downloads: Vec<AggregateExtraRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadsResponse {
    #[serde(default)]
    pub version_downloads: Vec<VersionDownload>,
    #[serde(default)]
    pub meta: DownloadsMeta,
}

impl DownloadsResponse {
    pub fn is_empty(&self) -> bool {
        self.version_downloads.is_empty() && self.meta.extra_downloads.is_empty()
    }

    /// Resolve version ids against `versions`. An id with no matching
    /// version is rejected rather than dropped.
    pub fn to_records(
        &self,
        versions: &[VersionRef],
    ) -> Result<Vec<RawDownloadRecord>, TransformError> {
        let by_id: HashMap<u64, &VersionRef> = versions.iter().map(|v| (v.id, v)).collect();
        self.version_downloads
            .iter()
            .map(|d| {
                let version = by_id
                    .get(&d.version)
                    .ok_or(TransformError::UnknownVersion { id: d.version })?;
                Ok(RawDownloadRecord::new(version, d.date, d.downloads))
            })
            .collect()
    }

    pub fn extra_downloads(&self) -> &[AggregateExtraRecord] {
        &self.meta.extra_downloads
    }
}

#[derive(Clone, Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Clone, Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// Interpret a downloads endpoint reply.
///
/// A crate with no versions or downloads is `Ok` with empty collections; an
/// unknown crate (404) is `ApiError::NotFound`.
pub fn parse_downloads_response(status: u16, body: &str) -> Result<DownloadsResponse, ApiError> {
    match status {
        200 => Ok(serde_json::from_str(body)?),
        404 => {
            let detail = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.errors.into_iter().next())
                .map(|e| e.detail)
                .unwrap_or_else(|| "Not Found".to_string());
            Err(ApiError::NotFound { detail })
        }
        other => Err(ApiError::Status { status: other }),
    }
}
