// File: crates/graph-core/src/error.rs
// Summary: Error taxonomy: invalid transformer input, chart library load failures, API and config errors.

use thiserror::Error;

/// Malformed or inconsistent transformer input. Never coerced to a default.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("invalid input: version {version} (id {id}) has no creation date")]
    MissingCreationDate { id: u64, version: String },

    #[error("invalid input: version id {id} appears as both {first} and {second}")]
    ConflictingVersion { id: u64, first: String, second: String },

    #[error("invalid input: download record references unknown version id {id}")]
    UnknownVersion { id: u64 },
}

/// Why the chart library could not be loaded. Held by the loader's `Errored` state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadFailure {
    #[error("network error: {0}")]
    Network(String),

    #[error("malformed chart library asset: {0}")]
    Malformed(String),

    #[error("chart library did not load within {secs}s")]
    Timeout { secs: u64 },

    #[error("chart library fetch panicked")]
    Panicked,

    #[error("chart library loader was shut down")]
    Abandoned,
}

/// Outcome of the downloads endpoint other than a usable payload.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The crate does not exist; distinct from a crate with no downloads.
    #[error("not found: {detail}")]
    NotFound { detail: String },

    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    #[error("failed to decode downloads payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid color {0:?}; expected #rrggbb")]
    InvalidColor(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("max_days must be at least 1")]
    ZeroWindow,

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
