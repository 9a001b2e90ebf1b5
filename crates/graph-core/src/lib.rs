// File: crates/graph-core/src/lib.rs
// Summary: Core library entry point; exports the download chart transformer and chart library loader.

pub mod api;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod palette;
pub mod precedence;
pub mod record;
pub mod reload;
pub mod series;
pub mod transform;
pub mod types;
pub mod window;

pub use api::{parse_downloads_response, DownloadsResponse};
pub use config::{GraphConfig, WindowMode};
pub use error::{ApiError, ConfigError, LoadFailure, TransformError};
pub use graph::{DownloadGraph, GraphView};
pub use loader::{ChartLibraryLoader, LibraryFetcher, LoadState};
pub use palette::{ColorPair, Palette, Rgb};
pub use precedence::{SemverPrecedence, StableFirstPrecedence, VersionPrecedence};
pub use record::{AggregateExtraRecord, RawDownloadRecord, VersionRef};
pub use reload::{ProcessReload, Reload};
pub use series::{ChartData, ChartPoint, ChartSeries, SeriesKind};
pub use transform::{to_chart_data, TransformOptions, Transformer};
pub use window::DateWindow;
