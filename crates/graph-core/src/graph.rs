// File: crates/graph-core/src/graph.rs
// Summary: Presentation state of the download graph: spinner, chart or error-with-reload.

use std::sync::Arc;

use crate::error::{LoadFailure, TransformError};
use crate::loader::{ChartLibraryLoader, LibraryFetcher, LoadState};
use crate::record::{AggregateExtraRecord, RawDownloadRecord};
use crate::series::ChartData;
use crate::transform::Transformer;

/// What a renderer should show right now.
pub enum GraphView<H> {
    /// Chart library not ready yet.
    Spinner,
    /// Library ready; draw `data` with `library`.
    Chart { library: Arc<H>, data: ChartData },
    /// Library failed; show the failure and a reload action. No partial chart.
    Error { failure: LoadFailure },
}

impl<H> GraphView<H> {
    pub fn is_spinner(&self) -> bool {
        matches!(self, Self::Spinner)
    }

    pub fn is_chart(&self) -> bool {
        matches!(self, Self::Chart { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// One graph instance: shared loader plus this graph's datasets.
pub struct DownloadGraph<F: LibraryFetcher> {
    loader: Arc<ChartLibraryLoader<F>>,
    data: ChartData,
}

impl<F: LibraryFetcher> DownloadGraph<F> {
    pub fn new(loader: Arc<ChartLibraryLoader<F>>, data: ChartData) -> Self {
        Self { loader, data }
    }

    pub fn from_records(
        loader: Arc<ChartLibraryLoader<F>>,
        transformer: &Transformer,
        records: &[RawDownloadRecord],
        extra: &[AggregateExtraRecord],
    ) -> Result<Self, TransformError> {
        Ok(Self::new(loader, transformer.transform(records, extra)?))
    }

    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// Snapshot of the view without triggering a load.
    pub fn view(&self) -> GraphView<F::Handle> {
        self.view_for(self.loader.state())
    }

    /// Load the library if needed and return the settled view.
    pub async fn ready(&self) -> GraphView<F::Handle> {
        let state = self.loader.ensure_loaded().await;
        self.view_for(state)
    }

    /// The reload action of the error view.
    pub fn reload(&self) {
        self.loader.recover();
    }

    fn view_for(&self, state: LoadState<F::Handle>) -> GraphView<F::Handle> {
        match state {
            LoadState::Idle | LoadState::Loading => GraphView::Spinner,
            LoadState::Loaded(library) => GraphView::Chart { library, data: self.data.clone() },
            LoadState::Errored(failure) => GraphView::Error { failure },
        }
    }
}
