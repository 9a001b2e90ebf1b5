// File: crates/demo/src/sparkline.rs
// Summary: Terminal "chart library" for the demo: renders datasets as labeled sparklines.

use std::fmt::Write as _;
use std::path::PathBuf;

use async_trait::async_trait;
use graph_core::{ChartData, LibraryFetcher, LoadFailure};
use tracing::debug;

const DEFAULT_GLYPHS: &str = "▁▂▃▄▅▆▇█";

pub struct Sparkline {
    glyphs: Vec<char>,
}

impl Sparkline {
    pub fn new(glyphs: &str) -> Result<Self, LoadFailure> {
        let glyphs: Vec<char> = glyphs.trim().chars().collect();
        if glyphs.len() < 2 {
            return Err(LoadFailure::Malformed(format!(
                "need at least 2 glyphs, got {}",
                glyphs.len()
            )));
        }
        Ok(Self { glyphs })
    }

    /// One line per series: label, window total, sparkline oldest -> newest.
    pub fn render(&self, data: &ChartData) -> String {
        let width = data.datasets.iter().map(|s| s.label.len()).max().unwrap_or(0);
        let peak = data
            .datasets
            .iter()
            .flat_map(|s| s.data.iter().map(|p| p.y))
            .max()
            .unwrap_or(0)
            .max(1);
        let top = (self.glyphs.len() - 1) as u128;

        let mut out = String::new();
        for s in &data.datasets {
            let line: String = s
                .data
                .iter()
                .rev()
                .map(|p| self.glyphs[(u128::from(p.y) * top / u128::from(peak)) as usize])
                .collect();
            let _ = writeln!(
                out,
                "{:<width$}  {:>10}  {} {}",
                s.label,
                s.total(),
                s.border_color,
                line
            );
        }
        out
    }
}

/// Builds a [`Sparkline`], reading its glyph ramp from a file when one is given.
pub struct SparklineFetcher {
    glyphs_path: Option<PathBuf>,
}

impl SparklineFetcher {
    pub fn new(glyphs_path: Option<PathBuf>) -> Self {
        Self { glyphs_path }
    }
}

#[async_trait]
impl LibraryFetcher for SparklineFetcher {
    type Handle = Sparkline;

    async fn fetch(&self) -> Result<Sparkline, LoadFailure> {
        let Some(path) = &self.glyphs_path else {
            return Sparkline::new(DEFAULT_GLYPHS);
        };
        debug!(path = %path.display(), "reading glyph ramp");
        let glyphs = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoadFailure::Network(format!("{}: {e}", path.display())))?;
        Sparkline::new(&glyphs)
    }
}
