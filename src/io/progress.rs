//! Terminal progress for tile extraction and solving

use crate::analysis::extraction::ExtractionObserver;
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!("{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress bars for one extraction and solve run
///
/// Extraction reports sampled rows and then neighbor computation per tile;
/// solving reports collapsed cells out of the grid total.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    extraction_bar: Option<ProgressBar>,
    adjacency_bar: Option<ProgressBar>,
    solve_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            extraction_bar: None,
            adjacency_bar: None,
            solve_bar: None,
        }
    }

    fn add_bar(&self, length: usize, prefix: &'static str) -> ProgressBar {
        let bar = ProgressBar::new(length as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(prefix);
        self.multi_progress.add(bar)
    }

    /// Configure the solve bar for a grid of `total_cells`
    pub fn start_solving(&mut self, total_cells: usize) {
        self.solve_bar = Some(self.add_bar(total_cells, "solve"));
    }

    /// Report collapsed cells and executed steps
    pub fn update_solving(&self, collapsed: usize, steps: usize) {
        if let Some(ref bar) = self.solve_bar {
            bar.set_position(collapsed as u64);
            bar.set_message(format!("{steps} steps"));
        }
    }

    /// Mark solving as finished with a closing message
    pub fn finish_solving(&self, message: String) {
        if let Some(ref bar) = self.solve_bar {
            bar.finish_with_message(message);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for bar in [&self.extraction_bar, &self.adjacency_bar]
            .into_iter()
            .flatten()
        {
            if !bar.is_finished() {
                bar.finish();
            }
        }
        let _ = self.multi_progress.clear();
    }
}

impl ExtractionObserver for ProgressManager {
    fn extraction_started(&mut self, rows: usize) {
        self.extraction_bar = Some(self.add_bar(rows, "sample"));
    }

    fn row_processed(&mut self, row: usize, total_tiles: usize) {
        if let Some(ref bar) = self.extraction_bar {
            bar.set_position(row as u64 + 1);
            bar.set_message(format!("{total_tiles} tiles"));
        }
    }

    fn tile_processed(&mut self, tile_index: usize, total_tiles: usize) {
        if self.adjacency_bar.is_none() {
            if let Some(ref bar) = self.extraction_bar {
                bar.finish();
            }
            self.adjacency_bar = Some(self.add_bar(total_tiles, "adjacency"));
        }

        if let Some(ref bar) = self.adjacency_bar {
            bar.set_position(tile_index as u64 + 1);
            if tile_index + 1 == total_tiles {
                bar.finish();
            }
        }
    }
}
