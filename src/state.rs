use std::collections::BTreeSet;
use std::path::Path;

use crate::charts::{Chart, ChartKind, ChartSource};
use crate::config::DashboardConfig;
use crate::data::filter::{filtered_indices, init_filter_state, FilterState};
use crate::data::loader;
use crate::data::model::{CellValue, Dataset, View};
use crate::error::Result;
use crate::metrics::Metrics;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Per-column selector state.
    pub filters: FilterState,

    /// Indices of rows passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Metric cards for the current filtered view.
    pub metrics: Option<Result<Metrics>>,

    /// Chart models in page order. A chart that failed keeps its error.
    pub charts: Vec<(ChartKind, Result<Chart>)>,

    /// Set when the filter engine itself failed.
    pub filter_error: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            metrics: None,
            charts: Vec::new(),
            filter_error: None,
            status_message: None,
        }
    }

    /// Load a sales file with the configured encoding. On failure the
    /// previous dataset is dropped and the error is kept for the top bar.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path, &self.config.encoding) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.clear();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset: select everything, build the charts.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filters = init_filter_state(&dataset);
        self.visible_indices = (0..dataset.len()).collect();

        let full = dataset.full_view();
        self.charts = ChartKind::ALL
            .iter()
            .map(|&kind| (kind, build_logged(kind, &full)))
            .collect();

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    fn clear(&mut self) {
        self.dataset = None;
        self.filters.clear();
        self.visible_indices.clear();
        self.metrics = None;
        self.charts.clear();
        self.filter_error = None;
    }

    /// The current filtered view.
    pub fn filtered_view(&self) -> Option<View<'_>> {
        let ds = self.dataset.as_ref()?;
        Some(View::new(ds, self.visible_indices.as_slice()))
    }

    /// Recompute `visible_indices`, the metric cards, and any chart built
    /// from the filtered view.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };

        match filtered_indices(ds, &self.filters) {
            Ok(rows) => {
                self.visible_indices = rows;
                self.filter_error = None;
            }
            Err(e) => {
                log::warn!("Filtering failed: {e}");
                self.visible_indices.clear();
                self.filter_error = Some(e.to_string());
            }
        }
        log::debug!("{} of {} rows visible", self.visible_indices.len(), ds.len());

        let view = View::new(ds, self.visible_indices.as_slice());
        let metrics = Metrics::compute(&view);
        if let Err(e) = &metrics {
            log::warn!("Metrics unavailable: {e}");
        }
        self.metrics = Some(metrics);

        for (kind, chart) in &mut self.charts {
            if kind.source() == ChartSource::Filtered {
                *chart = build_logged(*kind, &view);
            }
        }
    }

    /// Toggle a single value in a column's selector.
    pub fn toggle_filter_value(&mut self, column: &str, value: &CellValue) {
        let selected = self.filters.entry(column.to_string()).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: &str) {
        if let Some(ds) = &self.dataset {
            if let Ok(all_vals) = ds.unique_values(column) {
                self.filters
                    .insert(column.to_string(), all_vals.iter().cloned().collect());
                self.refilter();
            }
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: &str) {
        self.filters.insert(column.to_string(), BTreeSet::new());
        self.refilter();
    }
}

fn build_logged(kind: ChartKind, view: &View<'_>) -> Result<Chart> {
    let chart = kind.build(view);
    if let Err(e) = &chart {
        log::warn!("Chart '{}' unavailable: {e}", kind.id());
    }
    chart
}
