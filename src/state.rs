use std::path::{Path, PathBuf};

use crate::color::StationColors;
use crate::data::error::LoadError;
use crate::data::filter::available_years;
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::pipeline::DashboardView;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File the current dataset was read from; Reload re-reads it.
    pub data_path: PathBuf,

    /// Loaded dataset.
    pub dataset: Dataset,

    /// Distinct years in first-appearance order of the sorted view.
    pub years: Vec<i32>,

    /// Year chosen in the side panel (None only for an empty dataset).
    pub selected_year: Option<i32>,

    /// Aggregates and chart models for `selected_year`.
    pub view: Option<DashboardView>,

    /// Colour per station, stable across year changes.
    pub station_colors: StationColors,

    /// Height of one line-chart panel.
    pub chart_height: f32,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path` and compute the view for its first year.
    pub fn open(path: &Path, chart_height: f32) -> Result<Self, LoadError> {
        let dataset = load_file(path)?;
        let mut state = AppState {
            data_path: path.to_path_buf(),
            dataset: Dataset::default(),
            years: Vec::new(),
            selected_year: None,
            view: None,
            station_colors: StationColors::default(),
            chart_height,
            status_message: None,
        };
        state.set_dataset(path, dataset, None);
        Ok(state)
    }

    /// Ingest a newly loaded dataset and compute the view once, for
    /// `preferred` when the new data has that year, else for its first year.
    pub fn set_dataset(&mut self, path: &Path, dataset: Dataset, preferred: Option<i32>) {
        if dataset.is_empty() {
            log::warn!("{} contains no observations", path.display());
        }
        self.years = available_years(&dataset);
        self.station_colors = StationColors::new(&dataset.stations);
        self.data_path = path.to_path_buf();
        self.dataset = dataset;
        self.status_message = None;

        let year = preferred
            .filter(|y| self.years.contains(y))
            .or_else(|| self.years.first().copied());
        match year {
            Some(year) => self.select_year(year),
            None => {
                self.selected_year = None;
                self.view = None;
            }
        }
    }

    /// Recompute every aggregate for `year`. Years outside the dataset are ignored.
    pub fn select_year(&mut self, year: i32) {
        if !self.years.contains(&year) {
            log::warn!("Ignoring selection of unavailable year {year}");
            return;
        }
        self.selected_year = Some(year);
        self.view = Some(DashboardView::compute(&self.dataset, year));
    }

    /// Load another file. On failure the current dataset stays in place and
    /// the error is reported in the status bar.
    pub fn load(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => self.set_dataset(path, dataset, self.selected_year),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-read the current file from disk.
    pub fn reload(&mut self) {
        let path = self.data_path.clone();
        self.load(&path);
    }
}
