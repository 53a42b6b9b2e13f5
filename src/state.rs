use std::rc::Rc;

use crate::config::{Config, PAGE_SIZE};
use crate::data::aggregate::{
    FilteredView, GridSort, SortColumn, Summary, TOP_N, page_count, sort_indices, summarize,
};
use crate::data::filter::{FilterState, filtered_indices};
use crate::data::model::CompanyDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Rc<CompanyDataset>>,

    /// Rating threshold and company selection.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// `visible_indices` in data-grid order (cached).
    pub grid_order: Vec<usize>,

    /// KPI values for the visible records (cached).
    pub summary: Summary,

    pub grid_sort: GridSort,

    /// Zero-based data-grid page.
    pub page: usize,

    /// Search text for the company picker.
    pub name_query: String,

    pub top_n: usize,
    pub page_size: usize,

    /// Set when no source file exists; blocks the dashboard.
    pub data_missing: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            grid_order: Vec::new(),
            summary: summarize(&FilteredView::new(&CompanyDataset::empty(), &[])),
            grid_sort: GridSort::default(),
            page: 0,
            name_query: String::new(),
            top_n: TOP_N,
            page_size: PAGE_SIZE,
            data_missing: None,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            top_n: config.top_n,
            page_size: config.page_size,
            ..Self::default()
        }
    }

    /// Ingest a loaded dataset and reset filters. An empty dataset means the
    /// source could not be found; `missing_hint` names where we looked.
    pub fn set_dataset(&mut self, dataset: Rc<CompanyDataset>, missing_hint: &str) {
        self.filters = FilterState::default();
        self.grid_sort = GridSort::default();
        self.page = 0;
        self.name_query.clear();
        self.status_message = None;
        self.data_missing = if dataset.is_empty() {
            Some(format!("Data not found. Expected a company file at {missing_hint}."))
        } else {
            None
        };
        self.dataset = Some(dataset);
        self.refilter();
    }

    pub fn view(&self) -> Option<FilteredView<'_>> {
        self.dataset
            .as_deref()
            .map(|ds| FilteredView::new(ds, &self.visible_indices))
    }

    /// Recompute visible rows, KPIs and grid order after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = self.dataset.as_deref() else {
            return;
        };
        self.visible_indices = filtered_indices(ds, &self.filters);
        let view = FilteredView::new(ds, &self.visible_indices);
        self.summary = summarize(&view);
        self.grid_order = sort_indices(&view, self.grid_sort);
        self.page = self.page.min(self.page_count() - 1);
    }

    pub fn set_min_rating(&mut self, min_rating: f64) {
        self.filters.min_rating = min_rating;
        self.page = 0;
        self.refilter();
    }

    pub fn toggle_name(&mut self, name: &str) {
        self.filters.toggle_name(name);
        self.page = 0;
        self.refilter();
    }

    pub fn clear_names(&mut self) {
        self.filters.selected_names.clear();
        self.page = 0;
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterState::default();
        self.name_query.clear();
        self.page = 0;
        self.refilter();
    }

    /// Header click in the data grid.
    pub fn sort_by(&mut self, column: SortColumn) {
        self.grid_sort = self.grid_sort.clicked(column);
        self.page = 0;
        let sort = self.grid_sort;
        if let Some(order) = self.view().map(|view| sort_indices(&view, sort)) {
            self.grid_order = order;
        }
    }

    pub fn page_count(&self) -> usize {
        page_count(self.visible_indices.len(), self.page_size)
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.page_count() - 1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Company names matching the search box, alphabetically.
    pub fn matching_names(&self) -> Vec<&str> {
        let Some(ds) = self.dataset.as_deref() else {
            return Vec::new();
        };
        let query = self.name_query.trim().to_lowercase();
        ds.sorted_names
            .iter()
            .filter(|n| query.is_empty() || n.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }
}
