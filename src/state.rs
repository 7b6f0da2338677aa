use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::aggregate::DashboardView;
use crate::data::filter::{filtered_indices, toggle, Dimension, Selection};
use crate::data::labels::Vocabulary;
use crate::data::loader::Source;
use crate::data::model::SalaryTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the current table came from.
    pub source: Source,

    /// Normalized table, shared read-only.
    pub table: Arc<SalaryTable>,

    pub vocabulary: Vocabulary,

    /// Length of the top-paying job titles ranking.
    pub top_titles: usize,

    /// Per-dimension filter selections.
    pub selection: Selection,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Views derived from `visible_indices`.
    pub view: DashboardView,

    /// Stable colours for seniority and work-type bars.
    pub seniority_colors: ColorMap,
    pub remote_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(
        source: Source,
        table: Arc<SalaryTable>,
        vocabulary: Vocabulary,
        top_titles: usize,
    ) -> Self {
        let selection = Selection::all(&table);
        let visible_indices = filtered_indices(&table, &selection);
        let view = DashboardView::compute(&table, &visible_indices, top_titles);

        Self {
            source,
            seniority_colors: ColorMap::new(&table.seniorities),
            remote_colors: ColorMap::new(&table.remote_types),
            table,
            vocabulary,
            top_titles,
            selection,
            visible_indices,
            view,
            status_message: None,
        }
    }

    /// Swap in a newly loaded table and reset filters to "everything".
    pub fn set_table(&mut self, source: Source, table: Arc<SalaryTable>) {
        self.source = source;
        self.selection = Selection::all(&table);
        self.seniority_colors = ColorMap::new(&table.seniorities);
        self.remote_colors = ColorMap::new(&table.remote_types);
        self.table = table;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible_indices` and every derived view after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.table, &self.selection);
        self.view = DashboardView::compute(&self.table, &self.visible_indices, self.top_titles);
        log::debug!(
            "{} of {} records visible",
            self.visible_indices.len(),
            self.table.len()
        );
    }

    pub fn toggle_year(&mut self, year: i32) {
        toggle(&mut self.selection.years, &year);
        self.refilter();
    }

    pub fn toggle_seniority(&mut self, label: &str) {
        toggle(&mut self.selection.seniorities, &label.to_string());
        self.refilter();
    }

    pub fn toggle_remote_type(&mut self, label: &str) {
        toggle(&mut self.selection.remote_types, &label.to_string());
        self.refilter();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dimension: Dimension) {
        let table = Arc::clone(&self.table);
        self.selection.select_all(&table, dimension);
        self.refilter();
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.selection.select_none(dimension);
        self.refilter();
    }
}
