use std::collections::BTreeSet;

use crate::color::ColorMap;
use crate::dashboard::{Dashboard, DashboardContext};
use crate::data::filter::{EmptySelection, Selection};
use crate::data::model::{Dataset, YearRange};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which multi-select a widget edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Product,
    Segment,
}

impl Dimension {
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Product => "Product",
            Dimension::Segment => "Segment",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset and render settings.
    pub context: DashboardContext,

    /// Current filter picks.
    pub selection: Selection,

    /// Output of the last render pass (recomputed on selection change).
    pub dashboard: Dashboard,

    /// Colours for product boxes.
    pub product_colors: ColorMap,

    /// Colours for country wedges.
    pub country_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(context: DashboardContext) -> Self {
        let selection = Selection::full(context.dataset());
        let dashboard = context.render(&selection);
        let (product_colors, country_colors) = color_maps(context.dataset());
        Self {
            context,
            selection,
            dashboard,
            product_colors,
            country_colors,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, resetting the selection.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        *self = Self::new(self.context.with_dataset(dataset));
    }

    /// Recompute the dashboard after a selection or policy change.
    pub fn refresh(&mut self) {
        self.dashboard = self.context.render(&self.selection);
    }

    pub fn options(&self, dim: Dimension) -> &[String] {
        let ds = self.context.dataset();
        match dim {
            Dimension::Product => &ds.products,
            Dimension::Segment => &ds.segments,
        }
    }

    pub fn picked(&self, dim: Dimension) -> &BTreeSet<String> {
        match dim {
            Dimension::Product => &self.selection.products,
            Dimension::Segment => &self.selection.segments,
        }
    }

    fn picked_mut(&mut self, dim: Dimension) -> &mut BTreeSet<String> {
        match dim {
            Dimension::Product => &mut self.selection.products,
            Dimension::Segment => &mut self.selection.segments,
        }
    }

    /// Toggle a single value in a multi-select.
    pub fn toggle(&mut self, dim: Dimension, value: &str) {
        let picked = self.picked_mut(dim);
        if !picked.remove(value) {
            picked.insert(value.to_string());
        }
        self.refresh();
    }

    /// Select all values of a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        let all: BTreeSet<String> = self.options(dim).iter().cloned().collect();
        *self.picked_mut(dim) = all;
        self.refresh();
    }

    /// Deselect all values of a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.picked_mut(dim).clear();
        self.refresh();
    }

    /// Move the lower year bound, dragging the upper one along if needed.
    pub fn set_year_min(&mut self, year: i32) {
        let max = self.selection.years.max.max(year);
        self.set_years(YearRange::new(year, max));
    }

    /// Move the upper year bound, dragging the lower one along if needed.
    pub fn set_year_max(&mut self, year: i32) {
        let min = self.selection.years.min.min(year);
        self.set_years(YearRange::new(min, year));
    }

    fn set_years(&mut self, years: YearRange) {
        if self.selection.years != years {
            self.selection.years = years;
            self.refresh();
        }
    }

    pub fn set_policy(&mut self, policy: EmptySelection) {
        if self.context.policy() != policy {
            self.context.set_policy(policy);
            self.refresh();
        }
    }
}

fn color_maps(dataset: &Dataset) -> (ColorMap, ColorMap) {
    (
        ColorMap::new(&dataset.products),
        ColorMap::new(&dataset.countries),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::model::record;

    fn state() -> AppState {
        let dataset = Dataset::from_records(vec![
            record("A", "X", "US", 2020, 1, 100.0, 20.0, 80.0),
            record("B", "Y", "UK", 2021, 2, 200.0, 50.0, 150.0),
            record("A", "Y", "US", 2022, 2, 50.0, 5.0, 45.0),
        ]);
        AppState::new(DashboardContext::new(dataset, &Config::default()))
    }

    #[test]
    fn starts_with_everything_visible() {
        let s = state();
        assert_eq!(s.dashboard.visible_rows, 3);
        assert_eq!(s.selection.years, YearRange::new(2020, 2022));
    }

    #[test]
    fn toggling_refilters() {
        let mut s = state();
        s.toggle(Dimension::Product, "B");
        assert_eq!(s.dashboard.visible_rows, 1);
        s.toggle(Dimension::Product, "B");
        assert_eq!(s.dashboard.visible_rows, 3);
    }

    #[test]
    fn select_none_respects_policy() {
        let mut s = state();
        s.select_all(Dimension::Segment);
        assert_eq!(s.picked(Dimension::Segment).len(), 2);
        s.select_none(Dimension::Segment);
        assert_eq!(s.dashboard.visible_rows, 3);

        s.set_policy(EmptySelection::Literal);
        assert_eq!(s.dashboard.visible_rows, 0);
    }

    #[test]
    fn year_bounds_never_cross() {
        let mut s = state();
        s.set_year_max(2020);
        s.set_year_min(2021);
        assert_eq!(s.selection.years, YearRange::new(2021, 2021));
        assert_eq!(s.dashboard.visible_rows, 1);

        s.set_year_max(2020);
        assert_eq!(s.selection.years, YearRange::new(2020, 2020));
    }

    #[test]
    fn new_dataset_resets_selection() {
        let mut s = state();
        s.toggle(Dimension::Product, "A");
        s.set_dataset(Dataset::from_records(vec![record(
            "C", "Z", "FR", 2019, 5, 1.0, 1.0, 1.0,
        )]));
        assert!(s.selection.products.is_empty());
        assert_eq!(s.dashboard.visible_rows, 1);
        assert_eq!(s.options(Dimension::Product), &["C".to_string()]);
    }
}
