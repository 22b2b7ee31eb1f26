use std::sync::Arc;

use crate::charts::Charts;
use crate::config::Config;
use crate::data::filter::{self, EmptySelection, Selection};
use crate::data::model::Dataset;

pub const BASE_TITLE: &str = "Financial Analysis";

// ---------------------------------------------------------------------------
// Render output
// ---------------------------------------------------------------------------

/// One render pass: the title, row counts and all chart data.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub total_rows: usize,
    pub visible_rows: usize,
    pub charts: Charts,
}

// ---------------------------------------------------------------------------
// Application context
// ---------------------------------------------------------------------------

/// The loaded dataset plus the settings that shape every render.
/// Built once per loaded file; cheap to clone.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    dataset: Arc<Dataset>,
    policy: EmptySelection,
    histogram_bins: usize,
}

impl DashboardContext {
    pub fn new(dataset: Dataset, config: &Config) -> Self {
        Self {
            dataset: Arc::new(dataset),
            policy: config.empty_selection,
            histogram_bins: config.histogram_bins,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn policy(&self) -> EmptySelection {
        self.policy
    }

    pub fn set_policy(&mut self, policy: EmptySelection) {
        self.policy = policy;
    }

    /// Same settings, different data.
    pub fn with_dataset(&self, dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            ..self.clone()
        }
    }

    /// Filter, aggregate and title the dataset for `selection`.
    pub fn render(&self, selection: &Selection) -> Dashboard {
        let view = filter::apply(&self.dataset, selection, self.policy);
        if view.is_empty() {
            log::debug!("render: selection matches no records");
        } else {
            log::debug!(
                "render: {} of {} records visible",
                view.len(),
                self.dataset.len()
            );
        }

        Dashboard {
            title: title(&self.dataset, selection),
            total_rows: self.dataset.len(),
            visible_rows: view.len(),
            charts: Charts::compute(&self.dataset, &view, self.histogram_bins),
        }
    }
}

/// `"Financial Analysis - Products: … - Segments: … - Year Range: a to b"`.
///
/// Picked values are listed in the dataset's option order.
pub fn title(dataset: &Dataset, selection: &Selection) -> String {
    let mut title = BASE_TITLE.to_string();

    let picked = |options: &[String], chosen: &std::collections::BTreeSet<String>| {
        options
            .iter()
            .filter(|o| chosen.contains(*o))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    if !selection.products.is_empty() {
        title += &format!(" - Products: {}", picked(&dataset.products, &selection.products));
    }
    if !selection.segments.is_empty() {
        title += &format!(" - Segments: {}", picked(&dataset.segments, &selection.segments));
    }
    title += &format!(
        " - Year Range: {} to {}",
        selection.years.min, selection.years.max
    );
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::trend::MonthlyTotal;
    use crate::data::model::{record, YearRange};

    fn context() -> DashboardContext {
        let dataset = Dataset::from_records(vec![
            record("A", "X", "US", 2020, 1, 100.0, 20.0, 80.0),
            record("B", "Y", "UK", 2021, 2, 200.0, 50.0, 150.0),
        ]);
        DashboardContext::new(dataset, &Config::default())
    }

    #[test]
    fn two_record_scenario() {
        let ctx = context();
        let selection = Selection {
            products: ["A".to_string()].into(),
            segments: ["X".to_string()].into(),
            years: YearRange::new(2020, 2020),
        };

        let dash = ctx.render(&selection);
        assert_eq!(dash.visible_rows, 1);
        assert_eq!(dash.total_rows, 2);
        assert_eq!(dash.charts.trend, vec![MonthlyTotal { month: 1, sales: 100.0 }]);
        assert_eq!(dash.charts.scatter, vec![[100.0, 20.0]]);
        assert_eq!(dash.charts.pie.len(), 1);
        assert_eq!(dash.charts.pie[0].label, "US");
        assert_eq!(dash.charts.boxes.len(), 1);
        assert_eq!(dash.charts.histogram.len(), 1);
        assert_eq!(
            dash.title,
            "Financial Analysis - Products: A - Segments: X - Year Range: 2020 to 2020"
        );
    }

    #[test]
    fn empty_view_renders_blank_charts() {
        let mut ctx = context();
        ctx.set_policy(EmptySelection::Literal);
        let selection = Selection::full(ctx.dataset());

        let dash = ctx.render(&selection);
        assert_eq!(dash.visible_rows, 0);
        assert_eq!(dash.charts, Charts::default());
    }

    #[test]
    fn default_selection_shows_everything() {
        let ctx = context();
        let dash = ctx.render(&Selection::full(ctx.dataset()));
        assert_eq!(dash.visible_rows, 2);
        assert_eq!(dash.title, "Financial Analysis - Year Range: 2020 to 2021");
        assert_eq!(dash.charts.histogram.len(), 30);
    }

    #[test]
    fn title_lists_picks_in_option_order() {
        let ctx = context();
        let mut selection = Selection::full(ctx.dataset());
        selection.products = ["B".to_string(), "A".to_string()].into();
        assert!(title(ctx.dataset(), &selection).starts_with("Financial Analysis - Products: A, B - "));
    }

    #[test]
    fn reloading_keeps_settings() {
        let mut ctx = context();
        ctx.set_policy(EmptySelection::Literal);
        let reloaded = ctx.with_dataset(Dataset::default());
        assert_eq!(reloaded.policy(), EmptySelection::Literal);
        assert!(reloaded.dataset().is_empty());
    }
}
