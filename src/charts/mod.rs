/// Chart data: pure computations over a filtered view.
///
/// Nothing in here touches egui; `ui::plot` draws what these produce.

pub mod boxplot;
pub mod histogram;
pub mod pie;
pub mod trend;

use crate::data::filter::FilteredView;
use crate::data::model::Dataset;

use boxplot::BoxSummary;
use histogram::HistogramBin;
use pie::PieSlice;
use trend::MonthlyTotal;

pub const TREND_HEADER: &str = "Total Revenue Over Time";
pub const SCATTER_HEADER: &str = "Profit vs. Revenue";
pub const BOX_HEADER: &str = "Revenue Distribution by Product";
pub const PIE_HEADER: &str = "Country Wise Profit Distribution";
pub const HISTOGRAM_HEADER: &str = "Cost Distribution";

/// Everything the five charts need for one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Charts {
    /// Sales summed per month number.
    pub trend: Vec<MonthlyTotal>,
    /// `[sales, profit]` per record.
    pub scatter: Vec<[f64; 2]>,
    /// Sales distribution per product.
    pub boxes: Vec<BoxSummary>,
    /// Profit share per country.
    pub pie: Vec<PieSlice>,
    /// COGS probability density.
    pub histogram: Vec<HistogramBin>,
}

impl Charts {
    pub fn compute(dataset: &Dataset, view: &FilteredView<'_>, bins: usize) -> Self {
        let records = view.records();
        Charts {
            trend: trend::monthly_sales(records.clone()),
            scatter: records.clone().map(|r| [r.sales, r.profit]).collect(),
            boxes: boxplot::by_category(
                &dataset.products,
                records.clone().map(|r| (r.product.as_str(), r.sales)),
            ),
            pie: pie::slices(records.clone().map(|r| (r.country.as_str(), r.profit))),
            histogram: histogram::density(records.map(|r| r.cogs), bins),
        }
    }
}
