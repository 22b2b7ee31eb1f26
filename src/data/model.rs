use serde::Deserialize;

use super::cell;

// ---------------------------------------------------------------------------
// Record – one row of the financial table
// ---------------------------------------------------------------------------

/// A single financial record. Field names on the wire match the trimmed
/// column headers of the source file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Segment")]
    pub segment: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Year", deserialize_with = "cell::integer")]
    pub year: i32,
    /// Calendar month, 1–12.
    #[serde(rename = "Month Number", deserialize_with = "cell::integer")]
    pub month: u32,
    #[serde(rename = "Sales", deserialize_with = "cell::amount")]
    pub sales: f64,
    #[serde(rename = "Profit", deserialize_with = "cell::amount")]
    pub profit: f64,
    #[serde(rename = "COGS", deserialize_with = "cell::amount")]
    pub cogs: f64,
}

/// Column names every input file must carry (after header trimming).
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Product",
    "Segment",
    "Country",
    "Year",
    "Month Number",
    "Sales",
    "Profit",
    "COGS",
];

// ---------------------------------------------------------------------------
// YearRange – inclusive interval of years
// ---------------------------------------------------------------------------

/// Inclusive year interval. Callers keep `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the option lists the selection controls need.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Distinct products in order of first appearance.
    pub products: Vec<String>,
    /// Distinct segments in order of first appearance.
    pub segments: Vec<String>,
    /// Distinct countries in order of first appearance.
    pub countries: Vec<String>,
    /// Smallest and largest year present; `None` when there are no records.
    pub year_bounds: Option<YearRange>,
}

impl Dataset {
    /// Build option lists from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut products = Vec::new();
        let mut segments = Vec::new();
        let mut countries = Vec::new();
        let mut year_bounds: Option<YearRange> = None;

        for r in &records {
            push_distinct(&mut products, &r.product);
            push_distinct(&mut segments, &r.segment);
            push_distinct(&mut countries, &r.country);
            year_bounds = Some(match year_bounds {
                None => YearRange::new(r.year, r.year),
                Some(b) => YearRange::new(b.min.min(r.year), b.max.max(r.year)),
            });
        }

        Dataset {
            records,
            products,
            segments,
            countries,
            year_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::too_many_arguments)]
pub(crate) fn record(
    product: &str,
    segment: &str,
    country: &str,
    year: i32,
    month: u32,
    sales: f64,
    profit: f64,
    cogs: f64,
) -> Record {
    Record {
        product: product.to_string(),
        segment: segment.to_string(),
        country: country.to_string(),
        year,
        month,
        sales,
        profit,
        cogs,
    }
}
