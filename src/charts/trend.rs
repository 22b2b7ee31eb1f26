use std::collections::BTreeMap;

use crate::data::model::Record;

/// Total sales for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    pub month: u32,
    pub sales: f64,
}

/// Group records by month number and sum sales, ascending by month.
pub fn monthly_sales<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<u32, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.month).or_default() += r.sales;
    }
    totals
        .into_iter()
        .map(|(month, sales)| MonthlyTotal { month, sales })
        .collect()
}
