/// One wedge of a proportional chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Share of the positive total, in `[0, 1]`.
    pub fraction: f64,
}

/// Sum values per label and turn them into slices, largest first.
///
/// Labels whose sum is zero or negative are left out: a wedge cannot have
/// negative area. Ties keep first-appearance order.
pub fn slices<'a>(values: impl IntoIterator<Item = (&'a str, f64)>) -> Vec<PieSlice> {
    let mut sums: Vec<(&str, f64)> = Vec::new();
    for (label, value) in values {
        match sums.iter_mut().find(|(l, _)| *l == label) {
            Some((_, sum)) => *sum += value,
            None => sums.push((label, value)),
        }
    }

    let dropped = sums.iter().filter(|(_, v)| *v <= 0.0).count();
    if dropped > 0 {
        log::debug!("pie: omitting {dropped} label(s) with non-positive totals");
    }
    sums.retain(|(_, v)| *v > 0.0);
    sums.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total: f64 = sums.iter().map(|(_, v)| v).sum();
    sums.into_iter()
        .map(|(label, value)| PieSlice {
            label: label.to_string(),
            value,
            fraction: value / total,
        })
        .collect()
}
