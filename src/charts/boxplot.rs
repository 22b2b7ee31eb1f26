use std::collections::HashMap;

/// Five-number summary of one category, Tukey style.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub label: String,
    pub count: usize,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    /// Values beyond 1.5 × IQR from the box.
    pub outliers: Vec<f64>,
}

/// Linear-interpolated quantile of an ascending slice. `p` in `[0, 1]`.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Summarise one group of values. `None` for an empty group.
pub fn summarize(label: &str, values: &[f64]) -> Option<BoxSummary> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let fence = 1.5 * (q3 - q1);
    let (low_fence, high_fence) = (q1 - fence, q3 + fence);

    let inside = sorted.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));
    let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
    let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| !(low_fence..=high_fence).contains(v))
        .collect();

    Some(BoxSummary {
        label: label.to_string(),
        count: sorted.len(),
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
    })
}

/// One box per category, in the order given by `categories`. Categories with
/// no values are skipped.
pub fn by_category<'a>(
    categories: &[String],
    values: impl IntoIterator<Item = (&'a str, f64)>,
) -> Vec<BoxSummary> {
    let mut groups: HashMap<&str, Vec<f64>> = HashMap::new();
    for (category, value) in values {
        groups.entry(category).or_default().push(value);
    }

    categories
        .iter()
        .filter_map(|c| summarize(c, groups.get(c.as_str())?))
        .collect()
}
