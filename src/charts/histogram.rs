/// Bin count used for the cost distribution chart.
pub const DEFAULT_BINS: usize = 30;

/// One equal-width bin. `start` is inclusive; `end` is exclusive except for
/// the last bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// `count / (n * width)`; the bars integrate to 1.
    pub density: f64,
    /// `100 * count / n`.
    pub percent: f64,
}

impl HistogramBin {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Bin `values` into `bins` equal-width buckets over `[min, max]`.
///
/// Non-finite values are ignored. When every value is equal the result is a
/// single unit-wide bin centred on that value.
pub fn density(values: impl IntoIterator<Item = f64>, bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let (start, width, bins) = if max > min {
        (min, (max - min) / bins as f64, bins)
    } else {
        (min - 0.5, 1.0, 1)
    };

    let mut counts = vec![0usize; bins];
    for v in &values {
        let idx = ((v - start) / width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    let n = values.len() as f64;
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: start + i as f64 * width,
            end: start + (i + 1) as f64 * width,
            count,
            density: count as f64 / (n * width),
            percent: 100.0 * count as f64 / n,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn max_value_lands_in_last_bin() {
        let bins = density(vec![0.0, 5.0, 10.0], 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 2);
        assert_eq!(bins[1].end, 10.0);
    }

    #[test]
    fn constant_values_get_one_unit_bin() {
        let bins = density(vec![4.0, 4.0, 4.0], DEFAULT_BINS);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].center(), 4.0);
        assert_eq!(bins[0].density, 1.0);
        assert_eq!(bins[0].percent, 100.0);
    }

    #[test]
    fn empty_input_has_no_bins() {
        assert!(density(Vec::new(), DEFAULT_BINS).is_empty());
        assert!(density(vec![f64::NAN], DEFAULT_BINS).is_empty());
    }

    proptest! {
        #[test]
        fn density_integrates_to_one(
            values in prop::collection::vec(0.0f64..1_000_000.0, 1..200),
            bins in 1usize..50,
        ) {
            let hist = density(values.clone(), bins);
            let area: f64 = hist.iter().map(|b| b.density * b.width()).sum();
            let percent: f64 = hist.iter().map(|b| b.percent).sum();
            let count: usize = hist.iter().map(|b| b.count).sum();

            prop_assert!((area - 1.0).abs() < 1e-6);
            prop_assert!((percent - 100.0).abs() < 1e-9);
            prop_assert_eq!(count, values.len());
        }
    }
}
