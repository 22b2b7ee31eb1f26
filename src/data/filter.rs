use std::collections::BTreeSet;

use super::model::{Dataset, Record, YearRange};

// ---------------------------------------------------------------------------
// Selection: what the user picked in the filter panel
// ---------------------------------------------------------------------------

/// How an empty multi-select is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySelection {
    /// Nothing selected places no constraint on that dimension.
    #[default]
    MatchAll,
    /// Nothing selected matches no rows.
    Literal,
}

/// Product / segment picks plus an inclusive year interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub products: BTreeSet<String>,
    pub segments: BTreeSet<String>,
    pub years: YearRange,
}

impl Selection {
    /// The initial selection for a dataset: nothing picked, every year.
    pub fn full(dataset: &Dataset) -> Self {
        Self {
            products: BTreeSet::new(),
            segments: BTreeSet::new(),
            years: dataset.year_bounds.unwrap_or(YearRange::new(0, 0)),
        }
    }

    /// Whether one record passes every active constraint.
    pub fn matches(&self, record: &Record, policy: EmptySelection) -> bool {
        member(&self.products, &record.product, policy)
            && member(&self.segments, &record.segment, policy)
            && self.years.contains(record.year)
    }
}

fn member(selected: &BTreeSet<String>, value: &str, policy: EmptySelection) -> bool {
    if selected.is_empty() {
        return policy == EmptySelection::MatchAll;
    }
    selected.contains(value)
}

// ---------------------------------------------------------------------------
// FilteredView: the rows passing a selection
// ---------------------------------------------------------------------------

/// Indices into a [`Dataset`] of the records passing a selection, in
/// dataset order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + Clone + '_ {
        let dataset = self.dataset;
        self.indices().iter().map(move |&i| &dataset.records[i])
    }
}

/// Return the records of `dataset` that pass `selection`.
pub fn apply<'a>(
    dataset: &'a Dataset,
    selection: &Selection,
    policy: EmptySelection,
) -> FilteredView<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.matches(r, policy))
        .map(|(i, _)| i)
        .collect();

    FilteredView { dataset, indices }
}
