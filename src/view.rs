/// Trendboard Views
///
/// Views are read-only derived row sets over a `Dataset`. They hold parent row
/// indices only; row data is always read back from the dataset.
///
/// - `FilterView` keeps the rows matching a `FilterSelection`, in ingestion order.
/// - `SortedView` orders a filter view's rows by one measure, stably.

use crate::dataset::{Dataset, VideoRow};
use crate::interner::StringId;
use crate::schema::{Facet, Measure};
use crate::selection::FilterSelection;
use log::debug;
use std::collections::BTreeSet;

/// The rows of a dataset that pass a filter selection.
///
/// Maintains a mapping from view indices to parent indices. The mapping is
/// strictly increasing, so iteration follows the dataset's original order.
///
/// # Examples
///
/// ```
/// use trendboard::{Dataset, FilterSelection, FilterView, Measure, VideoRecord};
///
/// let dataset = Dataset::from_records("t", vec![
///     VideoRecord { category_id: 1, publish_country: "US".into(), published_day_of_week: "Mon".into(), views: 100, ..Default::default() },
///     VideoRecord { category_id: 2, publish_country: "CA".into(), published_day_of_week: "Mon".into(), views: 200, ..Default::default() },
/// ]);
///
/// let selection = FilterSelection::new([1], ["US", "CA"], ["Mon"]);
/// let view = FilterView::new(&dataset, &selection);
/// assert_eq!(view.len(), 1);
/// assert_eq!(view.sum(Measure::Views), 100);
/// ```
#[derive(Debug, Clone)]
pub struct FilterView<'a> {
    dataset: &'a Dataset,
    view_to_parent: Vec<usize>,
}

impl<'a> FilterView<'a> {
    pub fn new(dataset: &'a Dataset, selection: &FilterSelection) -> Self {
        let mut view = FilterView {
            dataset,
            view_to_parent: Vec::new(),
        };
        view.rebuild_index(selection);
        view
    }

    /// A view over every row of the dataset.
    pub fn all(dataset: &'a Dataset) -> Self {
        FilterView {
            dataset,
            view_to_parent: (0..dataset.len()).collect(),
        }
    }

    fn rebuild_index(&mut self, selection: &FilterSelection) {
        self.view_to_parent.clear();

        if !selection.matches_nothing() {
            // Resolve labels to interned ids once; labels the dataset never
            // saw have no id and match nothing.
            let countries = id_mask(self.dataset, Facet::Country, &selection.countries);
            let weekdays = id_mask(self.dataset, Facet::Weekday, &selection.weekdays);
            let selected = |mask: &[bool], id: StringId| mask.get(id as usize).copied().unwrap_or(false);

            for i in 0..self.dataset.len() {
                if selection.categories.contains(&self.dataset.category_at(i))
                    && selected(&countries, self.dataset.country_id_at(i))
                    && selected(&weekdays, self.dataset.weekday_id_at(i))
                {
                    self.view_to_parent.push(i);
                }
            }
        }

        debug!(
            "Filtered '{}': {} of {} rows",
            self.dataset.name(),
            self.view_to_parent.len(),
            self.dataset.len()
        );
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn len(&self) -> usize {
        self.view_to_parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_to_parent.is_empty()
    }

    /// Parent row indices, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.view_to_parent
    }

    pub fn get_row(&self, index: usize) -> Result<VideoRow<'a>, String> {
        let parent_index = self
            .view_to_parent
            .get(index)
            .ok_or_else(|| format!("Index {} out of range [0, {})", index, self.len()))?;
        self.dataset.get_row(*parent_index)
    }

    pub fn rows(&self) -> impl Iterator<Item = VideoRow<'a>> + '_ {
        let dataset = self.dataset;
        self.view_to_parent.iter().map(move |&i| dataset.row_unchecked(i))
    }

    /// Sum a measure over the view. An empty view sums to zero.
    pub fn sum(&self, measure: Measure) -> u64 {
        self.view_to_parent
            .iter()
            .map(|&i| self.dataset.measure_at(i, measure))
            .sum()
    }
}

/// Build a lookup table indexed by interned id: `mask[id]` is true when the
/// id's label is selected.
fn id_mask(dataset: &Dataset, facet: Facet, labels: &BTreeSet<String>) -> Vec<bool> {
    let Some(interner) = dataset.facet_interner(facet) else {
        return Vec::new();
    };
    let mut mask = vec![false; interner.len()];
    for id in labels.iter().filter_map(|label| interner.lookup(label)) {
        mask[id as usize] = true;
    }
    mask
}

/// Sort order specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (smallest first)
    Ascending,
    /// Descending order (largest first)
    Descending,
}

/// A SortedView presents the rows of a `FilterView` ordered by one measure.
///
/// The sort is stable: rows with equal values keep their original dataset
/// order, which makes "top N" selections deterministic.
///
/// # Examples
///
/// ```
/// use trendboard::{Dataset, FilterView, Measure, SortOrder, SortedView, VideoRecord};
///
/// let dataset = Dataset::from_records("t", vec![
///     VideoRecord { title: "a".into(), views: 50, ..Default::default() },
///     VideoRecord { title: "b".into(), views: 90, ..Default::default() },
///     VideoRecord { title: "c".into(), views: 50, ..Default::default() },
/// ]);
/// let view = FilterView::all(&dataset);
/// let sorted = SortedView::new(&view, Measure::Views, SortOrder::Descending);
///
/// let titles: Vec<&str> = sorted.top(3).map(|r| r.title).collect();
/// assert_eq!(titles, vec!["b", "a", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct SortedView<'a> {
    dataset: &'a Dataset,
    measure: Measure,
    order: SortOrder,
    /// Sorted index: sorted_index[view_pos] = parent_row_index
    sorted_index: Vec<usize>,
}

impl<'a> SortedView<'a> {
    pub fn new(view: &FilterView<'a>, measure: Measure, order: SortOrder) -> Self {
        let dataset = view.dataset();
        let mut sorted_index = view.indices().to_vec();

        // `sort_by` is stable and the input is ascending by parent index, so
        // ties stay in dataset order.
        sorted_index.sort_by(|&a, &b| {
            let cmp = dataset.measure_at(a, measure).cmp(&dataset.measure_at(b, measure));
            match order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        });

        SortedView {
            dataset,
            measure,
            order,
            sorted_index,
        }
    }

    pub fn len(&self) -> usize {
        self.sorted_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_index.is_empty()
    }

    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Get a row at the given view position (sorted order)
    pub fn get_row(&self, index: usize) -> Result<VideoRow<'a>, String> {
        let parent_index = self
            .sorted_index
            .get(index)
            .ok_or_else(|| format!("Index {} out of range [0, {})", index, self.len()))?;
        self.dataset.get_row(*parent_index)
    }

    /// Returns the parent dataset row index for a given view position
    pub fn get_parent_index(&self, view_index: usize) -> Option<usize> {
        self.sorted_index.get(view_index).copied()
    }

    /// The first `n` rows in sorted order, or all of them if there are fewer.
    pub fn top(&self, n: usize) -> impl Iterator<Item = VideoRow<'a>> + '_ {
        let dataset = self.dataset;
        self.sorted_index
            .iter()
            .take(n)
            .map(move |&i| dataset.row_unchecked(i))
    }
}
