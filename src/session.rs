/// A single user's dashboard session.
///
/// The dataset is shared read-only behind an `Arc`; the selection belongs to
/// this session alone and is mutated in place by the user's interactions.
/// Every read of the dashboard recomputes it from scratch.

use crate::dataset::Dataset;
use crate::pipeline::{compute, Dashboard};
use crate::schema::Facet;
use crate::selection::{FacetOptions, FacetValue, FilterSelection};
use std::sync::Arc;

/// A selection over a shared dataset, mutated by one user's interactions.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use trendboard::{Dataset, Facet, Session, VideoRecord};
///
/// let dataset = Arc::new(Dataset::from_records("t", vec![
///     VideoRecord { category_id: 10, publish_country: "US".into(), published_day_of_week: "Monday".into(), views: 7, ..Default::default() },
///     VideoRecord { category_id: 24, publish_country: "US".into(), published_day_of_week: "Monday".into(), views: 3, ..Default::default() },
/// ]));
///
/// let mut session = Session::new(dataset);
/// assert_eq!(session.dashboard().kpis.total_views, 10);
///
/// session.toggle(Facet::Category, &24.into());
/// assert_eq!(session.dashboard().kpis.total_views, 7);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    selection: FilterSelection,
}

impl Session {
    /// Start a session with every facet value selected.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let selection = FilterSelection::all(&dataset);
        Session { dataset, selection }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    pub fn set_facet(&mut self, facet: Facet, values: &[FacetValue]) {
        self.selection.set_facet(facet, values);
    }

    /// Flip one value. Returns whether it is now selected.
    pub fn toggle(&mut self, facet: Facet, value: &FacetValue) -> bool {
        self.selection.toggle(facet, value)
    }

    pub fn select_all(&mut self, facet: Facet) {
        self.selection.select_all(facet, &self.dataset);
    }

    pub fn clear(&mut self, facet: Facet) {
        self.selection.clear(facet);
    }

    /// Restore the default all-values selection.
    pub fn reset(&mut self) {
        self.selection = FilterSelection::all(&self.dataset);
    }

    pub fn options(&self) -> FacetOptions {
        FacetOptions::from_dataset(&self.dataset)
    }

    pub fn dashboard(&self) -> Dashboard {
        compute(&self.dataset, &self.selection)
    }
}
