/// Group-by aggregation over a `FilterView`.
///
/// Groups the view's rows by one facet and sums one measure per group. Only
/// keys that occur in the view produce an output row; absent keys are omitted
/// rather than zero-filled.
///
/// Output order is key ascending: numeric for categories, byte-wise lexical
/// for countries and weekdays.

use crate::schema::{Facet, Measure};
use crate::selection::FacetValue;
use crate::view::FilterView;
use serde::Serialize;
use std::collections::BTreeMap;

/// One output row of a group-by: a facet key and its summed measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTotal {
    pub key: FacetValue,
    pub total: u64,
}

/// Sum `measure` per distinct `facet` key over the rows of `view`.
///
/// # Examples
///
/// ```
/// use trendboard::{group_sum, Dataset, Facet, FacetValue, FilterView, Measure, VideoRecord};
///
/// let dataset = Dataset::from_records("t", vec![
///     VideoRecord { category_id: 2, views: 200, ..Default::default() },
///     VideoRecord { category_id: 1, views: 100, ..Default::default() },
///     VideoRecord { category_id: 1, views: 50, ..Default::default() },
/// ]);
/// let totals = group_sum(&FilterView::all(&dataset), Facet::Category, Measure::Views);
///
/// assert_eq!(totals[0].key, FacetValue::Int(1));
/// assert_eq!(totals[0].total, 150);
/// assert_eq!(totals[1].total, 200);
/// ```
pub fn group_sum(view: &FilterView<'_>, facet: Facet, measure: Measure) -> Vec<GroupTotal> {
    let dataset = view.dataset();

    match facet {
        Facet::Category => {
            let mut totals: BTreeMap<i64, u64> = BTreeMap::new();
            for &i in view.indices() {
                *totals.entry(dataset.category_at(i)).or_insert(0) += dataset.measure_at(i, measure);
            }
            totals
                .into_iter()
                .map(|(key, total)| GroupTotal {
                    key: FacetValue::Int(key),
                    total,
                })
                .collect()
        }
        Facet::Country | Facet::Weekday => {
            let Some(interner) = dataset.facet_interner(facet) else {
                return Vec::new();
            };

            // Accumulate per interned id, then resolve and order by label
            let mut per_id: Vec<Option<u64>> = vec![None; interner.len()];
            for &i in view.indices() {
                let id = match facet {
                    Facet::Country => dataset.country_id_at(i),
                    _ => dataset.weekday_id_at(i),
                };
                *per_id[id as usize].get_or_insert(0) += dataset.measure_at(i, measure);
            }

            let totals: BTreeMap<&str, u64> = per_id
                .into_iter()
                .enumerate()
                .filter_map(|(id, total)| {
                    let total = total?;
                    interner.resolve(id as u32).map(|label| (label, total))
                })
                .collect();

            totals
                .into_iter()
                .map(|(label, total)| GroupTotal {
                    key: FacetValue::Text(label.to_string()),
                    total,
                })
                .collect()
        }
    }
}

/// Total views per category id.
pub fn views_by_category(view: &FilterView<'_>) -> Vec<GroupTotal> {
    group_sum(view, Facet::Category, Measure::Views)
}

/// Total comments per published weekday.
pub fn comments_by_day(view: &FilterView<'_>) -> Vec<GroupTotal> {
    group_sum(view, Facet::Weekday, Measure::CommentCount)
}

/// Total views per publish country.
pub fn views_by_country(view: &FilterView<'_>) -> Vec<GroupTotal> {
    group_sum(view, Facet::Country, Measure::Views)
}
