/// Filter selection: the three facet value sets a user has ticked.
///
/// A row passes the filter when its category, country and weekday are each in
/// the corresponding set. An empty set therefore matches nothing; it never
/// means "ignore this facet". Values absent from the dataset are kept as-is
/// and simply match no rows.

use crate::dataset::Dataset;
use crate::schema::Facet;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A facet value as it crosses the wire.
///
/// Category ids are integers, countries and weekdays are text, but either form
/// is accepted for any facet: `"10"` selects category 10 and `10` selects a
/// country literally named "10".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Int(i64),
    Text(String),
}

impl FacetValue {
    /// Interpret the value as a category id, if it is one.
    pub fn as_category(&self) -> Option<i64> {
        match self {
            FacetValue::Int(v) => Some(*v),
            FacetValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Interpret the value as a country or weekday label.
    pub fn as_label(&self) -> String {
        match self {
            FacetValue::Int(v) => v.to_string(),
            FacetValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetValue::Int(v) => write!(f, "{}", v),
            FacetValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FacetValue {
    fn from(v: i64) -> Self {
        FacetValue::Int(v)
    }
}

impl From<&str> for FacetValue {
    fn from(s: &str) -> Self {
        FacetValue::Text(s.to_string())
    }
}

impl From<String> for FacetValue {
    fn from(s: String) -> Self {
        FacetValue::Text(s)
    }
}

/// Selected values per facet. Every field is a set, so order and duplicates
/// on the wire do not matter.
///
/// # Examples
///
/// ```
/// use trendboard::{Dataset, Facet, FacetValue, FilterSelection, VideoRecord};
///
/// let dataset = Dataset::from_records("t", vec![
///     VideoRecord { category_id: 10, publish_country: "US".into(), published_day_of_week: "Monday".into(), ..Default::default() },
///     VideoRecord { category_id: 24, publish_country: "GB".into(), published_day_of_week: "Friday".into(), ..Default::default() },
/// ]);
///
/// let mut selection = FilterSelection::all(&dataset);
/// assert!(selection.contains(Facet::Category, &FacetValue::Int(24)));
///
/// selection.toggle(Facet::Category, &FacetValue::Int(24));
/// assert_eq!(selection.categories.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(deserialize_with = "deserialize_categories")]
    pub categories: BTreeSet<i64>,
    #[serde(deserialize_with = "deserialize_labels")]
    pub countries: BTreeSet<String>,
    #[serde(deserialize_with = "deserialize_labels")]
    pub weekdays: BTreeSet<String>,
}

/// Accept integer or text category ids; text that is not an integer is dropped.
fn deserialize_categories<'de, D>(deserializer: D) -> Result<BTreeSet<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<FacetValue>::deserialize(deserializer)?;
    Ok(values.iter().filter_map(FacetValue::as_category).collect())
}

fn deserialize_labels<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<FacetValue>::deserialize(deserializer)?;
    Ok(values.iter().map(FacetValue::as_label).collect())
}

impl FilterSelection {
    pub fn new<C, S, W>(categories: C, countries: S, weekdays: W) -> Self
    where
        C: IntoIterator<Item = i64>,
        S: IntoIterator,
        S::Item: Into<String>,
        W: IntoIterator,
        W::Item: Into<String>,
    {
        FilterSelection {
            categories: categories.into_iter().collect(),
            countries: countries.into_iter().map(Into::into).collect(),
            weekdays: weekdays.into_iter().map(Into::into).collect(),
        }
    }

    /// The default selection: every distinct value of every facet.
    pub fn all(dataset: &Dataset) -> Self {
        FilterSelection::new(dataset.categories(), dataset.countries(), dataset.weekdays())
    }

    /// A selection matching no rows.
    pub fn none() -> Self {
        FilterSelection {
            categories: BTreeSet::new(),
            countries: BTreeSet::new(),
            weekdays: BTreeSet::new(),
        }
    }

    pub fn contains(&self, facet: Facet, value: &FacetValue) -> bool {
        match facet {
            Facet::Category => value
                .as_category()
                .map_or(false, |c| self.categories.contains(&c)),
            Facet::Country => self.countries.contains(&value.as_label()),
            Facet::Weekday => self.weekdays.contains(&value.as_label()),
        }
    }

    /// Number of values selected for a facet.
    pub fn facet_len(&self, facet: Facet) -> usize {
        match facet {
            Facet::Category => self.categories.len(),
            Facet::Country => self.countries.len(),
            Facet::Weekday => self.weekdays.len(),
        }
    }

    /// The selected values of a facet, in ascending order.
    pub fn values(&self, facet: Facet) -> Vec<FacetValue> {
        match facet {
            Facet::Category => self.categories.iter().map(|&c| FacetValue::Int(c)).collect(),
            Facet::Country => self.countries.iter().cloned().map(FacetValue::Text).collect(),
            Facet::Weekday => self.weekdays.iter().cloned().map(FacetValue::Text).collect(),
        }
    }

    /// Replace one facet's values, leaving the other two untouched.
    ///
    /// Category values that are not integers can never match a row and are
    /// dropped.
    pub fn set_facet(&mut self, facet: Facet, values: &[FacetValue]) {
        match facet {
            Facet::Category => {
                self.categories = values.iter().filter_map(FacetValue::as_category).collect();
            }
            Facet::Country => {
                self.countries = values.iter().map(FacetValue::as_label).collect();
            }
            Facet::Weekday => {
                self.weekdays = values.iter().map(FacetValue::as_label).collect();
            }
        }
    }

    /// Flip one value of a facet. Returns whether the value is now selected.
    pub fn toggle(&mut self, facet: Facet, value: &FacetValue) -> bool {
        match facet {
            Facet::Category => match value.as_category() {
                Some(c) => toggle_in(&mut self.categories, c),
                None => false,
            },
            Facet::Country => toggle_in(&mut self.countries, value.as_label()),
            Facet::Weekday => toggle_in(&mut self.weekdays, value.as_label()),
        }
    }

    /// Select every distinct value of one facet.
    pub fn select_all(&mut self, facet: Facet, dataset: &Dataset) {
        match facet {
            Facet::Category => self.categories = dataset.categories().into_iter().collect(),
            Facet::Country => {
                self.countries = dataset.countries().into_iter().map(String::from).collect()
            }
            Facet::Weekday => {
                self.weekdays = dataset.weekdays().into_iter().map(String::from).collect()
            }
        }
    }

    pub fn clear(&mut self, facet: Facet) {
        match facet {
            Facet::Category => self.categories.clear(),
            Facet::Country => self.countries.clear(),
            Facet::Weekday => self.weekdays.clear(),
        }
    }

    /// True when at least one facet is empty, so no row can match.
    pub fn matches_nothing(&self) -> bool {
        Facet::ALL.iter().any(|&f| self.facet_len(f) == 0)
    }
}

fn toggle_in<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

/// Distinct values available for each facet, offered to filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub categories: Vec<i64>,
    pub countries: Vec<String>,
    pub weekdays: Vec<String>,
}

impl FacetOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        FacetOptions {
            categories: dataset.categories(),
            countries: dataset.countries().into_iter().map(String::from).collect(),
            weekdays: dataset.weekdays().into_iter().map(String::from).collect(),
        }
    }
}
