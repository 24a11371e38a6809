/// Trendboard schema
///
/// The trending-video CSV has many columns; the dashboard reads eight of them.
/// `Facet` names the three filterable dimensions and `Measure` the three
/// summed counters.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const CATEGORY_ID: &str = "category_id";
pub const PUBLISH_COUNTRY: &str = "publish_country";
pub const PUBLISHED_DAY_OF_WEEK: &str = "published_day_of_week";
pub const VIEWS: &str = "views";
pub const LIKES: &str = "likes";
pub const COMMENT_COUNT: &str = "comment_count";
pub const TITLE: &str = "title";
pub const CHANNEL_TITLE: &str = "channel_title";

/// Columns that must be present in the header row. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    CATEGORY_ID,
    PUBLISH_COUNTRY,
    PUBLISHED_DAY_OF_WEEK,
    VIEWS,
    LIKES,
    COMMENT_COUNT,
    TITLE,
    CHANNEL_TITLE,
];

/// A filterable dimension of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Category,
    Country,
    Weekday,
}

impl Facet {
    pub const ALL: [Facet; 3] = [Facet::Category, Facet::Country, Facet::Weekday];

    /// The CSV column backing this facet.
    pub fn column(&self) -> &'static str {
        match self {
            Facet::Category => CATEGORY_ID,
            Facet::Country => PUBLISH_COUNTRY,
            Facet::Weekday => PUBLISHED_DAY_OF_WEEK,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Facet::Category => "category",
            Facet::Country => "country",
            Facet::Weekday => "weekday",
        };
        f.write_str(name)
    }
}

/// A summed numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Views,
    Likes,
    CommentCount,
}

impl Measure {
    pub fn column(&self) -> &'static str {
        match self {
            Measure::Views => VIEWS,
            Measure::Likes => LIKES,
            Measure::CommentCount => COMMENT_COUNT,
        }
    }
}

/// Header layout of a loaded CSV file.
///
/// # Examples
///
/// ```
/// use trendboard::Schema;
///
/// let schema = Schema::new(vec!["video_id".to_string(), "views".to_string()]);
/// assert_eq!(schema.get_column_index("views"), Some(1));
/// assert_eq!(schema.missing_required(), Some("category_id"));
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new(columns: Vec<String>) -> Self {
        Schema { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|n| n == name)
    }

    /// Returns the first required column absent from this schema, if any.
    pub fn missing_required(&self) -> Option<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .find(|col| self.get_column_index(col).is_none())
    }
}
