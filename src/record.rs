/// One trending-video observation as read from the CSV.
use crate::error::{DataError, DataResult};
use crate::schema::{Facet, Measure};
use serde::{Deserialize, Serialize};

/// An owned, validated row ready to be appended to a `Dataset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub category_id: i64,
    pub publish_country: String,
    pub published_day_of_week: String,
    pub views: u64,
    pub likes: u64,
    pub comment_count: u64,
    pub title: String,
    pub channel_title: String,
}

/// Raw CSV row. Columns not named here are skipped by the deserializer.
/// Numeric cells stay text so that a bad value can be reported with its line.
#[derive(Debug, Deserialize)]
pub(crate) struct RawVideoRecord {
    category_id: String,
    publish_country: String,
    published_day_of_week: String,
    views: String,
    likes: String,
    comment_count: String,
    title: String,
    channel_title: String,
}

impl RawVideoRecord {
    pub(crate) fn validate(self, line: u64) -> DataResult<VideoRecord> {
        let category_id = self
            .category_id
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(line, Facet::Category.column(), &self.category_id))?;

        Ok(VideoRecord {
            category_id,
            views: parse_count(line, Measure::Views, &self.views)?,
            likes: parse_count(line, Measure::Likes, &self.likes)?,
            comment_count: parse_count(line, Measure::CommentCount, &self.comment_count)?,
            publish_country: self.publish_country,
            published_day_of_week: self.published_day_of_week,
            title: self.title,
            channel_title: self.channel_title,
        })
    }
}

/// Parse a non-negative counter. Empty cells count as zero.
fn parse_count(line: u64, measure: Measure, value: &str) -> DataResult<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| invalid(line, measure.column(), value))
}

fn invalid(line: u64, column: &str, value: &str) -> DataError {
    DataError::InvalidValue {
        line,
        column: column.to_string(),
        value: value.to_string(),
    }
}
