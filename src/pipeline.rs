/// The filter-and-aggregate pipeline.
///
/// `compute` is a pure function of a dataset and a selection: it filters the
/// rows, then derives every dashboard product from the filtered view. It keeps
/// no state between calls, so equal inputs always give equal outputs.

use crate::aggregate::{comments_by_day, views_by_category, views_by_country, GroupTotal};
use crate::dataset::{Dataset, VideoRow};
use crate::schema::Measure;
use crate::selection::FilterSelection;
use crate::view::{FilterView, SortOrder, SortedView};
use serde::Serialize;

/// Number of rows in the top-videos table.
pub const TOP_N: usize = 10;

/// Headline totals over the filtered rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
}

/// One point of the likes-vs-views scatter chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScatterPoint {
    pub views: u64,
    pub likes: u64,
}

/// A row of the top-videos table, projected to the displayed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopVideo {
    pub title: String,
    pub channel_title: String,
    pub views: u64,
    pub likes: u64,
    pub comment_count: u64,
}

impl From<VideoRow<'_>> for TopVideo {
    fn from(row: VideoRow<'_>) -> Self {
        TopVideo {
            title: row.title.to_string(),
            channel_title: row.channel_title.to_string(),
            views: row.views,
            likes: row.likes,
            comment_count: row.comment_count,
        }
    }
}

/// Everything the presentation layer renders for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Number of rows that passed the filter
    pub matched_rows: usize,
    pub kpis: Kpis,
    pub views_by_category: Vec<GroupTotal>,
    pub comments_by_day: Vec<GroupTotal>,
    pub views_by_country: Vec<GroupTotal>,
    pub likes_vs_views: Vec<ScatterPoint>,
    pub top_videos: Vec<TopVideo>,
}

impl Dashboard {
    pub fn is_empty(&self) -> bool {
        self.matched_rows == 0
    }
}

/// Filter the dataset by `selection` and derive every dashboard product.
///
/// # Examples
///
/// ```
/// use trendboard::{compute, Dataset, FilterSelection, VideoRecord};
///
/// let row = |category_id, country: &str, day: &str, views| VideoRecord {
///     category_id,
///     publish_country: country.into(),
///     published_day_of_week: day.into(),
///     views,
///     ..Default::default()
/// };
/// let dataset = Dataset::from_records("t", vec![
///     row(1, "US", "Mon", 100),
///     row(1, "US", "Tue", 50),
///     row(2, "CA", "Mon", 200),
/// ]);
///
/// let dashboard = compute(&dataset, &FilterSelection::all(&dataset));
/// assert_eq!(dashboard.kpis.total_views, 350);
/// let top: Vec<u64> = dashboard.top_videos.iter().map(|v| v.views).collect();
/// assert_eq!(top, vec![200, 100, 50]);
/// ```
pub fn compute(dataset: &Dataset, selection: &FilterSelection) -> Dashboard {
    let view = FilterView::new(dataset, selection);
    compute_view(&view)
}

/// Derive every dashboard product from an already-filtered view.
pub fn compute_view(view: &FilterView<'_>) -> Dashboard {
    Dashboard {
        matched_rows: view.len(),
        kpis: kpis(view),
        views_by_category: views_by_category(view),
        comments_by_day: comments_by_day(view),
        views_by_country: views_by_country(view),
        likes_vs_views: likes_vs_views(view),
        top_videos: top_videos(view, TOP_N),
    }
}

pub fn kpis(view: &FilterView<'_>) -> Kpis {
    Kpis {
        total_views: view.sum(Measure::Views),
        total_likes: view.sum(Measure::Likes),
        total_comments: view.sum(Measure::CommentCount),
    }
}

pub fn likes_vs_views(view: &FilterView<'_>) -> Vec<ScatterPoint> {
    view.rows()
        .map(|row| ScatterPoint {
            views: row.views,
            likes: row.likes,
        })
        .collect()
}

/// The `limit` most-viewed rows, ties kept in dataset order.
pub fn top_videos(view: &FilterView<'_>, limit: usize) -> Vec<TopVideo> {
    SortedView::new(view, Measure::Views, SortOrder::Descending)
        .top(limit)
        .map(TopVideo::from)
        .collect()
}
