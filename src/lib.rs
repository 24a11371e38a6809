/// Trendboard - YouTube Trending Videos Analytics
///
/// Loads a trending-videos CSV into a columnar dataset once, then answers
/// filter selections over category, country and publish weekday with KPI
/// totals, grouped sums and a top-10 list. The pipeline is pure: the same
/// dataset and selection always produce the same dashboard.

pub mod error;
pub mod interner;
pub mod schema;
pub mod record;
pub mod dataset;
pub mod selection;
pub mod view;
pub mod aggregate;
pub mod pipeline;
pub mod session;
pub mod report;
pub mod config;

pub use error::{DataError, DataResult};
pub use interner::{StringInterner, StringId, InternerStats};
pub use schema::{Facet, Measure, Schema};
pub use record::VideoRecord;
pub use dataset::{Dataset, VideoRow};
pub use selection::{FacetOptions, FacetValue, FilterSelection};
pub use view::{FilterView, SortedView, SortOrder};
pub use aggregate::{group_sum, GroupTotal};
pub use pipeline::{compute, Dashboard, Kpis, ScatterPoint, TopVideo, TOP_N};
pub use session::Session;
pub use config::{Config, ConfigError};

// WebSocket server modules - only when server feature is enabled
#[cfg(feature = "server")]
pub mod messages;
#[cfg(feature = "server")]
pub mod websocket;
#[cfg(feature = "server")]
pub mod server;

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::sync::Arc;

    const CSV: &str = "\
video_id,title,channel_title,category_id,publish_country,published_day_of_week,views,likes,dislikes,comment_count
a1,Launch Trailer,Studio One,24,US,Monday,5000,300,4,120
b2,Cooking Live,Kitchen,26,CA,Friday,800,40,1,15
c3,Match Recap,Sports Net,17,US,Friday,12000,900,30,410
d4,Daily Vlog,Someone,22,GB,Monday,300,20,0,3
e5,Trailer Reaction,Studio One,24,CA,Monday,5000,150,2,60
";

    #[test]
    fn test_complete_workflow() {
        let dataset = Dataset::from_reader("trending", CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.categories(), vec![17, 22, 24, 26]);

        // Default selection covers the whole dataset
        let all = compute(&dataset, &FilterSelection::all(&dataset));
        assert_eq!(all.matched_rows, 5);
        assert_eq!(all.kpis.total_views, 23100);
        assert_eq!(all.kpis.total_likes, 1410);
        assert_eq!(all.kpis.total_comments, 608);
        assert_eq!(all.top_videos[0].title, "Match Recap");
        // Tied views keep file order
        assert_eq!(all.top_videos[1].title, "Launch Trailer");
        assert_eq!(all.top_videos[2].title, "Trailer Reaction");

        // Narrow to Mondays in the US and CA
        let selection = FilterSelection::new(
            dataset.categories(),
            ["US", "CA"],
            ["Monday"],
        );
        let monday = compute(&dataset, &selection);
        assert_eq!(monday.matched_rows, 2);
        assert_eq!(monday.views_by_category.len(), 1);
        assert_eq!(monday.views_by_category[0].key, FacetValue::Int(24));
        assert_eq!(monday.views_by_category[0].total, 10000);
        assert_eq!(monday.comments_by_day[0].total, 180);
        let countries: Vec<String> = monday
            .views_by_country
            .iter()
            .map(|g| g.key.as_label())
            .collect();
        assert_eq!(countries, vec!["CA", "US"]);
    }

    #[test]
    fn test_session_matches_pure_pipeline() {
        let dataset = Arc::new(Dataset::from_reader("trending", CSV.as_bytes()).unwrap());
        let mut session = Session::new(Arc::clone(&dataset));

        session.toggle(Facet::Country, &FacetValue::from("US"));
        session.toggle(Facet::Weekday, &FacetValue::from("Friday"));

        let expected = compute(&dataset, session.selection());
        assert_eq!(session.dashboard(), expected);
        assert_eq!(expected.matched_rows, 2);
        assert_eq!(expected.kpis.total_views, 5300);
    }
}
