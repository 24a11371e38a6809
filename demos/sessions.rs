/// Sessions Example
///
/// This example demonstrates:
/// - Sharing one loaded Dataset between several sessions
/// - Each session holding its own filter selection
/// - Sorted views over a filtered view

use std::sync::Arc;
use trendboard::{
    Dataset, Facet, FacetValue, FilterView, Measure, Session, SortOrder, SortedView, VideoRecord,
};

fn record(title: &str, category_id: i64, country: &str, day: &str, views: u64, likes: u64) -> VideoRecord {
    VideoRecord {
        category_id,
        publish_country: country.to_string(),
        published_day_of_week: day.to_string(),
        views,
        likes,
        comment_count: likes / 10,
        title: title.to_string(),
        channel_title: format!("{} channel", country),
    }
}

fn main() {
    println!("=== Trendboard Sessions Example ===\n");

    let dataset = Arc::new(Dataset::from_records(
        "in-memory",
        vec![
            record("Morning News", 25, "US", "Monday", 90_000, 1_200),
            record("Goal of the Week", 17, "GB", "Saturday", 150_000, 9_000),
            record("Street Food Tour", 19, "IN", "Sunday", 60_000, 4_100),
            record("Keynote Live", 28, "US", "Tuesday", 400_000, 22_000),
            record("Cup Final", 17, "IN", "Sunday", 310_000, 18_500),
        ],
    ));

    // 1. Two sessions over the same data
    println!("1. Creating two sessions...");
    let mut sports_fan = Session::new(Arc::clone(&dataset));
    let mut us_viewer = Session::new(Arc::clone(&dataset));

    sports_fan.set_facet(Facet::Category, &[FacetValue::Int(17)]);
    us_viewer.set_facet(Facet::Country, &[FacetValue::from("US")]);

    for (name, session) in [("sports fan", &sports_fan), ("US viewer", &us_viewer)] {
        let dashboard = session.dashboard();
        println!(
            "   {:<10} rows={} views={} top={:?}",
            name,
            dashboard.matched_rows,
            dashboard.kpis.total_views,
            dashboard.top_videos.first().map(|v| v.title.as_str())
        );
    }

    // 2. Reset one session; the other is unaffected
    println!("\n2. Resetting the sports fan session...");
    sports_fan.reset();
    println!("   sports fan rows={}", sports_fan.dashboard().matched_rows);
    println!("   US viewer rows={}", us_viewer.dashboard().matched_rows);
    us_viewer.select_all(Facet::Country);

    // 3. Sorted views, least-liked first
    println!("\n3. Sorted by likes ascending:");
    let view = FilterView::all(&dataset);
    let sorted = SortedView::new(&view, Measure::Likes, SortOrder::Ascending);
    for row in sorted.top(sorted.len()) {
        println!("   {:<18} {:>6} likes", row.title, row.likes);
    }

    println!("\n=== Example Complete ===");
}
