/// Terminal rendering of a `Dashboard`.
///
/// Produces the same page the web dashboard shows, as plain text: a title,
/// three KPI cards, the grouped tables, a likes-vs-views summary standing in
/// for the scatter chart and the top-10 table. Empty products render as empty
/// tables.

use crate::aggregate::GroupTotal;
use crate::pipeline::{Dashboard, TOP_N};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::fmt::Write;

pub const TITLE: &str = "YouTube Trending Videos Analytics";

/// Format a count with comma thousands separators.
///
/// ```
/// use trendboard::report::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)));
    table
}

fn number_cell(n: u64) -> Cell {
    Cell::new(format_count(n)).set_alignment(CellAlignment::Right)
}

fn kpi_table(dashboard: &Dashboard) -> Table {
    let mut table = new_table(&["Total Views", "Total Likes", "Total Comments"]);
    let kpis = dashboard.kpis;
    table.add_row(vec![
        number_cell(kpis.total_views),
        number_cell(kpis.total_likes),
        number_cell(kpis.total_comments),
    ]);
    table
}

fn group_table(key_header: &str, value_header: &str, groups: &[GroupTotal]) -> Table {
    let mut table = new_table(&[key_header, value_header]);
    for group in groups {
        table.add_row(vec![Cell::new(group.key.to_string()), number_cell(group.total)]);
    }
    table
}

/// Summarise the scatter series: point count and overall likes per view.
fn scatter_table(dashboard: &Dashboard) -> Table {
    let mut table = new_table(&["Points", "Total Views", "Total Likes", "Likes per View"]);
    let (views, likes) = dashboard
        .likes_vs_views
        .iter()
        .fold((0u64, 0u64), |(v, l), p| (v + p.views, l + p.likes));
    let ratio = if views == 0 { 0.0 } else { likes as f64 / views as f64 };
    table.add_row(vec![
        number_cell(dashboard.likes_vs_views.len() as u64),
        number_cell(views),
        number_cell(likes),
        Cell::new(format!("{:.4}", ratio)).set_alignment(CellAlignment::Right),
    ]);
    table
}

fn top_table(dashboard: &Dashboard) -> Table {
    let mut table = new_table(&["Title", "Channel", "Views", "Likes", "Comments"]);
    for video in &dashboard.top_videos {
        table.add_row(vec![
            Cell::new(&video.title),
            Cell::new(&video.channel_title),
            number_cell(video.views),
            number_cell(video.likes),
            number_cell(video.comment_count),
        ]);
    }
    table
}

/// Render the full dashboard page.
pub fn render(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "Rows matching filters: {}\n", format_count(dashboard.matched_rows as u64));
    let _ = writeln!(out, "{}\n", kpi_table(dashboard));

    let _ = writeln!(out, "Total Views by Category");
    let _ = writeln!(out, "{}\n", group_table("Category ID", "Views", &dashboard.views_by_category));

    let _ = writeln!(out, "Comments by Published Day");
    let _ = writeln!(out, "{}\n", group_table("Day", "Comments", &dashboard.comments_by_day));

    let _ = writeln!(out, "Views Distribution by Country");
    let _ = writeln!(out, "{}\n", group_table("Country", "Views", &dashboard.views_by_country));

    let _ = writeln!(out, "Likes vs Views");
    let _ = writeln!(out, "{}\n", scatter_table(dashboard));

    let _ = writeln!(out, "Top {TOP_N} Trending Videos by Views");
    let _ = writeln!(out, "{}", top_table(dashboard));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::pipeline::compute;
    use crate::record::VideoRecord;
    use crate::selection::FilterSelection;

    fn dataset() -> Dataset {
        Dataset::from_records(
            "t",
            vec![
                VideoRecord {
                    category_id: 10,
                    publish_country: "US".into(),
                    published_day_of_week: "Monday".into(),
                    views: 1_500_000,
                    likes: 42_000,
                    comment_count: 1_234,
                    title: "Big Premiere".into(),
                    channel_title: "Studio".into(),
                },
                VideoRecord {
                    category_id: 24,
                    publish_country: "GB".into(),
                    published_day_of_week: "Friday".into(),
                    views: 900,
                    likes: 10,
                    comment_count: 2,
                    title: "Small Vlog".into(),
                    channel_title: "Someone".into(),
                },
            ],
        )
    }

    #[test]
    fn test_format_count_boundaries() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(100_000), "100,000");
        assert_eq!(format_count(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_render_contains_sections() {
        let dataset = dataset();
        let text = render(&compute(&dataset, &FilterSelection::all(&dataset)));

        assert!(text.starts_with(TITLE));
        assert!(text.contains("1,500,900"));
        assert!(text.contains("Total Views by Category"));
        assert!(text.contains("Big Premiere"));
        assert!(text.contains("Small Vlog"));
        assert!(text.find("Big Premiere") < text.find("Small Vlog"));
    }

    #[test]
    fn test_render_likes_vs_views() {
        let dataset = dataset();
        let text = render(&compute(&dataset, &FilterSelection::all(&dataset)));

        assert!(text.contains("Likes vs Views"));
        assert!(text.find("Likes vs Views") < text.find("Top 10 Trending Videos by Views"));
        // 42,010 likes over 1,500,900 views
        assert!(text.contains("0.0280"));
        assert!(text.contains("42,010"));
    }

    #[test]
    fn test_render_empty_dashboard() {
        let dataset = dataset();
        let text = render(&compute(&dataset, &FilterSelection::none()));

        assert!(text.contains("Rows matching filters: 0"));
        assert!(text.contains("0.0000"));
        assert!(!text.contains("Big Premiere"));
        assert!(text.contains("Top 10 Trending Videos by Views"));
    }
}
