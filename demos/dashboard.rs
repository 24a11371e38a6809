/// Dashboard Example
///
/// This example demonstrates:
/// - Loading a trending-videos CSV into a Dataset
/// - Computing the default dashboard over every facet value
/// - Narrowing a facet and recomputing
/// - Rendering the result as terminal tables

use trendboard::{compute, report, Dataset, Facet, FacetValue, FilterSelection};

const SAMPLE_CSV: &str = "\
title,channel_title,category_id,publish_country,published_day_of_week,views,likes,comment_count
Season Finale Trailer,Network TV,24,US,Thursday,2410000,51200,8800
Championship Highlights,Sports Hub,17,US,Sunday,1830000,40100,6100
Ten Minute Pasta,Home Kitchen,26,IT,Monday,420000,21000,1900
City Walk 4K,Wanderer,19,JP,Saturday,310000,12500,640
Late Show Monologue,Network TV,24,CA,Tuesday,980000,18800,3100
Phone Review,Tech Desk,28,GB,Thursday,760000,30400,4500
Derby Recap,Sports Hub,17,GB,Sunday,540000,9800,2200
Rainy Day Lofi,Chill Beats,10,DE,Friday,1120000,64000,2800
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Trendboard Dashboard Example ===\n");

    // 1. Load the dataset (a path works the same via Dataset::from_path)
    println!("1. Loading dataset...");
    let dataset = Dataset::from_reader("sample", SAMPLE_CSV.as_bytes())?;
    println!("   Loaded {:?}\n", dataset);

    // 2. Default selection: every value of every facet
    println!("2. Default dashboard");
    let mut selection = FilterSelection::all(&dataset);
    let dashboard = compute(&dataset, &selection);
    println!("{}", report::render(&dashboard));

    // 3. Drop the Sunday uploads and look again
    println!("3. Without Sunday uploads");
    selection.toggle(Facet::Weekday, &FacetValue::from("Sunday"));
    let dashboard = compute(&dataset, &selection);
    println!("   {} rows match", dashboard.matched_rows);
    for group in &dashboard.comments_by_day {
        println!("   {:<10} {:>8} comments", group.key, report::format_count(group.total));
    }

    // 4. Clearing a facet empties every product
    println!("\n4. Clearing the country facet");
    selection.clear(Facet::Country);
    let dashboard = compute(&dataset, &selection);
    println!("   empty: {}, total views: {}", dashboard.is_empty(), dashboard.kpis.total_views);

    println!("\n=== Example Complete ===");
    Ok(())
}
