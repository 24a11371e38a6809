/// Trendboard terminal report
///
/// Prints the dashboard for one filter selection. Facets given no values on
/// the command line keep every value.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use trendboard::{compute, report, Config, Dataset, FilterSelection};

#[derive(Parser, Debug)]
#[command(name = "trendboard-report", version, about = "Print the trending-videos dashboard")]
struct Args {
    /// CSV file to load (defaults to $TRENDBOARD_DATA or youtube.csv)
    data: Option<PathBuf>,

    /// Keep only these category ids (repeatable)
    #[arg(long = "category", value_name = "ID")]
    categories: Vec<i64>,

    /// Keep only these publish countries (repeatable)
    #[arg(long = "country", value_name = "CODE")]
    countries: Vec<String>,

    /// Keep only these publish weekdays (repeatable)
    #[arg(long = "day", value_name = "DAY")]
    days: Vec<String>,

    /// Print the dashboard as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn selection_for(args: &Args, dataset: &Dataset) -> FilterSelection {
    let mut selection = FilterSelection::all(dataset);
    if !args.categories.is_empty() {
        selection.categories = args.categories.iter().copied().collect();
    }
    if !args.countries.is_empty() {
        selection.countries = args.countries.iter().cloned().collect();
    }
    if !args.days.is_empty() {
        selection.weekdays = args.days.iter().cloned().collect();
    }
    selection
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let args = Args::parse();

    let data_path = args.data.clone().unwrap_or_else(Config::data_path_from_env);

    let dataset = match Dataset::from_path(&data_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let dashboard = compute(&dataset, &selection_for(&args, &dataset));
    if args.json {
        match serde_json::to_string_pretty(&dashboard) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", report::render(&dashboard));
    }
    ExitCode::SUCCESS
}
