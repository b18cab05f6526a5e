use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use vetcat_core::{FacetGroupKey, Mode, SortKey};

mod errors;
mod handlers;
mod logging;
mod state;
mod ui;

use errors::{map_load_error, print_error};
use handlers::{apply_filter_actions, FilterActions};
use state::AppState;
use ui::{render_json_report, render_report, ReportOptions};

/// Veterinary clinic catalog browser - filter products and services by facet
///
/// Examples:
///   # List every product
///   vetcat catalog.json
///
///   # Pick a category, then narrow to two subcategories (OR within subcategories)
///   vetcat catalog.json --category Alimentos --subcategory Perros --subcategory Gatos
///
///   # Combine with a brand (AND between groups) and sort by price
///   vetcat catalog.json --category Alimentos --brand "Royal Canin" --sort price-asc
///
///   # Browse services of one clinic
///   vetcat catalog.json --mode services --clinic Centro
///
///   # Show the facet sidebar with counts
///   vetcat catalog.json --category Alimentos --facets
#[derive(Parser, Debug)]
#[command(name = "vetcat")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - category, brand and clinic accept a single value\n  \
    - Multiple --subcategory values are combined with OR\n  \
    - Different groups are combined with AND\n  \
    - Subcategories only exist once a category is selected\n\n\
Sorting Options:\n  \
    - default, price-asc, price-desc")]
struct Cli {
    /// Path to the catalog bundle JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Catalog to browse
    #[arg(short, long, value_name = "MODE", default_value = "products")]
    mode: Mode,

    /// Select a category (products)
    #[arg(short, long, value_name = "NAME")]
    category: Option<String>,

    /// Select a subcategory of the chosen category (can be repeated)
    #[arg(short = 'S', long = "subcategory", value_name = "NAME")]
    subcategories: Vec<String>,

    /// Select a brand (products)
    #[arg(short, long, value_name = "NAME")]
    brand: Option<String>,

    /// Select a clinic (services)
    #[arg(long, value_name = "NAME")]
    clinic: Option<String>,

    /// Deselect an active facet by name after the selections above (can be repeated)
    #[arg(short, long, value_name = "NAME")]
    remove: Vec<String>,

    /// Sort results: default, price-asc or price-desc
    #[arg(short, long = "sort", value_name = "KEY", default_value = "default")]
    sort_by: SortKey,

    /// Group results by category, subcategories, brand or clinic
    #[arg(short = 'G', long = "group-by", value_name = "GROUP")]
    group_by: Option<FacetGroupKey>,

    /// Print the facet groups with counts
    #[arg(long)]
    facets: bool,

    /// Report a service total computed elsewhere instead of the clinic filter's
    #[arg(long, value_name = "COUNT")]
    service_count: Option<usize>,

    /// Print the result as JSON instead of Markdown
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn filter_actions(&self) -> FilterActions {
        FilterActions {
            category: self.category.clone(),
            subcategories: self.subcategories.clone(),
            brand: self.brand.clone(),
            clinic: self.clinic.clone(),
            remove: self.remove.clone(),
            sort: self.sort_by,
            service_count: self.service_count,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::initialize(cli.verbose) {
        eprintln!("{} {:#}", "Warning:".yellow(), err);
    }

    let mut app = AppState::load(cli.file.clone(), cli.mode).unwrap_or_else(|err| {
        let (title, message, details) = map_load_error(&err, &cli.file);
        print_error(&title, &message, &details);
        process::exit(1);
    });

    if let Err(err) = run(&cli, &mut app) {
        print_error("Error", &format!("{:#}", err), "");
        process::exit(1);
    }
}

fn run(cli: &Cli, app: &mut AppState) -> anyhow::Result<()> {
    for warning in apply_filter_actions(&mut app.session, &cli.filter_actions()) {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }

    if cli.json {
        let json = render_json_report(&app.session).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        let options = ReportOptions {
            group_by: cli.group_by,
            show_facets: cli.facets,
        };
        print!("{}", render_report(app.bundle_name(), &app.session, options));
    }

    if let Some(change) = app.last_change() {
        tracing::info!(total = change.total_count, mode = %change.mode, "report printed");
    }

    Ok(())
}
