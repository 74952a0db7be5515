//! CLI for the eventvol event study library.
//!
//! Loads an event table from JSON and per-series price files from a
//! directory, runs the batch analysis, and prints the results table and
//! summary statistics.

use clap::{Parser, Subcommand};
use eventvol::{
    BatchAnalyzer, BatchReport, CsvPriceProvider, DEFAULT_TOP_N, DEFAULT_WINDOW, EventTable,
    Summary,
};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "eventvol")]
#[command(about = "Event-window volatility change analysis for price series", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the event study and print the results table and summary
    Analyze {
        /// Path to the event table JSON document
        #[arg(long)]
        events: PathBuf,
        /// Directory holding one `<series>.csv` price file per series
        #[arg(long)]
        prices: PathBuf,
        /// Window length in trading observations
        #[arg(long, default_value_t = DEFAULT_WINDOW)]
        window: usize,
        /// Number of top increases to report
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
        /// Write the results table as CSV to this path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the events declared in an event table
    Events {
        /// Path to the event table JSON document
        #[arg(long)]
        events: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            events,
            prices,
            window,
            top,
            out,
        } => run_analysis(&events, &prices, window, top, out.as_deref()),
        Commands::Events { events } => list_events(&events),
    }
}

fn load_table(path: &Path) -> EventTable {
    let doc = std::fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Error: cannot read event table {}: {}", path.display(), err);
        process::exit(1);
    });
    EventTable::from_json(&doc).unwrap_or_else(|err| {
        eprintln!("Error: {}", err);
        process::exit(1);
    })
}

/// Run the full study and render the table, summary, and skip counts.
fn run_analysis(events: &Path, prices: &Path, window: usize, top: usize, out: Option<&Path>) {
    let table = load_table(events);
    let provider = CsvPriceProvider::new(prices);
    let analyzer = BatchAnalyzer::with_window(window);

    let report = analyzer.analyze(&provider, &table).unwrap_or_else(|err| {
        eprintln!("Error: {}", err);
        process::exit(1);
    });

    print_records(&report);

    if let Some(path) = out {
        if let Err(err) = report.write_csv(path) {
            eprintln!("Error: cannot write {}: {}", path.display(), err);
            process::exit(1);
        }
        println!("Saved results to {}", path.display());
        println!();
    }

    let summary = Summary::with_top_n(&report.records, top).unwrap_or_else(|err| {
        eprintln!("Error: {}", err);
        process::exit(1);
    });
    print_summary(&report, &summary);
}

fn print_records(report: &BatchReport) {
    println!("Recorded events ({}):", report.recorded());
    for record in &report.records {
        println!(
            "  {} {} [{}]: {:+.1}% volatility change",
            record.series, record.date, record.label, record.change_pct
        );
    }
    println!();
}

fn print_summary(report: &BatchReport, summary: &Summary) {
    println!("Summary");
    println!("-------");
    println!(
        "Events recorded: {} (skipped: {} degenerate, {} unparseable)",
        summary.total, report.skipped_degenerate, report.skipped_unparseable
    );
    if !report.unavailable_series.is_empty() {
        println!(
            "Unavailable series: {}",
            report.unavailable_series.join(", ")
        );
    }

    match (summary.mean_change_pct, summary.median_change_pct) {
        (Some(mean), Some(median)) => {
            println!("Average volatility change: {:+.1}%", mean);
            println!("Median volatility change: {:+.1}%", median);
        }
        _ => println!("Average/median volatility change: n/a (no recorded events)"),
    }

    if summary.total > 0 {
        let share = |count: usize| count as f64 / summary.total as f64 * 100.0;
        println!(
            "Events with increased volatility: {} ({:.1}%)",
            summary.increased,
            share(summary.increased)
        );
        println!(
            "Events with decreased volatility: {} ({:.1}%)",
            summary.decreased,
            share(summary.decreased)
        );
    }

    if !summary.top.is_empty() {
        println!();
        println!("Largest volatility increases:");
        for record in &summary.top {
            println!(
                "  {}: {} ({:+.1}%)",
                record.series, record.label, record.change_pct
            );
        }
    }

    if !summary.by_series.is_empty() {
        println!();
        println!("By series:");
        for avg in &summary.by_series {
            println!("  {}: {:+.1}% average change", avg.series, avg.avg_change_pct);
        }
    }
}

/// List the declared events without running any analysis.
fn list_events(events: &Path) {
    let table = load_table(events);

    println!("{} series, {} events", table.len(), table.event_count());
    for entry in &table.entries {
        println!("\n{}:", entry.series);
        for event in &entry.events {
            println!("  {} - {}", event.date, event.label);
        }
    }
}
