use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use seqscan::gene::{Classification, FilterTags};
use seqscan::report::RunReport;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "seqscan-utils", version = "0.1.0", about = "Utility tools for seqscan run reports")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints how many records passed each filter in a saved classification report.
    Tally {
        /// Path to a report.json written by `seqscan classify --output-json`.
        #[clap(short, long, value_parser)]
        report: PathBuf,

        /// Emit the tally as JSON.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },

    /// Lists the names of records that passed a given filter.
    Select {
        /// Path to a report.json written by `seqscan classify --output-json`.
        #[clap(short, long, value_parser)]
        report: PathBuf,

        /// Which filter the records must pass.
        #[clap(short, long, value_enum, default_value_t = FilterKind::All)]
        filter: FilterKind,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FilterKind {
    Species,
    Length,
    Expression,
    Any,
    All,
}

impl FilterKind {
    fn matches(self, tags: &FilterTags) -> bool {
        match self {
            FilterKind::Species => tags.species,
            FilterKind::Length => tags.length,
            FilterKind::Expression => tags.expression,
            FilterKind::Any => tags.any(),
            FilterKind::All => tags.all(),
        }
    }
}

#[derive(Serialize, Debug)]
struct TallySummary {
    classified: usize,
    skipped: usize,
    rejected: usize,
    species: usize,
    length: usize,
    expression: usize,
}

fn summarize(report: &RunReport) -> TallySummary {
    let tally = report.results.tally();
    TallySummary {
        classified: report.results.classified.len(),
        skipped: report.results.skipped.len(),
        rejected: report.rejected.len(),
        species: tally.species,
        length: tally.length,
        expression: tally.expression,
    }
}

fn select(classified: &[Classification], filter: FilterKind) -> Vec<&str> {
    classified
        .iter()
        .filter(|c| filter.matches(&c.tags))
        .map(|c| c.name.as_str())
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tally { report, json } => {
            let run = RunReport::load(&report)?;
            let summary = summarize(&run);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Report: {} (seqscan {}, {})", report.display(), run.tool_version, run.generated_at);
                println!("  Classified: {}", summary.classified);
                println!("  Skipped:    {}", summary.skipped);
                println!("  Rejected:   {}", summary.rejected);
                println!("  Species filter:    {}", summary.species);
                println!("  Length filter:     {}", summary.length);
                println!("  Expression filter: {}", summary.expression);
            }
        }
        Commands::Select { report, filter } => {
            let run = RunReport::load(&report)?;
            for name in select(&run.results.classified, filter) {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
