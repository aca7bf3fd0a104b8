//! Roster merge CLI
//!
//! Command-line tool for merging per-college roster CSV exports into a
//! single id-assigned file.

use clap::{Parser, Subcommand};
use roster_core::{
    discover_inputs, extract_subjects, merge_files, plan_column_order, read_header, MergeReport,
};
use std::path::{Path, PathBuf};

/// Input files used when none are given on the command line
const DEFAULT_INPUTS: [&str; 3] = [
    "college1_data.csv",
    "college2_data.csv",
    "college3_data.csv",
];

const DEFAULT_OUTPUT: &str = "final.csv";

#[derive(Parser)]
#[command(name = "roster-cli")]
#[command(about = "College roster CSV merger", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge roster files into a single id-assigned CSV
    Merge {
        /// Input CSV files, merged in the order given
        #[arg(default_values = DEFAULT_INPUTS)]
        inputs: Vec<PathBuf>,

        /// Output file path
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Discover inputs by scanning a directory instead of listing them
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Write a JSON report of the run to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the canonical column order without merging
    Plan {
        /// Input CSV files, in merge order
        #[arg(default_values = DEFAULT_INPUTS)]
        inputs: Vec<PathBuf>,

        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one file's header and the subjects detected in it
    Inspect {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> roster_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            inputs,
            output,
            data_dir,
            report,
        } => cmd_merge(inputs, &output, data_dir.as_deref(), report.as_deref()),
        Commands::Plan { inputs, json } => cmd_plan(&inputs, json),
        Commands::Inspect { file } => cmd_inspect(&file),
    }
}

fn cmd_merge(
    inputs: Vec<PathBuf>,
    output: &Path,
    data_dir: Option<&Path>,
    report: Option<&Path>,
) -> roster_core::Result<()> {
    let inputs = match data_dir {
        Some(dir) => discover_inputs(dir, Some(output))?,
        None => inputs,
    };

    let summary = merge_files(&inputs, output)?;

    println!(
        "Merged {} rows from {} file(s) into {}",
        summary.total_rows,
        summary.sources.len(),
        summary.output.display()
    );
    for source in &summary.sources {
        println!("  {} ({} rows)", source.path.display(), source.rows);
    }

    if let Some(report_path) = report {
        let report = MergeReport::from_summary(&summary);
        report.save(report_path)?;
        println!("Report written to {}", report_path.display());
    }

    Ok(())
}

fn cmd_plan(inputs: &[PathBuf], json: bool) -> roster_core::Result<()> {
    let mut headers = Vec::with_capacity(inputs.len());
    for input in inputs {
        headers.push(read_header(input)?);
    }

    let subjects = headers.first().map(|h| extract_subjects(h)).unwrap_or_default();
    let order = plan_column_order(&subjects, &headers);

    if json {
        println!("{}", serde_json::to_string_pretty(&order)?);
    } else {
        println!("Canonical column order ({} columns):", order.len());
        for column in order.columns() {
            println!("  {:>3}  {}", column.index, column.name);
        }
    }

    Ok(())
}

fn cmd_inspect(file: &Path) -> roster_core::Result<()> {
    let header = read_header(file)?;
    let subjects = extract_subjects(&header);

    println!("File: {}", file.display());
    println!("Columns ({}):", header.len());
    for name in &header {
        println!("  {}", name);
    }
    println!();
    println!("Subjects ({}):", subjects.len());
    for subject in &subjects {
        println!("  {}", subject);
    }

    Ok(())
}
