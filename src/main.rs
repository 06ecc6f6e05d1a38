use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use linesift::external_sort::{sort_file, ExternalSortConfig, SortOutcome};
use linesift::generator::{generate_file, GeneratorConfig};
use linesift::storage::OsStorage;
use linesift::utils;

#[derive(Parser)]
#[command(name = "linesift")]
#[command(about = "External merge sort for large line-oriented text files")]
struct Args {
    #[arg(short, long, help = "Verbose output")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sort a file of "<number>. <text>" records by text, then by number
    Sort {
        #[arg(short, long, help = "Input file to sort")]
        input: PathBuf,

        #[arg(short, long, help = "Sorted output file")]
        output: PathBuf,

        #[arg(short, long, help = "Configuration file path")]
        config: Option<PathBuf>,
    },
    /// Generate a synthetic input file of randomized records
    Generate {
        #[arg(short, long, help = "Output file to write")]
        output: PathBuf,

        #[arg(short, long, help = "Approximate target size in megabytes")]
        size_mb: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let verbosity = if args.verbose { "verbose" } else { "normal" };
    utils::setup_logging(verbosity)?;

    match args.command {
        Command::Sort {
            input,
            output,
            config,
        } => {
            let config = match config {
                Some(path) => ExternalSortConfig::from_file(&path)?,
                None => ExternalSortConfig::default(),
            };

            match sort_file(&input, &output, config).await? {
                SortOutcome::Completed(stats) => {
                    info!("Sorting completed successfully!");
                    info!("Records sorted: {}", stats.total_records);
                    info!("Chunks created: {}", stats.chunks_created);
                    info!(
                        "Processing time: {}",
                        utils::format_duration(stats.processing_time_ms as f64 / 1000.0)
                    );
                    info!("Output: {}", output.display());
                }
                SortOutcome::MissingInput => {
                    info!("Input file {} does not exist.", input.display());
                }
            }
        }
        Command::Generate { output, size_mb } => {
            let config = GeneratorConfig {
                size_mb: size_mb.unwrap_or(GeneratorConfig::default().size_mb),
                ..GeneratorConfig::default()
            };

            let report = generate_file(&OsStorage, &output, &config)?;
            info!(
                "Generated {} lines ({}) at {}",
                report.lines_written,
                utils::format_bytes(report.bytes_written),
                output.display()
            );
        }
    }

    Ok(())
}
