//! CLI entry point for the cleaning pipeline.

use anyhow::Result;
use clap::Parser;
use smart_cleaner::config::{DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};
use smart_cleaner::{CleanerConfig, CleaningPipeline};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Clean a tabular dataset",
    long_about = "Loads a delimited file, reports summary statistics and missing values,\n\
                  fills missing cells by mean/mode, removes duplicate rows, parses dates,\n\
                  title-cases text and writes the result.\n\n\
                  EXAMPLES:\n  \
                  # Fixed default paths\n  \
                  smart-cleaner\n\n  \
                  # Explicit paths\n  \
                  smart-cleaner dirty.csv clean.csv"
)]
struct Args {
    /// Path to the dirty CSV file
    #[arg(default_value = DEFAULT_INPUT_PATH)]
    input: String,

    /// Where to write the cleaned CSV file
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize logging based on CLI arguments.
///
/// `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    let config = CleanerConfig::builder()
        .input_path(&args.input)
        .output_path(&args.output)
        .build()?;

    // Load failures are logged by the pipeline itself.
    let mut pipeline = CleaningPipeline::builder().config(config).build()?;

    let outcomes = pipeline.run();
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => println!("{}", report),
            Err(e) => println!("{}", e),
        }
    }

    let succeeded = outcomes.iter().filter(|o| o.is_ok()).count();
    info!("{} of {} steps succeeded", succeeded, outcomes.len());

    Ok(())
}
