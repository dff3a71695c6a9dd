mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "effluent",
    version,
    about = "Wastewater quality checker: evaluate samples against discharge limits"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one sample from a JSON file or form-style KEY=VALUE fields
    Analyze {
        /// Path to a JSON sample file
        input_file: Option<PathBuf>,

        /// Field value, e.g. `-f ph=7.2`. Missing or unparseable fields read as 0
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        field: Vec<String>,

        /// Custom JSON threshold file (default: builtin discharge limits)
        #[arg(short, long, value_name = "FILE")]
        thresholds: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show per-parameter reasoning
        #[arg(long)]
        verbose: bool,
    },
    /// Acquire samples from the simulator or sensor hardware and evaluate them
    Read {
        /// Acquisition mode: simulated or hardware (overrides --config)
        #[arg(short, long)]
        mode: Option<String>,

        /// IIO device directory for hardware mode
        #[arg(long, value_name = "DIR")]
        iio_device: Option<PathBuf>,

        /// Seed for reproducible simulated readings
        #[arg(long)]
        seed: Option<u64>,

        /// Number of consecutive samples to take
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Acquisition config file (JSON)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Custom JSON threshold file (default: builtin discharge limits)
        #[arg(short, long, value_name = "FILE")]
        thresholds: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show per-parameter reasoning
        #[arg(long)]
        verbose: bool,
    },
    /// Inspect and validate threshold tables
    Thresholds {
        #[command(subcommand)]
        action: ThresholdsAction,
    },
}

#[derive(Subcommand)]
enum ThresholdsAction {
    /// Print the threshold table with safe ranges
    List {
        /// Custom JSON threshold file (default: builtin discharge limits)
        #[arg(short, long, value_name = "FILE")]
        thresholds: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Print the threshold file format with an example
    Schema,
    /// Validate a custom threshold file
    Validate {
        /// Path to JSON threshold file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "effluent=info,effluent_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input_file,
            field,
            thresholds,
            output,
            verbose,
        } => commands::analyze::run(input_file, field, thresholds, &output, verbose),
        Commands::Read {
            mode,
            iio_device,
            seed,
            count,
            config,
            thresholds,
            output,
            verbose,
        } => commands::read::run(
            commands::read::ReadOptions {
                mode,
                iio_device,
                seed,
                count,
                config,
                thresholds,
            },
            &output,
            verbose,
        ),
        Commands::Thresholds { action } => match action {
            ThresholdsAction::List { thresholds, output } => {
                commands::thresholds::list(thresholds, &output)
            }
            ThresholdsAction::Schema => commands::thresholds::schema(),
            ThresholdsAction::Validate { file } => commands::thresholds::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
