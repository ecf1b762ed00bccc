mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "linea",
    version,
    about = "Rebuild text rows from positioned words in PDFs and word dumps"
)]
struct Cli {
    /// Log clustering details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// How rows are clustered. At most one of --tolerance, --preset and --config.
#[derive(Args)]
pub struct ClusterArgs {
    /// Vertical tolerance in page units
    #[arg(short, long, allow_negative_numbers = true, conflicts_with_all = ["preset", "config"])]
    tolerance: Option<f64>,

    /// Predefined tolerance: exact, tight, standard (default), loose
    #[arg(short, long, conflicts_with = "config")]
    preset: Option<String>,

    /// JSON cluster config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Row reference: first-word (default) or running-mean
    #[arg(short, long)]
    reference: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct the rows of a PDF or word-set JSON file
    Rows {
        /// Path to PDF or word-set JSON file
        input_file: PathBuf,

        #[command(flatten)]
        cluster: ClusterArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the rows to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also print the words of every row with their positions
        #[arg(long)]
        show_words: bool,
    },
    /// Reconstruct rows and report how words are distributed over them
    Analyze {
        /// Path to PDF or word-set JSON file
        input_file: PathBuf,

        #[command(flatten)]
        cluster: ClusterArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Compare row counts across several tolerances
    Sweep {
        /// Path to PDF or word-set JSON file
        input_file: PathBuf,

        /// Tolerances to try (default: every preset)
        #[arg(short, long = "tolerance", value_name = "T", num_args = 1.., allow_negative_numbers = true)]
        tolerances: Vec<f64>,

        /// Row reference: first-word (default) or running-mean
        #[arg(short, long)]
        reference: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List predefined tolerances
    Presets,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Rows {
            input_file,
            cluster,
            output,
            out,
            show_words,
        } => commands::rows::run(input_file, &cluster, &output, out, show_words),
        Commands::Analyze {
            input_file,
            cluster,
            output,
        } => commands::analyze::run(input_file, &cluster, &output),
        Commands::Sweep {
            input_file,
            tolerances,
            reference,
            output,
        } => commands::sweep::run(input_file, tolerances, reference.as_deref(), &output),
        Commands::Presets => commands::presets::list(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
