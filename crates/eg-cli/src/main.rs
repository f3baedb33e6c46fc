//! CLI frontend for the encounter generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "eg",
    about = "Encounter generator for percentile tabletop games",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log pipeline steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format of generated instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable sheets
    Text,
    /// The instances as JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice expression
    Roll {
        /// Expression such as 2d6+STR-1
        expression: String,

        /// Symbol values, e.g. --set STR=14
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
        symbols: Vec<String>,

        /// RNG seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the canonical form of a dice expression
    Clean {
        /// Expression to canonicalize
        expression: String,
    },

    /// Validate every template and party of a library
    Check {
        /// Library file
        #[arg(short, long, default_value = "library.json")]
        library: PathBuf,
    },

    /// List the templates of a library
    List {
        /// Filter by kind (standard, spirit, elemental, cult)
        kind: Option<String>,

        /// Library file
        #[arg(short, long, default_value = "library.json")]
        library: PathBuf,
    },

    /// Generate instances of a template
    Generate {
        /// Template name or id (e.g. "Orc" or "#12")
        template: String,

        /// Number of instances (capped at 40)
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Library file
        #[arg(short, long, default_value = "library.json")]
        library: PathBuf,
    },

    /// Generate a stored party
    Party {
        /// Party name (case-insensitive)
        name: String,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Library file
        #[arg(short, long, default_value = "library.json")]
        library: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Roll {
            expression,
            symbols,
            seed,
        } => commands::roll::run(&expression, &symbols, seed),
        Commands::Clean { expression } => commands::clean::run(&expression),
        Commands::Check { library } => commands::check::run(&library),
        Commands::List { kind, library } => commands::list::run(&library, kind.as_deref()),
        Commands::Generate {
            template,
            count,
            seed,
            format,
            library,
        } => commands::generate::run(&library, &template, count, seed, format),
        Commands::Party {
            name,
            seed,
            format,
            library,
        } => commands::party::run(&library, &name, seed, format),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings, or debug with `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
