//! quizrun CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizrun",
    version,
    about = "Resumable multiple-choice quiz runner"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quiz, resuming saved progress if there is any
    Play {
        /// Question file path or http(s) URL
        #[arg(long)]
        questions: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for saved progress
        #[arg(long)]
        store_dir: Option<PathBuf>,

        /// Write a report when the quiz finishes (.html or .json)
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Validate a question file or a directory of them
    Validate {
        /// Path to a .json/.toml question file or directory
        #[arg(long)]
        questions: PathBuf,
    },

    /// Show saved progress
    Status {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for saved progress
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },

    /// Delete saved progress
    Reset {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for saved progress
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },

    /// Create a starter config and example question file
    Init,
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizrun=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            questions,
            config,
            store_dir,
            report,
        } => commands::play::execute(questions, config, store_dir, report).await,
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Status { config, store_dir } => commands::status::execute(config, store_dir),
        Commands::Reset { config, store_dir } => commands::reset::execute(config, store_dir),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
