//! CLI parser and command dispatch.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::load_settings;

#[derive(Parser)]
#[command(name = "gmrview")]
#[command(about = "Annotated-corpus viewer for linguistic metaphor annotations")]
#[command(version)]
pub struct Cli {
    /// Target directory or database file (overrides config file).
    /// Can be a directory containing gmrview.db or a .db file directly.
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Import documents from JSON Lines files into a language collection
    Import {
        /// Language code of the target collection
        lang: String,
        /// JSONL files, one document object per line
        files: Vec<PathBuf>,
        /// Parse and validate without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// List language collections and import history
    Languages,

    /// Fetch and print pages of documents from a collection
    Docs {
        /// Language collection
        #[arg(short, long, default_value = "en")]
        lang: String,
        /// Anchor document id (empty = start of collection)
        #[arg(short, long, default_value = "")]
        anchor: String,
        /// Page size
        #[arg(short, long)]
        batch: Option<usize>,
        /// Search criterion as key=value (repeatable), e.g. source_lemma=fire
        #[arg(short, long = "filter")]
        filters: Vec<String>,
        /// Number of consecutive pages to walk
        #[arg(short, long, default_value = "1")]
        pages: usize,
    },

    /// Start the web server
    Serve {
        /// Bind address: port, host, or host:port (defaults to the
        /// configured bind address)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref(), cli.target.as_deref())?;

    match cli.command {
        Commands::Init => commands::init::cmd_init(&settings),
        Commands::Import {
            lang,
            files,
            dry_run,
        } => commands::import::cmd_import(&settings, &lang, &files, dry_run),
        Commands::Languages => commands::languages::cmd_languages(&settings),
        Commands::Docs {
            lang,
            anchor,
            batch,
            filters,
            pages,
        } => commands::docs::cmd_docs(&settings, &lang, &anchor, batch, &filters, pages),
        Commands::Serve { bind } => commands::serve::cmd_serve(&settings, bind.as_deref()).await,
    }
}
