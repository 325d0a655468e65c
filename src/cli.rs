use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recipe-loader")]
#[command(version, about = "Bulk-load a recipe JSON dataset into a relational backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a recipe dataset into a local SQLite database
    Load {
        /// Input JSON file with a top-level "recipes" array
        input: PathBuf,

        /// Output SQLite database path
        output_db: PathBuf,

        /// Remove an existing database file before loading
        #[arg(short, long)]
        fresh: bool,
    },

    /// Push a recipe dataset to a hosted PostgREST backend
    Push {
        /// Input JSON file with a top-level "recipes" array
        input: PathBuf,

        /// Backend base URL (falls back to RECIPE_API_URL)
        #[arg(long)]
        url: Option<String>,

        /// Backend API key (falls back to RECIPE_API_KEY)
        #[arg(long)]
        key: Option<String>,

        /// Retries per write for transient backend failures
        #[arg(long, default_value_t = 2)]
        retries: u32,
    },

    /// Parse and check a dataset without writing anything
    Validate {
        /// Input JSON file with a top-level "recipes" array
        input: PathBuf,
    },

    /// List the tables the loader writes
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
