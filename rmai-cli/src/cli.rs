use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rmai_data::DEFAULT_ENDPOINT;
use rmai_rag::RagConfig;

/// Browse Rick and Morty locations, keep notes on characters, and generate,
/// evaluate and search text about them.
#[derive(Debug, Parser)]
#[command(name = "rmai", version, about)]
pub struct Cli {
    /// GraphQL endpoint serving the locations dataset
    #[arg(long, env = "RMAI_GRAPHQL_URL", default_value = DEFAULT_ENDPOINT, global = true)]
    pub graphql_url: String,

    /// Snapshot file for the fetched dataset
    #[arg(long, env = "RMAI_CACHE_FILE", default_value = "data/locations.json", global = true)]
    pub cache_file: PathBuf,

    /// SQLite database holding notes
    #[arg(long, env = "RMAI_NOTES_DB", default_value = "data/notes.db", global = true)]
    pub notes_db: PathBuf,

    /// Enables remote embeddings and generation; local fallbacks are used without it
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub openai_api_key: Option<String>,

    /// Drop the dataset snapshot and fetch again
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Log as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log at info level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every location as `name (type)`
    Locations,

    /// Show the residents of a location with their notes
    Residents {
        /// Exact location name
        location: String,
    },

    /// Add or list character notes
    #[command(subcommand)]
    Note(NoteCommand),

    /// Write a narrator summary of a location and score it
    Summarize {
        location: String,
    },

    /// Write a short dialogue between two characters
    Dialogue {
        first: String,
        second: String,
    },

    /// Rank notes and the residents of a location against a query
    Search {
        location: String,
        query: String,
        /// Maximum number of results
        #[arg(short = 'k', long, default_value_t = RagConfig::default().top_k)]
        top_k: usize,
    },
}

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Attach a note to a character
    Add {
        character_id: String,
        text: String,
    },
    /// List notes, newest first
    List {
        /// Only notes about this character
        character_id: Option<String>,
    },
}
