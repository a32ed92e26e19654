use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nosh")]
#[command(about = "Keep a food library and a meal log from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a food to the library
    #[command(alias = "a")]
    Add {
        /// Name of the food
        name: String,
    },

    /// List the food library
    #[command(alias = "ls")]
    Foods,

    /// Rename a food (updates past log entries too)
    Rename {
        /// Index, id, or name of the food
        food: String,

        /// The new name
        name: String,
    },

    /// Remove a food from the library
    #[command(alias = "rm")]
    Remove {
        /// Index, id, or name of the food
        food: String,
    },

    /// Log a meal
    #[command(alias = "l")]
    Log {
        /// Items eaten: library indexes, names, or free-form text
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,

        /// When the meal was eaten (RFC 3339 or "YYYY-MM-DD HH:MM", default now)
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },

    /// Show logged meals, most recent first
    #[command(alias = "h")]
    History {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Edit a logged meal
    Edit {
        /// Index or id of the meal
        meal: String,

        /// Replacement items (omit to keep the current ones)
        #[arg(num_args = 0..)]
        items: Vec<String>,

        /// New time for the meal (RFC 3339 or "YYYY-MM-DD HH:MM")
        #[arg(long, value_name = "TIME")]
        at: Option<String>,
    },

    /// Delete a logged meal
    Unlog {
        /// Index or id of the meal
        meal: String,
    },

    /// Show the last week in numbers
    Stats,

    /// Write a backup of the library and history
    Export {
        /// Output file (defaults to nosh-backup-<date>.json)
        path: Option<PathBuf>,
    },

    /// Restore collections from a backup file
    Import {
        /// Backup file to read
        path: PathBuf,
    },
}
