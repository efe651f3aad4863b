//! recordbook CLI
//!
//! Command-line administration of recordbook collections.
//!
//! # Commands
//!
//! - `kinds` - List the entity kinds and their collection keys
//! - `list` - Enumerate the records of a kind
//! - `get` - Show one record
//! - `add` - Create a record
//! - `update` - Replace a record by id
//! - `delete` - Remove a record by id

mod commands;

use clap::{Parser, Subcommand};
use commands::Context;
use recordbook_core::ROLE_USER;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// recordbook command-line tools.
#[derive(Parser)]
#[command(name = "recordbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the collection blobs
    #[arg(
        global = true,
        short,
        long,
        env = "RECORDBOOK_PATH",
        default_value = "recordbook-data"
    )]
    path: PathBuf,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Role granted to the current user (repeatable)
    #[arg(
        global = true,
        long = "role",
        env = "RECORDBOOK_ROLES",
        value_delimiter = ',',
        default_value = ROLE_USER
    )]
    roles: Vec<String>,

    /// Write collections as indented JSON
    #[arg(global = true, long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List entity kinds and their collection keys
    Kinds,

    /// Enumerate the records of a kind
    List {
        /// Entity kind (e.g. parks, school)
        kind: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show one record
    Get {
        /// Entity kind
        kind: String,

        /// Record id
        id: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Create a record (requires ROLE_ADMIN)
    Add {
        /// Entity kind
        kind: String,

        /// Record as a JSON object; any id is ignored
        json: String,
    },

    /// Replace a record by its id (requires ROLE_ADMIN)
    Update {
        /// Entity kind
        kind: String,

        /// Record as a JSON object, including its id
        json: String,
    },

    /// Remove a record (requires ROLE_ADMIN)
    Delete {
        /// Entity kind
        kind: String,

        /// Record id
        id: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut out = io::stdout().lock();
    let open = || Context::open(&cli.path, cli.roles.iter().cloned(), cli.pretty);

    match &cli.command {
        Commands::Kinds => commands::kinds::run(&mut out)?,
        Commands::List { kind, format } => commands::list::run(&open()?, kind, format, &mut out)?,
        Commands::Get { kind, id, format } => {
            commands::get::run(&open()?, kind, id, format, &mut out)?;
        }
        Commands::Add { kind, json } => commands::add::run(&open()?, kind, json, &mut out)?,
        Commands::Update { kind, json } => commands::update::run(&open()?, kind, json, &mut out)?,
        Commands::Delete { kind, id } => commands::delete::run(&open()?, kind, id, &mut out)?,
        Commands::Version => {
            writeln!(out, "recordbook CLI v{}", env!("CARGO_PKG_VERSION"))?;
            writeln!(out, "recordbook core v{}", recordbook_core::VERSION)?;
        }
    }

    Ok(())
}
