//! docnode type manifest inspector
//!
//! Loads a TOML type manifest and answers questions about it:
//!
//!   docnode --manifest types.toml types
//!   docnode --manifest types.toml schema heading
//!   docnode --manifest types.toml create heading --props '{"level": 2}'
//!
//! Output is JSON on stdout; logs go to stderr.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docnode_cli::{create_json, list_types, load_system, schema_json};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "docnode")]
#[command(about = "Inspect docnode type manifests")]
struct Args {
    /// Path to the type manifest
    #[arg(short, long, default_value = "types.toml")]
    manifest: PathBuf,

    /// Reject unknown properties and mistyped values
    #[arg(long)]
    strict: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered types with their polymorphic names
    Types,
    /// Print the effective schema of a type
    Schema { type_name: String },
    /// Create an entity and print its snapshot
    Create {
        type_name: String,
        /// Initial properties as a JSON object
        #[arg(long)]
        props: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let system = load_system(&args.manifest, args.strict)?;
    info!("Loaded {} types from {}", system.registry().len(), args.manifest.display());

    let output = match &args.command {
        Command::Types => serde_json::to_value(list_types(&system)?)?,
        Command::Schema { type_name } => schema_json(&system, type_name)?,
        Command::Create { type_name, props } => create_json(&system, type_name, props.as_deref())?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
