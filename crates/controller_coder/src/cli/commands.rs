//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Generate resource types, storage and controllers with an LLM
#[derive(Parser, Debug)]
#[command(name = "controller-coder")]
#[command(about = "Generate resource types, storage and controllers with an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (replaces the home and current-directory files)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Project checkout to read from and write to
    #[arg(long, global = true)]
    pub code_base: Option<PathBuf>,
}

/// Schema and state machine input files.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// File holding the SQL schema of the resource
    #[arg(long)]
    pub sql_schema: PathBuf,

    /// File holding the state machine diagram
    #[arg(long)]
    pub state_machine: PathBuf,
}

/// Where generated files go.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Print a JSON document instead of the raw files
    #[arg(long)]
    pub json: bool,

    /// Also write the files into the code base
    #[arg(long)]
    pub write: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the Go type file for a resource
    ResourceType {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Regenerate pkg/storage/storage.go with a resource's methods
    StorageInterface {
        /// Resource name, e.g. "workspace"
        resource_name: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Regenerate pkg/storage/postgrest.go with a resource's methods
    StorageImpl {
        /// Resource name, e.g. "workspace"
        resource_name: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run the full pipeline: types, storage and controller
    Generate {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Commit and push the result on a new branch
        #[arg(long)]
        create_branch: bool,
    },
}
