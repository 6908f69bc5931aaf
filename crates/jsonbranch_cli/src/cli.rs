//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// jsonbranch - Locate and copy branches of JSON documents
#[derive(Parser)]
#[command(name = "jbranch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path delimiter ('.' or '/'), overrides the configuration
    #[arg(short, long, global = true)]
    pub delimiter: Option<char>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the requested paths that exist in the document
    Locate {
        #[command(flatten)]
        input: InputArgs,

        /// Print the result as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print a copy of the document restricted to the requested paths
    Copy {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the copied document
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// JSON document to read (stdin if omitted or '-')
    pub file: Option<PathBuf>,

    /// Key path to look for (repeatable)
    #[arg(short, long = "path", value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}
