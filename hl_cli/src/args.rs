//! Command-line arguments

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Tokenize source files with a registered highlighting grammar
#[derive(Debug, Parser)]
#[command(name = "hl", author, version, about, long_about = None)]
pub struct Cli {
    /// Grammar used to tokenize the inputs
    #[arg(short, long, default_value = "tiny")]
    pub grammar: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Coalesce adjacent plain tokens before printing
    #[arg(long)]
    pub merge_plain: bool,

    /// Worker threads (default: number of CPUs)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Only pick up files with this extension when walking directories
    #[arg(short, long)]
    pub ext: Option<String>,

    /// Print the registered grammar names and exit
    #[arg(long)]
    pub list_grammars: bool,

    /// Files or directories; reads stdin when empty
    pub inputs: Vec<PathBuf>,
}

impl Cli {
    pub fn worker_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Extension filter without a leading dot
    pub fn extension(&self) -> Option<&str> {
        self.ext.as_deref().map(|ext| ext.trim_start_matches('.'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per top-level token
    Text,
    /// Indented token tree including nested tokens
    Tree,
    /// JSON document per input
    Json,
}
