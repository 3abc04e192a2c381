//! # hl CLI
//!
//! Input discovery, parallel tokenization and token stream rendering for the
//! `hl` binary.

pub mod args;
pub mod batch;
pub mod error;
pub mod inputs;
pub mod render;

pub use args::{Cli, OutputFormat};
pub use batch::{tokenize_files, tokenize_text, FileReport};
pub use error::CliError;
pub use inputs::collect_inputs;
