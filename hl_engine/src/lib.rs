//! Grammar composition and tokenization engine for pattern-based syntax
//! highlighting.
//!
//! Grammars are ordered rule sets built once with the composer and stored in
//! a process-wide registry. [`tokenize`] looks a grammar up by name and scans
//! text into a [`TokenStream`].

// Internal modules
#[macro_use]
pub mod logging;
pub mod config;
pub mod error;
pub mod grammar;
pub mod pattern;
pub mod tokenizer;
pub mod tokens;
pub mod utils;

use crate::config::compile_time::tokenizer::MAX_INPUT_SIZE;
use crate::grammar::registry;
use crate::logging::codes;
use std::sync::Arc;

// Re-export key types for library consumers
pub use error::HighlightError;
pub use grammar::{Category, ConfigurationError, GrammarComposer, GrammarRegistry, Rule, RuleSet};
pub use pattern::{Pattern, PatternError};
pub use tokenizer::{Tokenizer, TokenizerMetrics};
pub use tokens::{Token, TokenStream};
pub use utils::Span;

/// Register a grammar in the global registry. Existing names are never
/// overwritten.
pub fn register_grammar(name: &str, rule_set: RuleSet) -> Result<(), ConfigurationError> {
    registry::write_global().register(name, rule_set)?;
    Ok(())
}

/// Derive a rule set from a registered grammar: `extend` then `exclude`
pub fn compose_grammar<I, D, C>(
    base_name: &str,
    overrides: I,
    deletions: D,
) -> Result<RuleSet, ConfigurationError>
where
    I: IntoIterator<Item = Rule>,
    D: IntoIterator<Item = C>,
    C: AsRef<str>,
{
    registry::read_global().compose(base_name, overrides, deletions)
}

pub fn grammar(name: &str) -> Option<Arc<RuleSet>> {
    registry::read_global().get(name)
}

/// Registered grammar names, sorted
pub fn grammar_names() -> Vec<String> {
    registry::read_global().names()
}

/// Tokenize `text` with the registered grammar `grammar_name`
pub fn tokenize(text: &str, grammar_name: &str) -> Result<TokenStream, HighlightError> {
    if text.len() > MAX_INPUT_SIZE {
        log_error!(codes::tokenizer::INPUT_TOO_LARGE, "Input rejected",
            "grammar" => grammar_name,
            "size" => text.len(),
            "max" => MAX_INPUT_SIZE
        );
        return Err(HighlightError::input_too_large(text.len(), MAX_INPUT_SIZE));
    }

    // the read lock is released before scanning
    let rules = registry::read_global().require(grammar_name)?;

    Ok(Tokenizer::new().tokenize(text, &rules))
}
