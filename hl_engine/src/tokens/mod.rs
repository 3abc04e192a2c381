//! Token system for the highlighting engine
//!
//! The tokenizer turns text into a [`TokenStream`]: an ordered, gap-free
//! sequence of [`Token`]s covering the input exactly. Each token carries
//!
//! - its category (`None` for plain text no rule matched),
//! - an optional alias copied from the pattern that produced it,
//! - the lexeme and its absolute byte span,
//! - child tokens when the pattern tokenized captured text recursively.
//!
//! ## Invariants
//!
//! Concatenating the top-level lexemes reproduces the input. Children of a
//! token are contiguous and cover the parent span; text between captures is
//! represented by plain children. [`TokenStream::verify`] checks both.
//!
//! ## Renderer helpers
//!
//! Renderers usually want fewer nodes: [`TokenStream::merge_plain`] coalesces
//! runs of plain text and [`TokenStream::significant`] skips whitespace.

pub mod token;
pub mod token_stream;

pub use token::Token;
pub use token_stream::{TokenStream, TokenStreamError, Walk};
