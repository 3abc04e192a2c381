//! Shared primitive types used by the tokenizer and token streams.

pub mod span;

pub use span::Span;
