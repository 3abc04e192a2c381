//! Tokenization metrics

use crate::config::compile_time::tokenizer::METRICS_BUFFER_SIZE;
use crate::tokens::TokenStream;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Counters for the most recent tokenize call
#[derive(Debug, Default, Clone, Serialize)]
pub struct TokenizerMetrics {
    pub input_bytes: usize,
    /// Top-level tokens
    pub total_tokens: usize,
    pub classified_tokens: usize,
    pub plain_tokens: usize,
    /// Tokens produced by nested rule sets, at any depth below the top level
    pub nested_tokens: usize,
    pub max_depth: usize,
    /// Per-category counts, at most `METRICS_BUFFER_SIZE` distinct names
    pub category_counts: BTreeMap<String, usize>,
    /// Tokens whose category did not fit in `category_counts`
    pub untracked_tokens: usize,
    pub duration: Duration,
}

impl TokenizerMetrics {
    /// Walk a finished stream and fill in the structural counters
    pub(crate) fn record_stream(&mut self, stream: &TokenStream) {
        self.total_tokens = stream.len();

        for (depth, token) in stream.walk() {
            if token.is_plain() {
                self.plain_tokens += 1;
            } else {
                self.classified_tokens += 1;
            }

            if depth > 0 {
                self.nested_tokens += 1;
            }
            self.max_depth = self.max_depth.max(depth);

            self.record_category(token.category_name(), METRICS_BUFFER_SIZE);
        }
    }

    /// Count one token of `name`, tracking at most `capacity` distinct names
    fn record_category(&mut self, name: &str, capacity: usize) {
        let tracked = self.category_counts.len();
        match self.category_counts.get_mut(name) {
            Some(count) => *count += 1,
            None if tracked < capacity => {
                self.category_counts.insert(name.to_string(), 1);
            }
            None => self.untracked_tokens += 1,
        }
    }

    pub fn count(&self, category: &str) -> usize {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    /// Input bytes per millisecond, 0 when the call was too fast to time
    pub fn bytes_per_ms(&self) -> f64 {
        let millis = self.duration.as_secs_f64() * 1000.0;
        if millis > 0.0 {
            self.input_bytes as f64 / millis
        } else {
            0.0
        }
    }
}
