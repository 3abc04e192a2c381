//! Tokenizer
//!
//! Applies a [`RuleSet`] to text and produces a [`TokenStream`]. Tokenizing
//! never fails: text no rule matches becomes plain tokens one character at a
//! time, so the stream always reconstructs the input.

mod metrics;
mod scanner;

#[cfg(test)]
mod property_tests;

pub use metrics::TokenizerMetrics;

use crate::config::runtime::TokenizerPreferences;
use crate::grammar::RuleSet;
use crate::logging::codes;
use crate::tokens::TokenStream;
use std::time::Instant;

/// Tokenizer with per-call metrics
#[derive(Debug, Default)]
pub struct Tokenizer {
    metrics: TokenizerMetrics,
    preferences: TokenizerPreferences,
}

impl Tokenizer {
    /// Create a tokenizer with preferences from the environment
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: TokenizerPreferences) -> Self {
        Self {
            metrics: TokenizerMetrics::default(),
            preferences,
        }
    }

    /// Tokenize `text` with `rules`.
    ///
    /// Metrics from the previous call are replaced.
    pub fn tokenize(&mut self, text: &str, rules: &RuleSet) -> TokenStream {
        let start = Instant::now();

        let tokens = scanner::scan(text, rules, self.preferences.log_unmatched_characters);
        let stream = TokenStream::new(tokens);

        self.metrics = TokenizerMetrics {
            input_bytes: text.len(),
            total_tokens: stream.len(),
            ..TokenizerMetrics::default()
        };
        if self.preferences.collect_metrics {
            self.metrics.record_stream(&stream);
        }
        self.metrics.duration = start.elapsed();

        if self.preferences.log_completion {
            log_debug!("Tokenization complete",
                "bytes" => text.len(),
                "tokens" => stream.len(),
                "rules" => rules.len()
            );
            log_performance!(codes::success::TOKENIZATION_COMPLETE, "Tokenization complete",
                duration = self.metrics.duration,
                "bytes" => self.metrics.input_bytes,
                "tokens" => self.metrics.total_tokens,
                "classified" => self.metrics.classified_tokens,
                "plain" => self.metrics.plain_tokens,
                "max_depth" => self.metrics.max_depth
            );
        }

        stream
    }

    pub fn metrics(&self) -> &TokenizerMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &TokenizerPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: TokenizerPreferences) {
        self.preferences = preferences;
    }
}

/// Tokenize with a fresh [`Tokenizer`]
pub fn tokenize(text: &str, rules: &RuleSet) -> TokenStream {
    Tokenizer::new().tokenize(text, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{builtin, GrammarComposer, Rule};
    use crate::pattern::Pattern;
    use crate::tokens::Token;

    fn preferences(collect_metrics: bool) -> TokenizerPreferences {
        TokenizerPreferences {
            collect_metrics,
            log_unmatched_characters: false,
            log_completion: false,
        }
    }

    fn significant(stream: &TokenStream) -> Vec<(&str, &str)> {
        stream
            .significant()
            .map(|token| (token.category_name(), token.lexeme()))
            .collect()
    }

    fn composer() -> GrammarComposer {
        GrammarComposer::with_preferences(crate::config::runtime::RegistryPreferences {
            log_registrations: false,
            warn_missing_exclusions: false,
            load_builtin_grammars: false,
        })
    }

    #[test]
    fn test_rules_apply_in_order() {
        let rules = RuleSet::from_patterns([
            ("keyword", r"\b(?:if|else)\b"),
            ("number", r"\d+"),
            ("operator", r"[<>]=?|="),
        ])
        .unwrap();

        let stream = tokenize("if x >= 10", &rules);
        assert_eq!(
            significant(&stream),
            [
                ("keyword", "if"),
                ("plain", "x"),
                ("operator", ">="),
                ("number", "10")
            ]
        );
        assert_eq!(stream.reconstruct(), "if x >= 10");
    }

    #[test]
    fn test_tiny_grammar_classifies_builtins_and_tags() {
        let clike = builtin::clike().unwrap();
        let tiny = builtin::tiny(&clike, &composer()).unwrap();
        let source = "null; @loop(7)";

        let mut tokenizer = Tokenizer::with_preferences(preferences(true));
        let stream = tokenizer.tokenize(source, &tiny);

        assert!(stream.verify(source).is_ok());
        assert_eq!(stream.tokens()[0].category_name(), "builtin");
        assert_eq!(stream.tokens()[0].lexeme(), "null");

        let tag = stream
            .iter()
            .find(|token| token.is("tag"))
            .expect("tag token");
        assert_eq!(tag.lexeme(), "@loop");
        assert!(tag.children().iter().any(|child| child.is("identifier")));
        assert_eq!(tokenizer.metrics().count("number"), 1);
    }

    #[test]
    fn test_c_macro_nests_directive() {
        let clike = builtin::clike().unwrap();
        let c = builtin::c(&clike, &composer()).unwrap();
        let source = "#include <stdio.h>\nint main() { return 0; }\n";

        let mut tokenizer = Tokenizer::with_preferences(preferences(true));
        let stream = tokenizer.tokenize(source, &c);

        assert!(stream.verify(source).is_ok());
        let first = &stream.tokens()[0];
        assert_eq!(first.category_name(), "macro");
        assert_eq!(first.alias(), Some("property"));
        assert!(first.children().iter().any(|child| child.is("directive")));
        assert!(tokenizer.metrics().max_depth >= 1);
        assert!(tokenizer.metrics().nested_tokens >= 1);
    }

    #[test]
    fn test_excluded_category_never_appears() {
        let clike = builtin::clike().unwrap();
        let without_numbers = composer().exclude(&clike, ["number"]);
        let stream = tokenize("x = 42;", &without_numbers);

        assert!(stream.walk().all(|(_, token)| !token.is("number")));
        assert_eq!(stream.reconstruct(), "x = 42;");
    }

    #[test]
    fn test_override_replaces_in_place() {
        let clike = builtin::clike().unwrap();
        let keyword = Rule::named("keyword", Pattern::new(r"\bloop\b").unwrap()).unwrap();
        let rules = composer().extend(&clike, [keyword]).unwrap();

        let stream = tokenize("loop if", &rules);
        assert_eq!(
            significant(&stream),
            [("keyword", "loop"), ("plain", "i"), ("plain", "f")]
        );
    }

    #[test]
    fn test_unicode_round_trip() {
        let clike = builtin::clike().unwrap();
        let source = "/* héllo */ s = \"wörld €\"; // ✓\n";
        let stream = tokenize(source, &clike);

        assert!(stream.verify(source).is_ok());
        assert_eq!(stream.reconstruct(), source);
        assert_eq!(stream.tokens()[0].category_name(), "comment");
    }

    #[test]
    fn test_deterministic() {
        let clike = builtin::clike().unwrap();
        let source = "while (i < 10) { i++; }";
        assert_eq!(tokenize(source, &clike), tokenize(source, &clike));
    }

    #[test]
    fn test_metrics_respect_preferences() {
        let rules = RuleSet::from_patterns([("number", r"\d+")]).unwrap();

        let mut tokenizer = Tokenizer::with_preferences(preferences(false));
        let stream = tokenizer.tokenize("1 2", &rules);
        assert_eq!(tokenizer.metrics().total_tokens, stream.len());
        assert_eq!(tokenizer.metrics().input_bytes, 3);
        assert!(tokenizer.metrics().category_counts.is_empty());

        tokenizer.set_preferences(preferences(true));
        tokenizer.tokenize("1 2", &rules);
        assert_eq!(tokenizer.metrics().count("number"), 2);
        assert_eq!(tokenizer.metrics().count("plain"), 1);
        assert_eq!(tokenizer.metrics().classified_tokens, 2);
        assert_eq!(tokenizer.metrics().plain_tokens, 1);
    }

    #[test]
    fn test_empty_rule_set_yields_plain_characters() {
        let stream = tokenize("ab", &RuleSet::empty());
        assert!(stream.iter().all(Token::is_plain));
        assert_eq!(stream.len(), 2);
    }
}
