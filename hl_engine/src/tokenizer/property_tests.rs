//! Property-based tests for the built-in grammars
//!
//! Every stream must reconstruct its input exactly, whatever the text and
//! whichever grammar scanned it. Excluding a category must remove it from
//! every level of the stream.

use super::Tokenizer;
use crate::config::runtime::{RegistryPreferences, TokenizerPreferences};
use crate::grammar::{builtin, Category, GrammarComposer, RuleSet};
use proptest::prelude::*;
use std::sync::OnceLock;

fn quiet_composer() -> GrammarComposer {
    GrammarComposer::with_preferences(RegistryPreferences {
        log_registrations: false,
        warn_missing_exclusions: false,
        load_builtin_grammars: false,
    })
}

fn quiet_tokenizer() -> Tokenizer {
    Tokenizer::with_preferences(TokenizerPreferences {
        collect_metrics: true,
        log_unmatched_characters: false,
        log_completion: false,
    })
}

/// The four built-ins, built once outside any registry
fn grammars() -> &'static [(&'static str, RuleSet)] {
    static GRAMMARS: OnceLock<Vec<(&'static str, RuleSet)>> = OnceLock::new();
    GRAMMARS.get_or_init(|| {
        let composer = quiet_composer();
        let clike = builtin::clike().unwrap();
        let c = builtin::c(&clike, &composer).unwrap();
        let tiny = builtin::tiny(&clike, &composer).unwrap();
        let tiny_support = builtin::tiny_support(&c, &composer).unwrap();
        vec![
            (builtin::CLIKE, clike),
            (builtin::C, c),
            (builtin::TINY, tiny),
            (builtin::TINY_SUPPORT, tiny_support),
        ]
    })
}

/// Arbitrary Unicode, or text dense in the characters the grammars care about
fn source_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-zA-Z0-9_ @\"'\\\\/*+=<>!%^&|.,;:?~#(){}\\[\\]\r\n\t-]{0,96}",
        "(var|fun|if|int|#include|true|NULL|@tag|0x1F|1.5e3|\"s\"|'c'|/\\* c \\*/|// c\n| |;|<=>|/%=){0,24}",
    ]
}

fn grammar_strategy() -> impl Strategy<Value = usize> {
    0..grammars().len()
}

proptest! {
    #[test]
    fn test_every_grammar_reconstructs_input(
        source in source_strategy(),
        grammar in grammar_strategy()
    ) {
        let (name, rules) = &grammars()[grammar];
        let mut tokenizer = quiet_tokenizer();
        let stream = tokenizer.tokenize(&source, rules);

        prop_assert_eq!(stream.reconstruct(), source.clone(), "grammar {}", name);
        prop_assert!(stream.verify(&source).is_ok(), "grammar {}", name);
        prop_assert_eq!(tokenizer.metrics().input_bytes, source.len());
    }

    #[test]
    fn test_tokens_are_never_empty(
        source in source_strategy(),
        grammar in grammar_strategy()
    ) {
        let (_, rules) = &grammars()[grammar];
        let stream = quiet_tokenizer().tokenize(&source, rules);

        for (_, token) in stream.walk() {
            prop_assert!(!token.lexeme().is_empty());
            prop_assert_eq!(token.span().len(), token.lexeme().len());
        }
    }

    #[test]
    fn test_excluded_category_never_appears(
        source in source_strategy(),
        grammar in grammar_strategy(),
        pick in any::<prop::sample::Index>()
    ) {
        let (name, rules) = &grammars()[grammar];
        let categories: Vec<&str> = rules.categories().map(Category::as_str).collect();
        let excluded = categories[pick.index(categories.len())];

        let reduced = quiet_composer().exclude(rules, [excluded]);
        let stream = quiet_tokenizer().tokenize(&source, &reduced);

        prop_assert_eq!(reduced.len(), rules.len() - 1);
        for (_, token) in stream.walk() {
            prop_assert_ne!(token.category_name(), excluded, "grammar {}", name);
        }
        prop_assert_eq!(stream.reconstruct(), source);
    }
}
