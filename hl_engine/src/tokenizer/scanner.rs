//! The scan loop
//!
//! Rules are tried in order at each offset and the first one matching
//! exactly there wins. Each rule remembers its last search result: a rule
//! whose next match starts ahead of the offset cannot match before it, so
//! it is skipped without searching until the scan catches up. A rule that
//! found nothing is never searched again. Offsets only move forward, which
//! keeps the scan close to linear in the input length.

use crate::grammar::{Rule, RuleSet};
use crate::pattern::{Pattern, PatternMatch};
use crate::tokens::Token;
use crate::utils::Span;
use std::cmp::Reverse;

/// Last search result of one rule
#[derive(Debug, Clone)]
enum Lookahead {
    Unsearched,
    Found(PatternMatch),
    Exhausted,
}

/// A winning rule at the current offset
struct Hit {
    rule: usize,
    found: PatternMatch,
    span: Span,
}

pub(crate) struct Scanner<'a> {
    text: &'a str,
    /// Absolute offset of `text` within the original input
    base: usize,
    rules: &'a RuleSet,
    lookahead: Vec<Lookahead>,
    log_unmatched: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str, base: usize, rules: &'a RuleSet, log_unmatched: bool) -> Self {
        Self {
            text,
            base,
            rules,
            lookahead: vec![Lookahead::Unsearched; rules.len()],
            log_unmatched,
        }
    }

    pub(crate) fn run(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < self.text.len() {
            match self.find_hit(offset) {
                Some(hit) => {
                    offset = hit.span.end;
                    tokens.push(self.build_token(hit));
                }
                None => {
                    let width = self.text[offset..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                    let span = Span::new(offset, offset + width);

                    if self.log_unmatched {
                        log_debug!("No rule matched",
                            "offset" => self.base + offset,
                            "text" => span.slice(self.text).escape_debug()
                        );
                    }

                    tokens.push(Token::plain(span.slice(self.text), span.shifted(self.base)));
                    offset = span.end;
                }
            }
        }

        tokens
    }

    fn find_hit(&mut self, offset: usize) -> Option<Hit> {
        let rules: &'a RuleSet = self.rules;

        for (index, rule) in rules.iter().enumerate() {
            let pattern = rule.pattern();

            let stale = match &self.lookahead[index] {
                Lookahead::Exhausted => continue,
                Lookahead::Found(found) => found.start() < offset,
                Lookahead::Unsearched => true,
            };

            if stale {
                self.lookahead[index] = match pattern.search_from(self.text, offset) {
                    Some(found) => Lookahead::Found(found),
                    None => Lookahead::Exhausted,
                };
            }

            if let Lookahead::Found(found) = &self.lookahead[index] {
                if found.start() != offset {
                    continue;
                }
                // zero-length or misplaced token group: no match here
                if let Some(span) = pattern.token_span(found) {
                    return Some(Hit {
                        rule: index,
                        found: found.clone(),
                        span,
                    });
                }
            }
        }

        None
    }

    fn build_token(&self, hit: Hit) -> Token {
        let rules: &'a RuleSet = self.rules;
        let rule: &'a Rule = &rules.rules()[hit.rule];
        let pattern = rule.pattern();

        let token = Token::classified(
            rule.category().clone(),
            hit.span.slice(self.text),
            hit.span.shifted(self.base),
        )
        .with_alias(pattern.alias().map(str::to_string));

        if pattern.captures().is_empty() {
            return token;
        }

        let children = self.nested_children(pattern, &hit.found, hit.span);
        token.with_children(children)
    }

    /// Tokenize bound captures; text around them becomes plain children
    fn nested_children(&self, pattern: &'a Pattern, found: &PatternMatch, span: Span) -> Vec<Token> {
        let mut captures: Vec<(Span, &'a RuleSet)> = pattern
            .captures()
            .iter()
            .filter_map(|capture| {
                let group = if capture.index() == 0 {
                    span
                } else {
                    found.group(capture.index())?
                };
                let usable = !group.is_empty() && span.contains_span(&group);
                usable.then_some((group, capture.rules().as_ref()))
            })
            .collect();

        if captures.is_empty() {
            return Vec::new();
        }

        captures.sort_by_key(|(group, _)| (group.start, Reverse(group.end)));

        let mut children = Vec::new();
        let mut cursor = span.start;

        for (group, nested_rules) in captures {
            if group.start < cursor {
                // overlaps a capture already tokenized
                continue;
            }

            if group.start > cursor {
                children.push(self.gap(cursor, group.start));
            }

            let nested = Scanner::new(
                group.slice(self.text),
                self.base + group.start,
                nested_rules,
                self.log_unmatched,
            );
            children.extend(nested.run());
            cursor = group.end;
        }

        if cursor < span.end {
            children.push(self.gap(cursor, span.end));
        }

        children
    }

    fn gap(&self, start: usize, end: usize) -> Token {
        let span = Span::new(start, end);
        Token::plain(span.slice(self.text), span.shifted(self.base))
    }
}

/// Scan `text` from offset 0 with `rules`
pub(crate) fn scan(text: &str, rules: &RuleSet, log_unmatched: bool) -> Vec<Token> {
    Scanner::new(text, 0, rules, log_unmatched).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;

    fn lexemes(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens
            .iter()
            .map(|token| (token.category_name(), token.lexeme()))
            .collect()
    }

    #[test]
    fn test_first_rule_wins_not_longest() {
        let rules = RuleSet::from_patterns([("short", "ab"), ("long", "abcd")]).unwrap();
        let tokens = scan("abcd", &rules, false);
        assert_eq!(
            lexemes(&tokens),
            [("short", "ab"), ("plain", "c"), ("plain", "d")]
        );
    }

    #[test]
    fn test_cached_lookahead_skips_until_match() {
        let rules = RuleSet::from_patterns([("number", r"\d+"), ("word", "[a-z]+")]).unwrap();
        let tokens = scan("ab 12 cd 3", &rules, false);
        assert_eq!(
            lexemes(&tokens),
            [
                ("word", "ab"),
                ("plain", " "),
                ("number", "12"),
                ("plain", " "),
                ("word", "cd"),
                ("plain", " "),
                ("number", "3"),
            ]
        );
    }

    #[test]
    fn test_cache_does_not_hide_matches_created_by_context() {
        // `\bx` cannot match inside "ax" but can at the later word start
        let rules = RuleSet::from_patterns([("x", r"\bx"), ("word", "a")]).unwrap();
        let tokens = scan("ax x", &rules, false);
        assert_eq!(
            lexemes(&tokens),
            [("word", "a"), ("plain", "x"), ("plain", " "), ("x", "x")]
        );
    }

    #[test]
    fn test_zero_length_match_falls_through() {
        let rules = RuleSet::from_patterns([("maybe", "a*"), ("b", "b")]).unwrap();
        let tokens = scan("bab", &rules, false);
        assert_eq!(lexemes(&tokens), [("b", "b"), ("maybe", "a"), ("b", "b")]);
    }

    #[test]
    fn test_multibyte_fallback() {
        let rules = RuleSet::from_patterns([("word", "[a-z]+")]).unwrap();
        let tokens = scan("é€a", &rules, false);
        assert_eq!(
            lexemes(&tokens),
            [("plain", "é"), ("plain", "€"), ("word", "a")]
        );
        assert_eq!(tokens[1].span(), Span::new(2, 5));
    }

    #[test]
    fn test_token_group_does_not_consume_context() {
        let function = Pattern::builder(r"\b([a-z]+)\(").token_group(1).build().unwrap();
        let rules = RuleSet::from_rules([
            ("function", function),
            ("punctuation", Pattern::new(r"[()]").unwrap()),
        ])
        .unwrap();

        let tokens = scan("f(x)", &rules, false);
        assert_eq!(
            lexemes(&tokens),
            [
                ("function", "f"),
                ("punctuation", "("),
                ("plain", "x"),
                ("punctuation", ")")
            ]
        );
    }

    #[test]
    fn test_nested_capture_spans_are_absolute() {
        let identifier = RuleSet::from_patterns([("identifier", "[a-z]+")]).unwrap();
        let tag = Pattern::builder("@([a-z]+)!").capture(1, identifier).build().unwrap();
        let rules = RuleSet::from_rules([("tag", tag)]).unwrap();

        let tokens = scan("  @foo!", &rules, false);
        let tag = &tokens[2];

        assert_eq!(tag.span(), Span::new(2, 7));
        assert_eq!(
            lexemes(tag.children()),
            [("plain", "@"), ("identifier", "foo"), ("plain", "!")]
        );
        assert_eq!(tag.children()[1].span(), Span::new(3, 6));
    }

    #[test]
    fn test_whole_match_capture() {
        let inner = RuleSet::from_patterns([("escape", r"\\."), ("quote", "\"")]).unwrap();
        let string = Pattern::builder(r#""(?:\\.|[^\\"])*""#)
            .capture(0, inner)
            .build()
            .unwrap();
        let rules = RuleSet::from_rules([("string", string)]).unwrap();

        let tokens = scan(r#""a\nb""#, &rules, false);
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            lexemes(tokens[0].children()),
            [
                ("quote", "\""),
                ("plain", "a"),
                ("escape", r"\n"),
                ("plain", "b"),
                ("quote", "\"")
            ]
        );
    }

    #[test]
    fn test_overlapping_and_missing_captures_are_ignored() {
        let word = RuleSet::from_patterns([("word", "[a-z]+")]).unwrap();
        let digits = RuleSet::from_patterns([("digits", "[0-9]+")]).unwrap();
        let pattern = Pattern::builder("(([a-z]+)[0-9]*)|(#)")
            .capture(1, word.clone())
            .capture(2, word)
            .capture(3, digits)
            .build()
            .unwrap();
        let rules = RuleSet::from_rules([("item", pattern)]).unwrap();

        let tokens = scan("ab12", &rules, false);
        // group 1 wins over the nested group 2; group 3 did not participate
        assert_eq!(
            lexemes(tokens[0].children()),
            [("word", "ab"), ("plain", "1"), ("plain", "2")]
        );
    }

    #[test]
    fn test_alias_is_carried() {
        let pattern = Pattern::builder("#[a-z]+").alias("property").build().unwrap();
        let rules = RuleSet::from_rules([("macro", pattern)]).unwrap();
        let tokens = scan("#define", &rules, false);
        assert_eq!(tokens[0].alias(), Some("property"));
    }

    #[test]
    fn test_empty_input_and_empty_rules() {
        let rules = RuleSet::empty();
        assert!(scan("", &rules, false).is_empty());
        assert_eq!(scan("ab", &rules, true).len(), 2);
    }
}
