//! Token streams produced by the tokenizer

use super::token::Token;
use crate::utils::Span;
use serde::Serialize;
use std::collections::BTreeMap;

/// Ordered top-level tokens covering an input from offset 0 to its length
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Number of top-level tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Depth-first pre-order walk over every token, with its nesting depth
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self.tokens.iter())],
        }
    }

    /// Tokens without children, in source order
    pub fn leaves(&self) -> impl Iterator<Item = &Token> + '_ {
        self.walk()
            .map(|(_, token)| token)
            .filter(|token| token.is_leaf())
    }

    /// Top-level tokens that are not whitespace-only plain text
    pub fn significant(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(|token| !token.is_whitespace())
    }

    /// Concatenated top-level lexemes; equals the tokenized input
    pub fn reconstruct(&self) -> String {
        let capacity = self.tokens.last().map_or(0, |token| token.span().end);
        let mut text = String::with_capacity(capacity);
        for token in &self.tokens {
            text.push_str(token.lexeme());
        }
        text
    }

    /// Occurrences per category name over all tokens, nested ones included
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (_, token) in self.walk() {
            *counts.entry(token.category_name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Copy with adjacent top-level plain tokens coalesced
    pub fn merge_plain(&self) -> TokenStream {
        let mut merged: Vec<Token> = Vec::with_capacity(self.tokens.len());

        for token in &self.tokens {
            match merged.last_mut() {
                Some(previous) if previous.is_plain() && token.is_plain() => {
                    previous.absorb_plain(token);
                }
                _ => merged.push(token.clone()),
            }
        }

        TokenStream::new(merged)
    }

    /// Check that the stream covers `source` exactly.
    ///
    /// Top-level tokens must be contiguous from 0 to `source.len()`, every
    /// lexeme must equal the source text under its span, and children must
    /// be contiguous and cover their parent.
    pub fn verify(&self, source: &str) -> Result<(), TokenStreamError> {
        let end = verify_sequence(&self.tokens, Span::new(0, source.len()), source)?;
        if end != source.len() {
            return Err(TokenStreamError::Incomplete {
                covered: end,
                expected: source.len(),
            });
        }
        Ok(())
    }
}

fn verify_sequence(tokens: &[Token], parent: Span, source: &str) -> Result<usize, TokenStreamError> {
    let mut cursor = parent.start;

    for token in tokens {
        let span = token.span();
        if span.start != cursor {
            return Err(TokenStreamError::Gap {
                expected: cursor,
                found: span.start,
            });
        }

        if span.is_empty() || !parent.contains_span(&span) {
            return Err(TokenStreamError::InvalidSpan { span });
        }

        if source.get(span.start..span.end) != Some(token.lexeme()) {
            return Err(TokenStreamError::LexemeMismatch { span });
        }

        if !token.is_leaf() {
            let children_end = verify_sequence(token.children(), span, source)?;
            if children_end != span.end {
                return Err(TokenStreamError::ChildrenIncomplete { span });
            }
        }

        cursor = span.end;
    }

    Ok(cursor)
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Pre-order iterator returned by [`TokenStream::walk`]
pub struct Walk<'a> {
    stack: Vec<(usize, std::slice::Iter<'a, Token>)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Token);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (depth, siblings) = self.stack.last_mut()?;
            let depth = *depth;

            match siblings.next() {
                Some(token) => {
                    if !token.is_leaf() {
                        self.stack.push((depth + 1, token.children().iter()));
                    }
                    return Some((depth, token));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Structural problems found by [`TokenStream::verify`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenStreamError {
    #[error("Expected a token starting at {expected}, found one at {found}")]
    Gap { expected: usize, found: usize },

    #[error("Token span {span} is empty or outside its parent")]
    InvalidSpan { span: Span },

    #[error("Token lexeme does not match the source at {span}")]
    LexemeMismatch { span: Span },

    #[error("Children of the token at {span} do not cover it")]
    ChildrenIncomplete { span: Span },

    #[error("Tokens cover {covered} of {expected} bytes")]
    Incomplete { covered: usize, expected: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Category;
    use assert_matches::assert_matches;

    fn category(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    /// `@foo x` with a nested tag
    fn sample() -> (String, TokenStream) {
        let source = "@foo x".to_string();
        let tag = Token::classified(category("tag"), "@foo", Span::new(0, 4)).with_children(vec![
            Token::plain("@", Span::new(0, 1)),
            Token::classified(category("identifier"), "foo", Span::new(1, 4)),
        ]);
        let stream = TokenStream::new(vec![
            tag,
            Token::plain(" ", Span::new(4, 5)),
            Token::plain("x", Span::new(5, 6)),
        ]);
        (source, stream)
    }

    #[test]
    fn test_reconstruct_and_verify() {
        let (source, stream) = sample();
        assert_eq!(stream.reconstruct(), source);
        assert!(stream.verify(&source).is_ok());
        assert_eq!(stream.len(), 3);
    }

    #[test]
    fn test_walk_is_preorder_with_depth() {
        let (_, stream) = sample();
        let visited: Vec<(usize, &str)> = stream
            .walk()
            .map(|(depth, token)| (depth, token.lexeme()))
            .collect();

        assert_eq!(
            visited,
            [(0, "@foo"), (1, "@"), (1, "foo"), (0, " "), (0, "x")]
        );

        let leaves: Vec<&str> = stream.leaves().map(Token::lexeme).collect();
        assert_eq!(leaves, ["@", "foo", " ", "x"]);
    }

    #[test]
    fn test_category_counts_include_nested() {
        let (_, stream) = sample();
        let counts = stream.category_counts();
        assert_eq!(counts.get("tag"), Some(&1));
        assert_eq!(counts.get("identifier"), Some(&1));
        assert_eq!(counts.get("plain"), Some(&3));
    }

    #[test]
    fn test_merge_plain_and_significant() {
        let (source, stream) = sample();
        let merged = stream.merge_plain();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.tokens()[1].lexeme(), " x");
        assert_eq!(merged.reconstruct(), source);
        assert!(merged.verify(&source).is_ok());

        let significant: Vec<&str> = stream.significant().map(Token::lexeme).collect();
        assert_eq!(significant, ["@foo", "x"]);
    }

    #[test]
    fn test_verify_detects_problems() {
        let (source, stream) = sample();

        let mut tokens = stream.clone().into_tokens();
        tokens.remove(1);
        assert_matches!(
            TokenStream::new(tokens).verify(&source),
            Err(TokenStreamError::Gap { expected: 4, found: 5 })
        );

        let mut tokens = stream.clone().into_tokens();
        tokens.pop();
        assert_matches!(
            TokenStream::new(tokens).verify(&source),
            Err(TokenStreamError::Incomplete { covered: 5, expected: 6 })
        );

        assert_matches!(
            stream.verify("@bar x"),
            Err(TokenStreamError::LexemeMismatch { .. })
        );

        let partial = Token::classified(category("tag"), "@foo", Span::new(0, 4))
            .with_children(vec![Token::plain("@", Span::new(0, 1))]);
        assert_matches!(
            TokenStream::new(vec![partial]).verify("@foo"),
            Err(TokenStreamError::ChildrenIncomplete { .. })
        );
    }

    #[test]
    fn test_serializes_as_array() {
        let (_, stream) = sample();
        let json = serde_json::to_value(&stream).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 3);
    }
}
