//! Classified spans of source text

use crate::grammar::{Category, PLAIN};
use crate::utils::Span;
use serde::{Serialize, Serializer};
use std::fmt;

/// A classified span of the input.
///
/// A token without a category is plain text no rule matched. Tokens produced
/// by a pattern with bound capture groups carry children; children are
/// contiguous and cover the parent span exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(serialize_with = "serialize_category")]
    category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alias: Option<String>,
    lexeme: String,
    span: Span,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Token>,
}

fn serialize_category<S: Serializer>(
    category: &Option<Category>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(category.as_ref().map_or(PLAIN, Category::as_str))
}

impl Token {
    /// Unclassified text
    pub fn plain(lexeme: &str, span: Span) -> Self {
        Self {
            category: None,
            alias: None,
            lexeme: lexeme.to_string(),
            span,
            children: Vec::new(),
        }
    }

    pub fn classified(category: Category, lexeme: &str, span: Span) -> Self {
        Self {
            category: Some(category),
            alias: None,
            lexeme: lexeme.to_string(),
            span,
            children: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }

    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    /// Category name, `plain` for unclassified text
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map_or(PLAIN, Category::as_str)
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn children(&self) -> &[Token] {
        &self.children
    }

    pub fn is_plain(&self) -> bool {
        self.category.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Plain text made only of whitespace
    pub fn is_whitespace(&self) -> bool {
        self.is_plain() && self.lexeme.chars().all(char::is_whitespace)
    }

    /// Whether the token's category or alias is `name`
    pub fn is(&self, name: &str) -> bool {
        self.category_name() == name || self.alias() == Some(name)
    }

    /// Append another plain token that directly follows this one
    pub(crate) fn absorb_plain(&mut self, next: &Token) {
        debug_assert!(self.is_plain() && next.is_plain());
        debug_assert_eq!(self.span.end, next.span.start);
        self.lexeme.push_str(&next.lexeme);
        self.span = self.span.merge(next.span);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.category_name(), self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyword(lexeme: &str, start: usize) -> Token {
        Token::classified(
            Category::new("keyword").unwrap(),
            lexeme,
            Span::new(start, start + lexeme.len()),
        )
    }

    #[test]
    fn test_plain_token() {
        let token = Token::plain(" ", Span::new(3, 4));
        assert!(token.is_plain());
        assert!(token.is_whitespace());
        assert_eq!(token.category_name(), "plain");
        assert!(token.is("plain"));
        assert_eq!(token.to_string(), "plain(\" \")");
    }

    #[test]
    fn test_alias_matching() {
        let token = keyword("fun", 0).with_alias(Some("property".to_string()));
        assert!(token.is("keyword"));
        assert!(token.is("property"));
        assert!(!token.is("string"));
        assert!(!token.is_whitespace());
    }

    #[test]
    fn test_serialization() {
        let token = Token::classified(Category::new("tag").unwrap(), "@foo", Span::new(0, 4))
            .with_children(vec![
                Token::plain("@", Span::new(0, 1)),
                Token::classified(Category::new("identifier").unwrap(), "foo", Span::new(1, 4)),
            ]);

        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["category"], "tag");
        assert_eq!(json["children"][0]["category"], "plain");
        assert_eq!(json["children"][1]["lexeme"], "foo");
        assert_eq!(json["span"]["end"], 4);
        assert!(json.get("alias").is_none());
    }

    #[test]
    fn test_absorb_plain() {
        let mut first = Token::plain("a", Span::new(0, 1));
        first.absorb_plain(&Token::plain("é", Span::new(1, 3)));
        assert_eq!(first.lexeme(), "aé");
        assert_eq!(first.span(), Span::new(0, 3));
    }
}
