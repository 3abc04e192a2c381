//! Compiled patterns
//!
//! A [`Pattern`] wraps a `regex::Regex` compiled once at composition time,
//! together with the metadata the tokenizer needs: capture groups bound to
//! nested rule sets, an optional alias, and an optional token group.
//!
//! Matching is always performed against the whole input with a start offset,
//! so assertions such as `\b` see the real preceding character. The
//! tokenizer accepts a match only when it begins exactly at the scan offset.

pub mod error;

pub use error::{PatternError, PatternResult};

use crate::config::compile_time::patterns::*;
use crate::grammar::RuleSet;
use crate::utils::Span;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::Arc;

/// Reference to a capture group, by index or by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CaptureGroup {
    Index(usize),
    Name(String),
}

impl CaptureGroup {
    /// Resolve to a group index in `regex`; index 0 is the whole match
    fn resolve(&self, regex: &Regex) -> Option<usize> {
        match self {
            Self::Index(index) => (*index < regex.captures_len()).then_some(*index),
            Self::Name(name) => regex
                .capture_names()
                .position(|candidate| candidate == Some(name.as_str())),
        }
    }
}

impl From<usize> for CaptureGroup {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for CaptureGroup {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for CaptureGroup {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for CaptureGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// Compile flags, set explicitly through the builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PatternFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
}

/// A capture group bound to the rule set that tokenizes its text
#[derive(Debug, Clone)]
pub struct CaptureRule {
    group: CaptureGroup,
    index: usize,
    rules: Arc<RuleSet>,
}

impl CaptureRule {
    /// The group as it was declared
    pub fn group(&self) -> &CaptureGroup {
        &self.group
    }

    /// Resolved group index
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn rules(&self) -> &Arc<RuleSet> {
        &self.rules
    }
}

impl PartialEq for CaptureRule {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && (Arc::ptr_eq(&self.rules, &other.rules) || *self.rules == *other.rules)
    }
}

/// Group spans of a single match, in absolute byte offsets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    span: Span,
    groups: Vec<Option<Span>>,
}

impl PatternMatch {
    fn whole(span: Span) -> Self {
        Self {
            span,
            groups: Vec::new(),
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Span of group `index`, `None` when the group did not participate
    pub fn group(&self, index: usize) -> Option<Span> {
        if index == 0 {
            Some(self.span)
        } else {
            self.groups.get(index).copied().flatten()
        }
    }
}

/// A compiled pattern with its tokenization metadata
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: PatternFlags,
    regex: Regex,
    captures: Vec<CaptureRule>,
    alias: Option<String>,
    token_group: Option<usize>,
    nested_depth: usize,
}

impl Pattern {
    /// Compile a pattern with default flags and no captures
    pub fn new(source: &str) -> PatternResult<Self> {
        Self::builder(source).build()
    }

    pub fn builder(source: &str) -> PatternBuilder {
        PatternBuilder::new(source)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    pub fn captures(&self) -> &[CaptureRule] {
        &self.captures
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn token_group(&self) -> Option<usize> {
        self.token_group
    }

    /// Number of explicit capture groups in the compiled regex
    pub fn capture_group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Depth of the nested rule sets below this pattern, 0 when it binds none
    pub fn nested_depth(&self) -> usize {
        self.nested_depth
    }

    fn needs_groups(&self) -> bool {
        !self.captures.is_empty() || self.token_group.is_some()
    }

    /// Leftmost match starting at or after `offset`.
    ///
    /// `offset` must lie on a char boundary of `text`.
    pub fn search_from(&self, text: &str, offset: usize) -> Option<PatternMatch> {
        if !self.needs_groups() {
            let found = self.regex.find_at(text, offset)?;
            return Some(PatternMatch::whole(Span::new(found.start(), found.end())));
        }

        let captures = self.regex.captures_at(text, offset)?;
        let whole = captures.get(0)?;
        let groups = captures
            .iter()
            .map(|group| group.map(|m| Span::new(m.start(), m.end())))
            .collect();

        Some(PatternMatch {
            span: Span::new(whole.start(), whole.end()),
            groups,
        })
    }

    /// Span a token built from `found` covers.
    ///
    /// Without a token group this is the whole match. With one it is that
    /// group, which must begin at the match start; the remainder of the
    /// match is trailing context. Empty spans yield `None`.
    pub fn token_span(&self, found: &PatternMatch) -> Option<Span> {
        let span = match self.token_group {
            Some(index) => found
                .group(index)
                .filter(|group| group.start == found.start())?,
            None => found.span(),
        };

        (!span.is_empty()).then_some(span)
    }

    /// Token span of a match anchored exactly at `offset`, if any
    pub fn match_at(&self, text: &str, offset: usize) -> Option<Span> {
        let found = self.search_from(text, offset)?;
        if found.start() != offset {
            return None;
        }
        self.token_span(&found)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.flags == other.flags
            && self.captures == other.captures
            && self.alias == other.alias
            && self.token_group == other.token_group
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

/// Builder for [`Pattern`]; all validation happens in [`PatternBuilder::build`]
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    source: String,
    flags: PatternFlags,
    captures: Vec<(CaptureGroup, Arc<RuleSet>)>,
    alias: Option<String>,
    token_group: Option<CaptureGroup>,
}

impl PatternBuilder {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            flags: PatternFlags::default(),
            captures: Vec::new(),
            alias: None,
            token_group: None,
        }
    }

    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.flags.case_insensitive = yes;
        self
    }

    pub fn multi_line(mut self, yes: bool) -> Self {
        self.flags.multi_line = yes;
        self
    }

    pub fn dot_matches_new_line(mut self, yes: bool) -> Self {
        self.flags.dot_matches_new_line = yes;
        self
    }

    /// Tokenize the text of `group` with `rules`. Group 0 is the whole token.
    pub fn capture(
        mut self,
        group: impl Into<CaptureGroup>,
        rules: impl Into<Arc<RuleSet>>,
    ) -> Self {
        self.captures.push((group.into(), rules.into()));
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Emit only `group` as the token; the rest of the match is not consumed
    pub fn token_group(mut self, group: impl Into<CaptureGroup>) -> Self {
        self.token_group = Some(group.into());
        self
    }

    pub fn build(self) -> PatternResult<Pattern> {
        if self.source.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: self.source.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let regex = RegexBuilder::new(&self.source)
            .case_insensitive(self.flags.case_insensitive)
            .multi_line(self.flags.multi_line)
            .dot_matches_new_line(self.flags.dot_matches_new_line)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| PatternError::invalid(&self.source, &e))?;

        let group_count = regex.captures_len() - 1;
        if group_count > MAX_CAPTURE_GROUPS {
            return Err(PatternError::TooManyCaptureGroups {
                pattern: self.source,
                count: group_count,
                max: MAX_CAPTURE_GROUPS,
            });
        }

        let token_group = match &self.token_group {
            Some(group) => Some(
                group
                    .resolve(&regex)
                    .ok_or_else(|| PatternError::unknown_group(&self.source, group))?,
            ),
            None => None,
        };

        let mut captures: Vec<CaptureRule> = Vec::with_capacity(self.captures.len());
        for (group, rules) in self.captures {
            let index = group
                .resolve(&regex)
                .ok_or_else(|| PatternError::unknown_group(&self.source, &group))?;

            if captures.iter().any(|existing| existing.index == index) {
                return Err(PatternError::duplicate_capture(&self.source, &group));
            }

            captures.push(CaptureRule {
                group,
                index,
                rules,
            });
        }

        let nested_depth = captures
            .iter()
            .map(|capture| capture.rules.depth())
            .max()
            .unwrap_or(0);

        // The rule set holding this pattern adds one more level
        if nested_depth + 1 > MAX_NESTING_DEPTH {
            return Err(PatternError::NestingTooDeep {
                depth: nested_depth + 1,
                max: MAX_NESTING_DEPTH,
            });
        }

        Ok(Pattern {
            source: self.source,
            flags: self.flags,
            regex,
            captures,
            alias: self.alias,
            token_group,
            nested_depth,
        })
    }
}
