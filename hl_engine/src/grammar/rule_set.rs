//! Ordered rule sets
//!
//! A [`RuleSet`] is an ordered list of (category, pattern) rules. Order is
//! priority: the tokenizer tries rules front to back and the first one that
//! matches at the scan offset wins. A category appears at most once.
use super::category::Category;
use super::error::{ConfigurationError, ConfigurationResult};
use crate::config::compile_time::grammar::MAX_RULES_PER_SET;
use crate::pattern::Pattern;
use std::collections::HashSet;
use std::sync::Arc;

/// A single category → pattern binding
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    category: Category,
    pattern: Arc<Pattern>,
}

impl Rule {
    pub fn new(category: Category, pattern: impl Into<Arc<Pattern>>) -> Self {
        Self {
            category,
            pattern: pattern.into(),
        }
    }

    /// Build a rule from an unvalidated category name
    pub fn named(category: &str, pattern: impl Into<Arc<Pattern>>) -> ConfigurationResult<Self> {
        Ok(Self::new(Category::new(category)?, pattern))
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn pattern(&self) -> &Arc<Pattern> {
        &self.pattern
    }
}

/// Ordered, duplicate-free sequence of rules
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Validate and wrap a rule list
    pub fn new(rules: Vec<Rule>) -> ConfigurationResult<Self> {
        if rules.len() > MAX_RULES_PER_SET {
            return Err(ConfigurationError::TooManyRules {
                count: rules.len(),
                max: MAX_RULES_PER_SET,
            });
        }

        let mut seen = HashSet::with_capacity(rules.len());
        for rule in &rules {
            if !seen.insert(rule.category.as_str()) {
                return Err(ConfigurationError::duplicate_category(
                    rule.category.as_str(),
                ));
            }
        }

        Ok(Self { rules })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from already compiled patterns
    pub fn from_rules<I, C>(rules: I) -> ConfigurationResult<Self>
    where
        I: IntoIterator<Item = (C, Pattern)>,
        C: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .map(|(category, pattern)| Rule::named(category.as_ref(), pattern))
            .collect::<ConfigurationResult<Vec<_>>>()?;
        Self::new(rules)
    }

    /// Build from pattern sources compiled with default flags
    pub fn from_patterns<'a, I>(patterns: I) -> ConfigurationResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = patterns
            .into_iter()
            .map(|(category, source)| Rule::named(category, Pattern::new(source)?))
            .collect::<ConfigurationResult<Vec<_>>>()?;
        Self::new(rules)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Categories in priority order
    pub fn categories(&self) -> impl Iterator<Item = &Category> + '_ {
        self.rules.iter().map(Rule::category)
    }

    pub fn get(&self, category: &str) -> Option<&Arc<Pattern>> {
        self.rules
            .iter()
            .find(|rule| rule.category == category)
            .map(Rule::pattern)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.position(category).is_some()
    }

    pub fn position(&self, category: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.category == category)
    }

    /// Nesting depth: 1 plus the deepest rule set bound by any capture
    pub fn depth(&self) -> usize {
        1 + self
            .rules
            .iter()
            .map(|rule| rule.pattern.nested_depth())
            .max()
            .unwrap_or(0)
    }

    /// Wrap rules taken from an existing set without re-validating them
    pub(crate) fn from_subset(rules: Vec<Rule>) -> Self {
        debug_assert!(rules.len() <= MAX_RULES_PER_SET);
        Self { rules }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
