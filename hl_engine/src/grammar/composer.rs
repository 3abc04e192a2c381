//! Grammar composition
//!
//! Every operation takes a rule set by reference and returns a new one; the
//! input is never modified, so dialects derived from the same base cannot
//! affect each other or the base.
use super::error::{ConfigurationError, ConfigurationResult};
use super::rule_set::{Rule, RuleSet};
use crate::config::runtime::RegistryPreferences;
use std::collections::HashSet;

/// Composer carrying the registry preferences that affect diagnostics
#[derive(Debug, Clone, Default)]
pub struct GrammarComposer {
    preferences: RegistryPreferences,
}

impl GrammarComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: RegistryPreferences) -> Self {
        Self { preferences }
    }

    /// Override or add rules.
    ///
    /// An override whose category exists in `base` replaces that rule in
    /// place. New categories go to the front, keeping their relative order.
    pub fn extend<I>(&self, base: &RuleSet, overrides: I) -> ConfigurationResult<RuleSet>
    where
        I: IntoIterator<Item = Rule>,
    {
        let mut inherited = base.rules().to_vec();
        let mut added = Vec::new();
        let mut seen = HashSet::new();

        for rule in overrides {
            if !seen.insert(rule.category().clone()) {
                return Err(ConfigurationError::duplicate_category(
                    rule.category().as_str(),
                ));
            }

            match inherited
                .iter()
                .position(|existing| existing.category() == rule.category())
            {
                Some(index) => inherited[index] = rule,
                None => added.push(rule),
            }
        }

        log_debug!("Extended rule set",
            "base_rules" => base.len(),
            "added" => added.len()
        );

        added.extend(inherited);
        RuleSet::new(added)
    }

    /// Remove categories. Absent categories are ignored.
    pub fn exclude<I, C>(&self, rule_set: &RuleSet, categories: I) -> RuleSet
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let removed: HashSet<String> = categories
            .into_iter()
            .map(|category| category.as_ref().to_string())
            .collect();

        if self.preferences.warn_missing_exclusions {
            for category in removed
                .iter()
                .filter(|category| !rule_set.contains(category.as_str()))
            {
                log_warning!("Excluded category is not present",
                    "category" => category
                );
            }
        }

        RuleSet::from_subset(
            rule_set
                .iter()
                .filter(|rule| !removed.contains(rule.category().as_str()))
                .cloned()
                .collect(),
        )
    }

    /// Like [`exclude`](Self::exclude) but every category must be present
    pub fn exclude_strict<I, C>(
        &self,
        rule_set: &RuleSet,
        categories: I,
    ) -> ConfigurationResult<RuleSet>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let categories: Vec<C> = categories.into_iter().collect();

        if let Some(missing) = categories
            .iter()
            .find(|category| !rule_set.contains(category.as_ref()))
        {
            return Err(ConfigurationError::unknown_category(missing.as_ref()));
        }

        Ok(self.exclude(rule_set, categories))
    }

    /// Place `entries`, in order, immediately before `anchor`.
    ///
    /// Entries whose category already exists are moved. An entry for the
    /// anchor's own category replaces the anchor.
    pub fn insert_before<I>(
        &self,
        rule_set: &RuleSet,
        anchor: &str,
        entries: I,
    ) -> ConfigurationResult<RuleSet>
    where
        I: IntoIterator<Item = Rule>,
    {
        if !rule_set.contains(anchor) {
            return Err(ConfigurationError::unknown_category(anchor));
        }

        let entries: Vec<Rule> = entries.into_iter().collect();
        let mut names = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !names.insert(entry.category().as_str()) {
                return Err(ConfigurationError::duplicate_category(
                    entry.category().as_str(),
                ));
            }
        }

        let mut rules = Vec::with_capacity(rule_set.len() + entries.len());
        for rule in rule_set {
            if rule.category() == anchor {
                rules.extend(entries.iter().cloned());
            }
            if !names.contains(rule.category().as_str()) {
                rules.push(rule.clone());
            }
        }

        RuleSet::new(rules)
    }
}

/// [`GrammarComposer::extend`] with preferences from the environment
pub fn extend<I>(base: &RuleSet, overrides: I) -> ConfigurationResult<RuleSet>
where
    I: IntoIterator<Item = Rule>,
{
    GrammarComposer::new().extend(base, overrides)
}

/// [`GrammarComposer::exclude`] with preferences from the environment
pub fn exclude<I, C>(rule_set: &RuleSet, categories: I) -> RuleSet
where
    I: IntoIterator<Item = C>,
    C: AsRef<str>,
{
    GrammarComposer::new().exclude(rule_set, categories)
}

/// [`GrammarComposer::exclude_strict`] with preferences from the environment
pub fn exclude_strict<I, C>(rule_set: &RuleSet, categories: I) -> ConfigurationResult<RuleSet>
where
    I: IntoIterator<Item = C>,
    C: AsRef<str>,
{
    GrammarComposer::new().exclude_strict(rule_set, categories)
}

/// [`GrammarComposer::insert_before`] with preferences from the environment
pub fn insert_before<I>(rule_set: &RuleSet, anchor: &str, entries: I) -> ConfigurationResult<RuleSet>
where
    I: IntoIterator<Item = Rule>,
{
    GrammarComposer::new().insert_before(rule_set, anchor, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Category;
    use crate::pattern::Pattern;
    use assert_matches::assert_matches;

    fn base() -> RuleSet {
        RuleSet::from_patterns([
            ("comment", r"//.*"),
            ("string", r#""(?:\\.|[^\\"])*""#),
            ("keyword", r"\b(?:if|else)\b"),
        ])
        .unwrap()
    }

    fn rule(category: &str, source: &str) -> Rule {
        Rule::named(category, Pattern::new(source).unwrap()).unwrap()
    }

    fn order(rule_set: &RuleSet) -> Vec<&str> {
        rule_set.categories().map(Category::as_str).collect()
    }

    #[test]
    fn test_override_keeps_position() {
        let base = base();
        let derived = extend(&base, [rule("keyword", r"\bfun\b")]).unwrap();

        assert_eq!(order(&derived), ["comment", "string", "keyword"]);
        assert_eq!(derived.get("keyword").unwrap().source(), r"\bfun\b");
        // base untouched
        assert_eq!(base.get("keyword").unwrap().source(), r"\b(?:if|else)\b");
    }

    #[test]
    fn test_new_categories_go_first_in_declared_order() {
        let derived = extend(
            &base(),
            [
                rule("builtin", r"\bnull\b"),
                rule("keyword", r"\bfun\b"),
                rule("tag", r"@[a-z]+"),
            ],
        )
        .unwrap();

        assert_eq!(
            order(&derived),
            ["builtin", "tag", "comment", "string", "keyword"]
        );
    }

    #[test]
    fn test_duplicate_override_rejected() {
        assert_matches!(
            extend(&base(), [rule("tag", "@"), rule("tag", "#")]),
            Err(ConfigurationError::DuplicateCategory { category }) if category == "tag"
        );
    }

    #[test]
    fn test_exclude_removes_inherited_and_added() {
        let derived = extend(&base(), [rule("tag", "@[a-z]+")]).unwrap();
        let trimmed = exclude(&derived, ["tag", "comment"]);

        assert_eq!(order(&trimmed), ["string", "keyword"]);
        assert_eq!(order(&derived), ["tag", "comment", "string", "keyword"]);
    }

    #[test]
    fn test_exclude_absent_is_noop() {
        let base = base();
        let same = exclude(&base, ["class-name"]);
        assert_eq!(same, base);

        let twice = exclude(&exclude(&base, ["string"]), ["string"]);
        assert_eq!(order(&twice), ["comment", "keyword"]);
    }

    #[test]
    fn test_exclude_strict_reports_missing() {
        assert_matches!(
            exclude_strict(&base(), ["keyword", "class-name"]),
            Err(ConfigurationError::UnknownCategory { category }) if category == "class-name"
        );
        assert_eq!(
            order(&exclude_strict(&base(), ["keyword"]).unwrap()),
            ["comment", "string"]
        );
    }

    #[test]
    fn test_insert_before_places_and_moves() {
        let inserted = insert_before(
            &base(),
            "string",
            [rule("macro", r"#\w+"), rule("keyword", r"\bfor\b")],
        )
        .unwrap();

        assert_eq!(order(&inserted), ["comment", "macro", "keyword", "string"]);
        assert_eq!(inserted.get("keyword").unwrap().source(), r"\bfor\b");
    }

    #[test]
    fn test_insert_before_replacing_anchor() {
        let inserted = insert_before(
            &base(),
            "string",
            [rule("char", "'.'"), rule("string", r#""[^"]*""#)],
        )
        .unwrap();

        assert_eq!(order(&inserted), ["comment", "char", "string", "keyword"]);
    }

    #[test]
    fn test_insert_before_unknown_anchor() {
        assert_matches!(
            insert_before(&base(), "number", [rule("char", "'.'")]),
            Err(ConfigurationError::UnknownCategory { category }) if category == "number"
        );
    }

    #[test]
    fn test_composition_is_deterministic() {
        let compose = || {
            let derived = extend(
                &base(),
                [rule("keyword", r"\bfun\b"), rule("tag", r"@([a-z]+)")],
            )
            .unwrap();
            exclude(&derived, ["comment"])
        };

        assert_eq!(compose(), compose());
    }

    #[test]
    fn test_warning_preference_does_not_change_result() {
        let composer = GrammarComposer::with_preferences(RegistryPreferences {
            log_registrations: false,
            warn_missing_exclusions: true,
            load_builtin_grammars: false,
        });

        assert_eq!(composer.exclude(&base(), ["absent"]), base());
    }
}
