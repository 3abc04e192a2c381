//! Grammar registry
//!
//! Maps grammar names to finished rule sets. Registration is append-only:
//! an existing name is never overwritten, so a grammar handed out to one
//! caller cannot change underneath another.
use super::builtin;
use super::composer::GrammarComposer;
use super::error::{ConfigurationError, ConfigurationResult};
use super::rule_set::{Rule, RuleSet};
use crate::config::compile_time::grammar::MAX_REGISTERED_GRAMMARS;
use crate::config::runtime::RegistryPreferences;
use crate::logging::codes;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Name → rule set map
#[derive(Debug, Default)]
pub struct GrammarRegistry {
    grammars: HashMap<String, Arc<RuleSet>>,
    preferences: RegistryPreferences,
}

impl GrammarRegistry {
    /// Empty registry with preferences from the environment
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: RegistryPreferences) -> Self {
        Self {
            grammars: HashMap::new(),
            preferences,
        }
    }

    /// Registry pre-populated with the built-in grammars
    pub fn with_builtins() -> ConfigurationResult<Self> {
        let mut registry = Self::new();
        builtin::register_all(&mut registry)?;
        Ok(registry)
    }

    pub fn preferences(&self) -> &RegistryPreferences {
        &self.preferences
    }

    /// Register a grammar under a new name
    pub fn register(&mut self, name: &str, rule_set: RuleSet) -> ConfigurationResult<Arc<RuleSet>> {
        if self.grammars.contains_key(name) {
            return Err(ConfigurationError::duplicate_grammar(name));
        }

        if self.grammars.len() >= MAX_REGISTERED_GRAMMARS {
            return Err(ConfigurationError::RegistryFull {
                max: MAX_REGISTERED_GRAMMARS,
            });
        }

        let rule_set = Arc::new(rule_set);
        self.grammars.insert(name.to_string(), Arc::clone(&rule_set));

        if self.preferences.log_registrations {
            log_success!(codes::success::GRAMMAR_REGISTERED, "Grammar registered",
                "grammar" => name,
                "rules" => rule_set.len(),
                "depth" => rule_set.depth()
            );
        }

        Ok(rule_set)
    }

    pub fn get(&self, name: &str) -> Option<Arc<RuleSet>> {
        self.grammars.get(name).cloned()
    }

    /// Look up a grammar, failing with `UnknownGrammar`
    pub fn require(&self, name: &str) -> ConfigurationResult<Arc<RuleSet>> {
        self.get(name)
            .ok_or_else(|| ConfigurationError::unknown_grammar(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.grammars.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.grammars.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }

    /// Derive a rule set from a registered base: `extend` then `exclude`.
    ///
    /// The result is not registered.
    pub fn compose<I, D, C>(
        &self,
        base_name: &str,
        overrides: I,
        deletions: D,
    ) -> ConfigurationResult<RuleSet>
    where
        I: IntoIterator<Item = Rule>,
        D: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let base = self.require(base_name)?;
        let composer = GrammarComposer::with_preferences(self.preferences.clone());
        let extended = composer.extend(&base, overrides)?;
        let composed = composer.exclude(&extended, deletions);

        log_success!(codes::success::GRAMMAR_COMPOSED, "Grammar composed",
            "base" => base_name,
            "rules" => composed.len()
        );

        Ok(composed)
    }
}

// ============================================================================
// GLOBAL REGISTRY
// ============================================================================

static GLOBAL_REGISTRY: OnceLock<RwLock<GrammarRegistry>> = OnceLock::new();

fn global() -> &'static RwLock<GrammarRegistry> {
    GLOBAL_REGISTRY.get_or_init(|| {
        let mut registry = GrammarRegistry::new();

        if registry.preferences.load_builtin_grammars {
            match builtin::register_all(&mut registry) {
                Ok(count) => {
                    log_success!(codes::success::BUILTIN_GRAMMARS_LOADED,
                        "Built-in grammars loaded",
                        "count" => count
                    );
                }
                Err(err) => {
                    crate::logging::safe_log_error(
                        err.error_code(),
                        &format!("Failed to load built-in grammars: {}", err),
                    );
                }
            }
        }

        RwLock::new(registry)
    })
}

/// Read access to the process-wide registry
pub fn read_global() -> RwLockReadGuard<'static, GrammarRegistry> {
    global()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write access to the process-wide registry
pub fn write_global() -> RwLockWriteGuard<'static, GrammarRegistry> {
    global()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;
    use assert_matches::assert_matches;

    fn quiet() -> GrammarRegistry {
        GrammarRegistry::with_preferences(RegistryPreferences {
            log_registrations: false,
            warn_missing_exclusions: false,
            load_builtin_grammars: false,
        })
    }

    fn small() -> RuleSet {
        RuleSet::from_patterns([("keyword", r"\bif\b"), ("number", r"\d+")]).unwrap()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = quiet();
        registry.register("small", small()).unwrap();

        assert!(registry.contains("small"));
        assert_eq!(*registry.get("small").unwrap(), small());
        assert_eq!(registry.names(), ["small"]);
        assert_matches!(
            registry.require("missing"),
            Err(ConfigurationError::UnknownGrammar { name }) if name == "missing"
        );
    }

    #[test]
    fn test_duplicate_name_rejected_and_original_kept() {
        let mut registry = quiet();
        registry.register("small", small()).unwrap();

        let other = RuleSet::from_patterns([("string", r#""[^"]*""#)]).unwrap();
        assert_matches!(
            registry.register("small", other),
            Err(ConfigurationError::DuplicateGrammar { .. })
        );
        assert_eq!(*registry.get("small").unwrap(), small());
    }

    #[test]
    fn test_lookups_share_the_registered_value() {
        let mut registry = quiet();
        let registered = registry.register("small", small()).unwrap();
        let looked_up = registry.get("small").unwrap();
        assert!(Arc::ptr_eq(&registered, &looked_up));
    }

    #[test]
    fn test_compose_from_registered_base() {
        let mut registry = quiet();
        registry.register("small", small()).unwrap();

        let composed = registry
            .compose(
                "small",
                [Rule::named("tag", Pattern::new("@[a-z]+").unwrap()).unwrap()],
                ["number"],
            )
            .unwrap();

        let order: Vec<&str> = composed.categories().map(|c| c.as_str()).collect();
        assert_eq!(order, ["tag", "keyword"]);
        // base unchanged
        assert_eq!(registry.get("small").unwrap().len(), 2);
    }

    #[test]
    fn test_compose_unknown_base() {
        let registry = quiet();
        assert_matches!(
            registry.compose("clike", Vec::<Rule>::new(), Vec::<&str>::new()),
            Err(ConfigurationError::UnknownGrammar { .. })
        );
    }

    #[test]
    fn test_registry_limit() {
        let mut registry = quiet();
        for i in 0..MAX_REGISTERED_GRAMMARS {
            registry.register(&format!("g{}", i), RuleSet::empty()).unwrap();
        }

        assert_matches!(
            registry.register("one-more", RuleSet::empty()),
            Err(ConfigurationError::RegistryFull { .. })
        );
    }

    #[test]
    fn test_builtins_registry() {
        let registry = GrammarRegistry::with_builtins().unwrap();
        for name in ["clike", "c", "tiny", "tiny-support"] {
            assert!(registry.contains(name), "missing built-in {}", name);
        }
    }
}
