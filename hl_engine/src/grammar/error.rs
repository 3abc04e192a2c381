//! Grammar configuration errors

use crate::pattern::PatternError;

/// Result type for grammar definition and registry operations
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;

/// Errors raised while defining, composing or registering grammars
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Grammar '{name}' is not registered")]
    UnknownGrammar { name: String },

    #[error("Grammar '{name}' is already registered")]
    DuplicateGrammar { name: String },

    #[error("Category '{category}' appears more than once")]
    DuplicateCategory { category: String },

    #[error("Category name '{category}' is reserved for fallback tokens")]
    ReservedCategory { category: String },

    #[error("Invalid category name '{name}': {reason}")]
    InvalidCategoryName { name: String, reason: String },

    #[error("Category '{category}' is not present in the rule set")]
    UnknownCategory { category: String },

    #[error("Rule set has {count} rules, maximum is {max}")]
    TooManyRules { count: usize, max: usize },

    #[error("Grammar registry is full ({max} grammars)")]
    RegistryFull { max: usize },

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),
}

impl ConfigurationError {
    pub fn unknown_grammar(name: &str) -> Self {
        Self::UnknownGrammar {
            name: name.to_string(),
        }
    }

    pub fn duplicate_grammar(name: &str) -> Self {
        Self::DuplicateGrammar {
            name: name.to_string(),
        }
    }

    pub fn duplicate_category(category: &str) -> Self {
        Self::DuplicateCategory {
            category: category.to_string(),
        }
    }

    pub fn unknown_category(category: &str) -> Self {
        Self::UnknownCategory {
            category: category.to_string(),
        }
    }

    pub fn invalid_category_name(name: &str, reason: &str) -> Self {
        Self::InvalidCategoryName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> crate::logging::codes::Code {
        use crate::logging::codes;
        match self {
            Self::UnknownGrammar { .. } => codes::configuration::UNKNOWN_GRAMMAR,
            Self::DuplicateGrammar { .. } => codes::configuration::DUPLICATE_GRAMMAR,
            Self::DuplicateCategory { .. } => codes::configuration::DUPLICATE_CATEGORY,
            Self::ReservedCategory { .. } => codes::configuration::RESERVED_CATEGORY,
            Self::InvalidCategoryName { .. } => codes::configuration::INVALID_CATEGORY_NAME,
            Self::UnknownCategory { .. } => codes::configuration::UNKNOWN_CATEGORY,
            Self::TooManyRules { .. } => codes::configuration::TOO_MANY_RULES,
            Self::RegistryFull { .. } => codes::configuration::REGISTRY_FULL,
            Self::Pattern(err) => err.error_code(),
        }
    }
}
