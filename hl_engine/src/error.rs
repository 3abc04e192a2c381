use crate::grammar::ConfigurationError;
use crate::logging::codes::{self, Code};
use crate::pattern::PatternError;

/// Errors surfaced by the crate-level entry points
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("Grammar configuration failed: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Produced by `?` when callers compile patterns inside functions that
    /// return `HighlightError`
    #[error("Pattern compilation failed: {0}")]
    Pattern(#[from] PatternError),

    #[error("Input of {size} bytes exceeds the limit of {max} bytes")]
    InputTooLarge { size: usize, max: usize },
}

impl HighlightError {
    pub fn input_too_large(size: usize, max: usize) -> Self {
        Self::InputTooLarge { size, max }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::Configuration(err) => err.error_code(),
            Self::Pattern(err) => err.error_code(),
            Self::InputTooLarge { .. } => codes::tokenizer::INPUT_TOO_LARGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::RuleSet;
    use crate::pattern::Pattern;
    use assert_matches::assert_matches;

    fn single_rule(category: &str, source: &str) -> Result<RuleSet, HighlightError> {
        let pattern = Pattern::new(source)?;
        Ok(RuleSet::from_rules([(category, pattern)])?)
    }

    #[test]
    fn test_pattern_errors_convert_with_question_mark() {
        let err = single_rule("tag", "@(").unwrap_err();
        assert_matches!(err, HighlightError::Pattern(PatternError::Invalid { .. }));
        assert_eq!(err.error_code(), codes::pattern::INVALID_PATTERN);
        assert!(err.to_string().starts_with("Pattern compilation failed"));
    }

    #[test]
    fn test_configuration_errors_convert_with_question_mark() {
        let err = single_rule("plain", "@[a-z]+").unwrap_err();
        assert_matches!(err, HighlightError::Configuration(_));
        assert_eq!(err.error_code(), codes::configuration::RESERVED_CATEGORY);
    }

    #[test]
    fn test_input_too_large_code() {
        let err = HighlightError::input_too_large(10, 4);
        assert_eq!(err.error_code(), codes::tokenizer::INPUT_TOO_LARGE);
        assert_eq!(err.to_string(), "Input of 10 bytes exceeds the limit of 4 bytes");
    }
}
