//! Pattern compilation errors

/// Result type for pattern compilation
pub type PatternResult<T> = Result<T, PatternError>;

/// Errors raised while compiling a [`Pattern`](super::Pattern).
///
/// All of these surface at composition time; a compiled pattern never fails
/// during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Invalid pattern '{pattern}': {message}")]
    Invalid { pattern: String, message: String },

    #[error("Pattern is {length} bytes long, maximum is {max}")]
    TooLong { length: usize, max: usize },

    #[error("Pattern '{pattern}' declares {count} capture groups, maximum is {max}")]
    TooManyCaptureGroups {
        pattern: String,
        count: usize,
        max: usize,
    },

    #[error("Pattern '{pattern}' has no capture group {group}")]
    UnknownGroup { pattern: String, group: String },

    #[error("Capture group {group} of pattern '{pattern}' is bound more than once")]
    DuplicateCapture { pattern: String, group: String },

    #[error("Nested rule sets reach depth {depth}, maximum is {max}")]
    NestingTooDeep { depth: usize, max: usize },
}

impl PatternError {
    pub fn invalid(pattern: &str, error: &regex::Error) -> Self {
        Self::Invalid {
            pattern: pattern.to_string(),
            message: error.to_string(),
        }
    }

    pub fn unknown_group(pattern: &str, group: &super::CaptureGroup) -> Self {
        Self::UnknownGroup {
            pattern: pattern.to_string(),
            group: group.to_string(),
        }
    }

    pub fn duplicate_capture(pattern: &str, group: &super::CaptureGroup) -> Self {
        Self::DuplicateCapture {
            pattern: pattern.to_string(),
            group: group.to_string(),
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> crate::logging::codes::Code {
        use crate::logging::codes;
        match self {
            Self::Invalid { .. } => codes::pattern::INVALID_PATTERN,
            Self::TooLong { .. } => codes::pattern::PATTERN_TOO_LONG,
            Self::TooManyCaptureGroups { .. } => codes::pattern::TOO_MANY_CAPTURE_GROUPS,
            Self::UnknownGroup { .. } => codes::pattern::UNKNOWN_CAPTURE_GROUP,
            Self::DuplicateCapture { .. } => codes::pattern::DUPLICATE_CAPTURE,
            Self::NestingTooDeep { .. } => codes::pattern::NESTING_TOO_DEEP,
        }
    }
}
