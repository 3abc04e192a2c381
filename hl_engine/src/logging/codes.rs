//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes emitted by the engine and their
//! behavioral metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const FILE_ACCESS_ERROR: Code = Code::new("ERR003");
}

/// Grammar configuration error codes
pub mod configuration {
    use super::Code;

    pub const UNKNOWN_GRAMMAR: Code = Code::new("G001");
    pub const DUPLICATE_GRAMMAR: Code = Code::new("G002");
    pub const DUPLICATE_CATEGORY: Code = Code::new("G003");
    pub const RESERVED_CATEGORY: Code = Code::new("G004");
    pub const INVALID_CATEGORY_NAME: Code = Code::new("G005");
    pub const UNKNOWN_CATEGORY: Code = Code::new("G006");
    pub const TOO_MANY_RULES: Code = Code::new("G007");
    pub const REGISTRY_FULL: Code = Code::new("G008");
}

/// Pattern compilation error codes
pub mod pattern {
    use super::Code;

    pub const INVALID_PATTERN: Code = Code::new("P001");
    pub const PATTERN_TOO_LONG: Code = Code::new("P002");
    pub const TOO_MANY_CAPTURE_GROUPS: Code = Code::new("P003");
    pub const UNKNOWN_CAPTURE_GROUP: Code = Code::new("P004");
    pub const DUPLICATE_CAPTURE: Code = Code::new("P005");
    pub const NESTING_TOO_DEEP: Code = Code::new("P006");
}

/// Tokenizer error codes
pub mod tokenizer {
    use super::Code;

    pub const INPUT_TOO_LARGE: Code = Code::new("T001");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");

    // Grammar lifecycle
    pub const GRAMMAR_REGISTERED: Code = Code::new("I010");
    pub const GRAMMAR_COMPOSED: Code = Code::new("I011");
    pub const BUILTIN_GRAMMARS_LOADED: Code = Code::new("I012");

    // Tokenization
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal engine error",
                "File a bug report with the input that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Engine initialization failure",
                "Check build profile configuration and environment variables",
            ),
            ErrorMetadata::new(
                "ERR003",
                "System",
                Severity::Medium,
                true,
                false,
                "Input file or directory could not be read",
                "Check the path and its permissions",
            ),
            // Configuration errors
            ErrorMetadata::new(
                "G001",
                "Configuration",
                Severity::High,
                false,
                true,
                "Grammar name is not registered",
                "Register the base grammar before composing or tokenizing with it",
            ),
            ErrorMetadata::new(
                "G002",
                "Configuration",
                Severity::High,
                false,
                true,
                "Grammar name is already registered",
                "Choose a distinct name for each dialect",
            ),
            ErrorMetadata::new(
                "G003",
                "Configuration",
                Severity::High,
                false,
                true,
                "Category appears more than once in a rule set",
                "Keep one pattern per category; merge alternatives into one pattern",
            ),
            ErrorMetadata::new(
                "G004",
                "Configuration",
                Severity::High,
                false,
                true,
                "Category name is reserved for fallback tokens",
                "Rename the category",
            ),
            ErrorMetadata::new(
                "G005",
                "Configuration",
                Severity::High,
                false,
                true,
                "Category name is empty or too long",
                "Use a short non-empty category name",
            ),
            ErrorMetadata::new(
                "G006",
                "Configuration",
                Severity::Medium,
                false,
                true,
                "Category is not present in the rule set",
                "Check the category name against the base grammar",
            ),
            ErrorMetadata::new(
                "G007",
                "Configuration",
                Severity::High,
                false,
                true,
                "Rule set exceeds the configured rule limit",
                "Reduce the number of categories or raise the profile limit",
            ),
            ErrorMetadata::new(
                "G008",
                "Configuration",
                Severity::High,
                false,
                true,
                "Grammar registry is full",
                "Raise max_registered_grammars in the build profile",
            ),
            // Pattern errors
            ErrorMetadata::new(
                "P001",
                "Pattern",
                Severity::High,
                false,
                true,
                "Pattern failed to compile",
                "Fix the pattern syntax; look-around and back-references are unsupported",
            ),
            ErrorMetadata::new(
                "P002",
                "Pattern",
                Severity::High,
                false,
                true,
                "Pattern source exceeds the configured length limit",
                "Split the pattern or raise max_pattern_length",
            ),
            ErrorMetadata::new(
                "P003",
                "Pattern",
                Severity::High,
                false,
                true,
                "Pattern declares too many capture groups",
                "Use non-capturing groups (?:...) where captures are not needed",
            ),
            ErrorMetadata::new(
                "P004",
                "Pattern",
                Severity::High,
                false,
                true,
                "Referenced capture group does not exist in the pattern",
                "Check the group index or name",
            ),
            ErrorMetadata::new(
                "P005",
                "Pattern",
                Severity::Medium,
                false,
                true,
                "Capture group is bound to more than one nested rule set",
                "Bind each capture group once",
            ),
            ErrorMetadata::new(
                "P006",
                "Pattern",
                Severity::High,
                false,
                true,
                "Nested rule sets exceed the configured depth",
                "Flatten the nested grammar or raise max_nesting_depth",
            ),
            // Tokenizer errors
            ErrorMetadata::new(
                "T001",
                "Tokenizer",
                Severity::Medium,
                true,
                false,
                "Input exceeds the configured maximum size",
                "Split the input or raise max_input_size",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
