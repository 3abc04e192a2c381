// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerPreferences {
    /// Whether to count tokens per category while scanning
    pub collect_metrics: bool,

    /// Whether to emit a debug event for every plain fallback character
    pub log_unmatched_characters: bool,

    /// Whether to log a completion event after each tokenize call
    pub log_completion: bool,
}

impl Default for TokenizerPreferences {
    fn default() -> Self {
        Self {
            collect_metrics: env_flag(env_vars::TOKENIZER_COLLECT_METRICS, true),
            log_unmatched_characters: env_flag(env_vars::TOKENIZER_LOG_UNMATCHED, false),
            log_completion: env_flag(env_vars::TOKENIZER_LOG_COMPLETION, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryPreferences {
    /// Whether to log every grammar registration
    pub log_registrations: bool,

    /// Whether excluding an absent category should produce a warning
    pub warn_missing_exclusions: bool,

    /// Whether the built-in grammars are registered on first registry access
    pub load_builtin_grammars: bool,
}

impl Default for RegistryPreferences {
    fn default() -> Self {
        Self {
            log_registrations: env_flag(env_vars::REGISTRY_LOG_REGISTRATIONS, true),
            warn_missing_exclusions: env_flag(env_vars::REGISTRY_WARN_MISSING_EXCLUSIONS, false),
            load_builtin_grammars: env_flag(env_vars::REGISTRY_LOAD_BUILTINS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,

    /// Whether to log performance metrics such as scan durations
    pub log_performance_events: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env_flag(env_vars::LOGGING_LOG_PERFORMANCE, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub tokenizer: TokenizerPreferences,
    pub registry: RegistryPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Tokenizer
    pub const TOKENIZER_COLLECT_METRICS: &str = "HL_TOKENIZER_COLLECT_METRICS";
    pub const TOKENIZER_LOG_UNMATCHED: &str = "HL_TOKENIZER_LOG_UNMATCHED";
    pub const TOKENIZER_LOG_COMPLETION: &str = "HL_TOKENIZER_LOG_COMPLETION";

    // Registry
    pub const REGISTRY_LOG_REGISTRATIONS: &str = "HL_REGISTRY_LOG_REGISTRATIONS";
    pub const REGISTRY_WARN_MISSING_EXCLUSIONS: &str = "HL_REGISTRY_WARN_MISSING_EXCLUSIONS";
    pub const REGISTRY_LOAD_BUILTINS: &str = "HL_REGISTRY_LOAD_BUILTINS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "HL_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "HL_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "HL_LOGGING_LOG_PERFORMANCE";
}
