// build.rs - TOML-driven constant generation for engine limits
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    patterns: PatternLimits,
    grammar: GrammarLimits,
    tokenizer: TokenizerLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct PatternLimits {
    max_pattern_length: usize,
    max_capture_groups: usize,
    max_nesting_depth: usize,
    regex_size_limit: usize,
}

#[derive(serde::Deserialize)]
struct GrammarLimits {
    max_rules_per_set: usize,
    max_registered_grammars: usize,
    max_category_name_length: usize,
}

#[derive(serde::Deserialize)]
struct TokenizerLimits {
    max_input_size: usize,
    metrics_buffer_size: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=HL_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=HL_CONFIG_DIR");

    let profile = env::var("HL_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("HL_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of hl_engine directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_INPUT_SIZE: usize = 1_000_000_000;
    const ABSOLUTE_MAX_NESTING_DEPTH: usize = 64;
    const ABSOLUTE_MAX_PATTERN_LENGTH: usize = 1_000_000;

    if config.tokenizer.max_input_size > ABSOLUTE_MAX_INPUT_SIZE {
        panic!("LIMITS: max_input_size exceeds absolute maximum");
    }

    if config.patterns.max_nesting_depth == 0
        || config.patterns.max_nesting_depth > ABSOLUTE_MAX_NESTING_DEPTH
    {
        panic!("LIMITS: max_nesting_depth must be between 1 and {ABSOLUTE_MAX_NESTING_DEPTH}");
    }

    if config.patterns.max_pattern_length > ABSOLUTE_MAX_PATTERN_LENGTH {
        panic!("LIMITS: max_pattern_length exceeds absolute maximum");
    }

    const BUILTIN_GRAMMAR_COUNT: usize = 4;

    if config.grammar.max_rules_per_set == 0 {
        panic!("LIMITS: max_rules_per_set must be non-zero");
    }

    if config.grammar.max_registered_grammars < BUILTIN_GRAMMAR_COUNT {
        panic!("LIMITS: max_registered_grammars must hold the {BUILTIN_GRAMMAR_COUNT} built-in grammars");
    }

    if config.logging.log_buffer_size == 0 {
        panic!("LIMITS: log_buffer_size must be non-zero");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.tokenizer.max_input_size > 64 * 1024 * 1024 {
        panic!("PRODUCTION: max_input_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod patterns {{
        pub const MAX_PATTERN_LENGTH: usize = {};
        pub const MAX_CAPTURE_GROUPS: usize = {};
        pub const MAX_NESTING_DEPTH: usize = {};
        pub const REGEX_SIZE_LIMIT: usize = {};
    }}

    pub mod grammar {{
        pub const MAX_RULES_PER_SET: usize = {};
        pub const MAX_REGISTERED_GRAMMARS: usize = {};
        pub const MAX_CATEGORY_NAME_LENGTH: usize = {};
    }}

    pub mod tokenizer {{
        pub const MAX_INPUT_SIZE: usize = {};
        pub const METRICS_BUFFER_SIZE: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // Patterns
        config.patterns.max_pattern_length,
        config.patterns.max_capture_groups,
        config.patterns.max_nesting_depth,
        config.patterns.regex_size_limit,
        // Grammar
        config.grammar.max_rules_per_set,
        config.grammar.max_registered_grammars,
        config.grammar.max_category_name_length,
        // Tokenizer
        config.tokenizer.max_input_size,
        config.tokenizer.metrics_buffer_size,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
