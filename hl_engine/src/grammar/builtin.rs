//! Built-in grammars
//!
//! `clike` and `c` follow the well-known C-family highlighting grammars as
//! closely as the `regex` crate allows. Look-behind conditions are dropped
//! and look-ahead conditions become token groups. `tiny` and `tiny-support`
//! are the two dialects of the tiny language, derived from those bases.
use super::category::names::*;
use super::composer::GrammarComposer;
use super::error::{ConfigurationError, ConfigurationResult};
use crate::config::compile_time::grammar::MAX_REGISTERED_GRAMMARS;
use super::registry::GrammarRegistry;
use super::rule_set::{Rule, RuleSet};
use crate::pattern::Pattern;

pub const CLIKE: &str = "clike";
pub const C: &str = "c";
pub const TINY: &str = "tiny";
pub const TINY_SUPPORT: &str = "tiny-support";

/// Names of all built-in grammars, in registration order
pub fn builtin_names() -> &'static [&'static str] {
    &[CLIKE, C, TINY, TINY_SUPPORT]
}

mod sources {
    pub const CLIKE_COMMENT: &str = r"/\*[\s\S]*?(?:\*/|$)|//.*";
    pub const CLIKE_STRING: &str =
        r#""(?:\\(?:\r\n|[\s\S])|[^"\\\r\n])*"|'(?:\\(?:\r\n|[\s\S])|[^'\\\r\n])*'"#;
    pub const CLIKE_CLASS_NAME: &str = r"\b[A-Z][A-Za-z0-9_]*\b";
    pub const CLIKE_KEYWORD: &str = r"\b(?:break|catch|continue|do|else|finally|for|function|if|in|instanceof|new|null|return|throw|try|while)\b";
    pub const CLIKE_BOOLEAN: &str = r"\b(?:false|true)\b";
    pub const CLIKE_FUNCTION: &str = r"\b(\w+)\(";
    pub const CLIKE_NUMBER: &str = r"\b0x[\da-f]+\b|(?:\b\d+(?:\.\d*)?|\B\.\d+)(?:e[+-]?\d+)?";
    pub const CLIKE_OPERATOR: &str = r"[<>]=?|[!=]=?=?|--?|\+\+?|&&?|\|\|?|[?*/~^%]";
    pub const CLIKE_PUNCTUATION: &str = r"[{}\[\];(),.:]";

    pub const C_COMMENT: &str = r"//(?:[^\r\n\\]|\\(?:\r\n?|\n)?)*|/\*[\s\S]*?(?:\*/|$)";
    pub const C_STRING: &str = r#""(?:\\(?:\r\n|[\s\S])|[^"\\\r\n])*""#;
    pub const C_CLASS_NAME: &str = r"\b[a-z]\w*_t\b";
    pub const C_KEYWORD: &str = r"\b(?:_Alignas|_Alignof|_Atomic|_Bool|_Complex|_Generic|_Imaginary|_Noreturn|_Static_assert|_Thread_local|__attribute__|asm|auto|break|case|char|const|continue|default|do|double|else|enum|extern|float|for|goto|if|inline|int|long|register|return|short|signed|sizeof|static|struct|switch|typedef|typeof|union|unsigned|void|volatile|while)\b";
    pub const C_FUNCTION: &str = r"\b([a-z_]\w*)\s*\(";
    pub const C_NUMBER: &str = r"(?:\b0x(?:[\da-f]+(?:\.[\da-f]*)?|\.[\da-f]+)(?:p[+-]?\d+)?|(?:\b\d+(?:\.\d*)?|\B\.\d+)(?:e[+-]?\d+)?)[ful]{0,4}";
    pub const C_OPERATOR: &str = r">>=?|<<=?|->|--|\+\+|&&|\|\||::|[?:~]|[-+*/%&|^!=<>]=?";
    pub const C_CHAR: &str = r"'(?:\\(?:\r\n|[\s\S])|[^'\\\r\n]){0,32}'";
    pub const C_MACRO: &str = r"#\s*([a-z]+)(?:[^\r\n\\/]|/[^*\r\n]|/\*(?:[^*]|\*+[^*/])*\*+/|\\(?:\r\n|[\s\S]))*";
    pub const C_DIRECTIVE: &str = r"[a-z]+";
    pub const C_CONSTANT: &str = r"\b(?:EOF|NULL|SEEK_CUR|SEEK_END|SEEK_SET|__DATE__|__FILE__|__LINE__|__TIMESTAMP__|__TIME__|__func__|stderr|stdin|stdout)\b";

    pub const TINY_KEYWORD: &str = r"\b(?:handle|enum|result|break|case|const|continue|string|default|else|for|fun|return|pub|if|import|bool|int16|int32|int64|int8|namespace|struct|switch|uint16|uint32|uint64|uint8|var)\b";
    pub const TINY_BUILTIN: &str = r"\b(?:null|self)\b";
    pub const TINY_BOOLEAN: &str = r"\b(?:true|false)\b";
    pub const TINY_OPERATOR: &str = r"<=>|/%=|==|!=|<=|>=|&&|\|\||\+=|-=|\*=|/=|\.\.|--|\+\+|/%|\^=|<|>|!|=|\+|-|\*|/|%|\^|\||&";
    pub const TINY_STRING: &str = r#"[a-z]?"(?:\\.|[^\\"])*"|'(?:\\.|[^\\'])*'"#;
    pub const TINY_TAG: &str = r"@([a-zA-Z_][a-zA-Z0-9_]*)";
    pub const TINY_IDENTIFIER: &str = r"[a-zA-Z_][a-zA-Z0-9_]*";

    pub const TINY_SUPPORT_KEYWORD: &str = r"\b(?:break|case|const|continue|default|else|for|fun|if|import|int16|int32|int64|int8|namespace|struct|switch|uint16|uint32|uint64|uint8|var)\b";
    pub const TINY_SUPPORT_BUILTIN: &str = r"\b(?:f)\b";
    pub const TINY_SUPPORT_CONSTANT: &str = r"\b(?:DIGITAL_MESSAGE|FIRMATA_STRING|ANALOG_MESSAGE|REPORT_DIGITAL|REPORT_ANALOG|INPUT_PULLUP|SET_PIN_MODE|INTERNAL2V56|SYSTEM_RESET|LED_BUILTIN|INTERNAL1V1|SYSEX_START|INTERNAL|EXTERNAL|DEFAULT|OUTPUT|INPUT|HIGH|LOW)\b";
}

fn rule(category: &str, source: &str) -> ConfigurationResult<Rule> {
    Rule::named(category, Pattern::new(source)?)
}

fn rule_with(category: &str, pattern: Pattern) -> ConfigurationResult<Rule> {
    Rule::named(category, pattern)
}

/// Generic C-family base grammar
pub fn clike() -> ConfigurationResult<RuleSet> {
    use sources::*;

    RuleSet::new(vec![
        rule(COMMENT, CLIKE_COMMENT)?,
        rule(STRING, CLIKE_STRING)?,
        rule(CLASS_NAME, CLIKE_CLASS_NAME)?,
        rule(KEYWORD, CLIKE_KEYWORD)?,
        rule(BOOLEAN, CLIKE_BOOLEAN)?,
        rule_with(
            FUNCTION,
            Pattern::builder(CLIKE_FUNCTION).token_group(1).build()?,
        )?,
        rule_with(
            NUMBER,
            Pattern::builder(CLIKE_NUMBER).case_insensitive(true).build()?,
        )?,
        rule(OPERATOR, CLIKE_OPERATOR)?,
        rule(PUNCTUATION, CLIKE_PUNCTUATION)?,
    ])
}

/// C, derived from `clike`
pub fn c(clike: &RuleSet, composer: &GrammarComposer) -> ConfigurationResult<RuleSet> {
    use sources::*;

    let extended = composer.extend(
        clike,
        [
            rule(COMMENT, C_COMMENT)?,
            rule(STRING, C_STRING)?,
            rule(CLASS_NAME, C_CLASS_NAME)?,
            rule(KEYWORD, C_KEYWORD)?,
            rule_with(
                FUNCTION,
                Pattern::builder(C_FUNCTION)
                    .case_insensitive(true)
                    .token_group(1)
                    .build()?,
            )?,
            rule_with(
                NUMBER,
                Pattern::builder(C_NUMBER).case_insensitive(true).build()?,
            )?,
            rule(OPERATOR, C_OPERATOR)?,
        ],
    )?;

    let with_char = composer.insert_before(&extended, STRING, [rule(CHAR, C_CHAR)?])?;

    let directive = RuleSet::from_patterns([(DIRECTIVE, C_DIRECTIVE)])?;
    let macro_pattern = Pattern::builder(C_MACRO)
        .case_insensitive(true)
        .capture(1, directive)
        .alias("property")
        .build()?;
    let with_macro =
        composer.insert_before(&with_char, STRING, [rule_with(MACRO, macro_pattern)?])?;

    let with_constant =
        composer.insert_before(&with_macro, FUNCTION, [rule(CONSTANT, C_CONSTANT)?])?;

    Ok(composer.exclude(&with_constant, [BOOLEAN]))
}

/// Documentation dialect of tiny, derived from `clike`
pub fn tiny(clike: &RuleSet, composer: &GrammarComposer) -> ConfigurationResult<RuleSet> {
    use sources::*;

    let identifier = RuleSet::from_patterns([(IDENTIFIER, TINY_IDENTIFIER)])?;
    let tag = Pattern::builder(TINY_TAG).capture(1, identifier).build()?;

    let extended = composer.extend(
        clike,
        [
            rule(KEYWORD, TINY_KEYWORD)?,
            rule(BUILTIN, TINY_BUILTIN)?,
            rule(BOOLEAN, TINY_BOOLEAN)?,
            rule(OPERATOR, TINY_OPERATOR)?,
            rule(STRING, TINY_STRING)?,
            rule_with(TAG, tag)?,
        ],
    )?;

    Ok(composer.exclude(&extended, [CLASS_NAME]))
}

/// Editor/runtime dialect of tiny, derived from `c`
pub fn tiny_support(c: &RuleSet, composer: &GrammarComposer) -> ConfigurationResult<RuleSet> {
    use sources::*;

    composer.extend(
        c,
        [
            rule(KEYWORD, TINY_SUPPORT_KEYWORD)?,
            rule(BUILTIN, TINY_SUPPORT_BUILTIN)?,
            rule(CONSTANT, TINY_SUPPORT_CONSTANT)?,
        ],
    )
}

/// Register every built-in grammar, returning how many were registered
pub fn register_all(registry: &mut GrammarRegistry) -> ConfigurationResult<usize> {
    // all four or none
    if let Some(name) = builtin_names().iter().find(|name| registry.contains(name)) {
        return Err(ConfigurationError::duplicate_grammar(name));
    }
    if registry.len() + builtin_names().len() > MAX_REGISTERED_GRAMMARS {
        return Err(ConfigurationError::RegistryFull {
            max: MAX_REGISTERED_GRAMMARS,
        });
    }

    let composer = GrammarComposer::with_preferences(registry.preferences().clone());

    let clike = clike()?;
    let c = c(&clike, &composer)?;
    let tiny = tiny(&clike, &composer)?;
    let tiny_support = tiny_support(&c, &composer)?;

    registry.register(CLIKE, clike)?;
    registry.register(C, c)?;
    registry.register(TINY, tiny)?;
    registry.register(TINY_SUPPORT, tiny_support)?;

    Ok(builtin_names().len())
}
