//! Token categories
//!
//! A category names the class a token belongs to (`keyword`, `string`,
//! `operator`, ...). Names are free-form so grammars can introduce their own,
//! but `plain` is reserved for text no rule matched.
use super::error::{ConfigurationError, ConfigurationResult};
use crate::config::compile_time::grammar::MAX_CATEGORY_NAME_LENGTH;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Category name carried by fallback tokens
pub const PLAIN: &str = "plain";

/// Category names shared by the built-in grammars
pub mod names {
    pub const COMMENT: &str = "comment";
    pub const STRING: &str = "string";
    pub const CHAR: &str = "char";
    pub const CLASS_NAME: &str = "class-name";
    pub const KEYWORD: &str = "keyword";
    pub const BUILTIN: &str = "builtin";
    pub const BOOLEAN: &str = "boolean";
    pub const CONSTANT: &str = "constant";
    pub const FUNCTION: &str = "function";
    pub const NUMBER: &str = "number";
    pub const OPERATOR: &str = "operator";
    pub const PUNCTUATION: &str = "punctuation";
    pub const MACRO: &str = "macro";
    pub const DIRECTIVE: &str = "directive";
    pub const TAG: &str = "tag";
    pub const IDENTIFIER: &str = "identifier";
}

/// A validated category name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// Validate and wrap a category name
    pub fn new(name: &str) -> ConfigurationResult<Self> {
        if name.is_empty() {
            return Err(ConfigurationError::invalid_category_name(
                name,
                "name is empty",
            ));
        }

        if name.len() > MAX_CATEGORY_NAME_LENGTH {
            return Err(ConfigurationError::invalid_category_name(
                name,
                &format!("longer than {} bytes", MAX_CATEGORY_NAME_LENGTH),
            ));
        }

        if name.chars().any(char::is_whitespace) {
            return Err(ConfigurationError::invalid_category_name(
                name,
                "contains whitespace",
            ));
        }

        if name == PLAIN {
            return Err(ConfigurationError::ReservedCategory {
                category: name.to_string(),
            });
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Category {
    type Error = ConfigurationError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(&name)
    }
}

impl TryFrom<&str> for Category {
    type Error = ConfigurationError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.0
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Category {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Category {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Category {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_valid_names() {
        let category = Category::new(names::CLASS_NAME).unwrap();
        assert_eq!(category.as_str(), "class-name");
        assert_eq!(category, "class-name");
        assert_eq!(category.to_string(), "class-name");
    }

    #[test]
    fn test_plain_is_reserved() {
        assert_matches!(
            Category::new(PLAIN),
            Err(ConfigurationError::ReservedCategory { .. })
        );
    }

    #[test]
    fn test_invalid_names() {
        assert_matches!(
            Category::new(""),
            Err(ConfigurationError::InvalidCategoryName { .. })
        );
        assert_matches!(
            Category::new("two words"),
            Err(ConfigurationError::InvalidCategoryName { .. })
        );
        let long = "k".repeat(MAX_CATEGORY_NAME_LENGTH + 1);
        assert_matches!(
            Category::new(&long),
            Err(ConfigurationError::InvalidCategoryName { .. })
        );
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let json = serde_json::to_string(&Category::new("keyword").unwrap()).unwrap();
        assert_eq!(json, "\"keyword\"");
        assert!(serde_json::from_str::<Category>("\"plain\"").is_err());
    }
}
