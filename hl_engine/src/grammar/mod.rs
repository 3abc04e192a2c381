//! Grammar definition, composition and registration

pub mod builtin;
pub mod category;
pub mod composer;
pub mod error;
pub mod registry;
pub mod rule_set;

pub use category::{Category, PLAIN};
pub use composer::{exclude, exclude_strict, extend, insert_before, GrammarComposer};
pub use error::{ConfigurationError, ConfigurationResult};
pub use registry::GrammarRegistry;
pub use rule_set::{Rule, RuleSet};
