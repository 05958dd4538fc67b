//! Rule-set loading and parsing for rerule.
//!
//! This module handles:
//! - TOML rule-set parsing and validation
//! - Target path resolution
//! - The `--init` template

pub mod parser;
pub mod template;
pub mod types;

pub use parser::{DEFAULT_RULE_SET, load_rule_set, parse_rule_set_file, parse_rule_set_str};
pub use template::generate_init_template;
pub use types::{LoadedRuleSet, RuleSet, RuleSpec};
