//! Rewrite rules for rerule.
//!
//! This module handles:
//! - Literal and regex patterns, compiled once and validated up front
//! - The immutable `Rule` and its pure `apply` step
//! - Sed-like substitution shorthand (`s/pattern/replacement/g`)

pub mod pattern;
pub mod rewriter;
pub mod rule;

pub use pattern::Pattern;
pub use rewriter::Substitution;
pub use rule::{Rule, compile_rules};
