//! Rerule - CLI tool for applying ordered, pattern-based rewrite rules to a source file.
//!
//! This library provides the core functionality for rerule, including:
//! - Rule-set parsing and validation
//! - Literal, regex and sed-style rules, compiled before anything runs
//! - The rewrite engine: a fold of the rules over one text buffer
//! - Atomic persistence of the rewritten file
//!
//! # Example
//!
//! ```
//! use rerule_cli::engine::run;
//! use rerule_cli::rules::Rule;
//!
//! let rules = vec![
//!     Rule::literal("remove decl", "let x = 1;\n", "").unwrap(),
//!     Rule::regex("rename call", r"foo\(\);", "bar();").unwrap(),
//! ];
//!
//! let report = run("let x = 1;\nfoo();\n", &rules);
//! assert_eq!(report.final_text, "bar();\n");
//! assert_eq!(report.applied_count(), 2);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod resource;
pub mod rules;

pub use error::{Result, RewriteError};

use tracing_subscriber::EnvFilter;

/// Initialize tracing on stderr. `RUST_LOG` wins when set.
pub fn init_tracing(verbose: bool) {
	let default_level = if verbose { "rerule_cli=debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}
