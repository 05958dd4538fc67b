//! The rewrite engine.
//!
//! A job is a strict fold over its rules: every rule runs against the text
//! produced by the rules before it, never against the original source.
//! A rule that matches nothing is recorded in the report, not raised as an error.

pub mod report;

pub use report::{JobReport, RuleOutcome};

use crate::rules::Rule;

/// One run of an ordered rule sequence over one source text.
#[derive(Debug, Clone)]
pub struct RewriteJob {
	rules: Vec<Rule>,
	source_text: String,
}

impl RewriteJob {
	pub fn new(rules: Vec<Rule>, source_text: impl Into<String>) -> Self {
		RewriteJob {
			rules,
			source_text: source_text.into(),
		}
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn source_text(&self) -> &str {
		&self.source_text
	}

	/// Run every rule in order and report the outcome.
	pub fn run(self) -> JobReport {
		run(self.source_text, &self.rules)
	}
}

/// Apply `rules` in order to `source_text`.
pub fn run(source_text: impl Into<String>, rules: &[Rule]) -> JobReport {
	let initial = (source_text.into(), Vec::<RuleOutcome>::with_capacity(rules.len()));

	let (final_text, outcomes) = rules.iter().enumerate().fold(
		initial,
		|(current_text, mut outcomes), (index, rule)| {
			let (next_text, match_count) = rule.apply(current_text);
			tracing::debug!(rule = index + 1, label = rule.label(), match_count, "Applied rule");
			outcomes.push(RuleOutcome::new(index, rule.label(), match_count));
			(next_text, outcomes)
		},
	);

	JobReport::new(outcomes, final_text)
}
