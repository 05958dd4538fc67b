use serde::Serialize;
use std::fmt::Write as _;

/// What happened when one rule ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
	/// Zero-based position of the rule in the job.
	pub index: usize,

	/// The rule's label.
	pub label: String,

	/// Matches replaced in the text as it stood when the rule ran.
	pub match_count: usize,

	/// Whether anything was replaced.
	pub applied: bool,
}

impl RuleOutcome {
	pub fn new(index: usize, label: impl Into<String>, match_count: usize) -> Self {
		RuleOutcome {
			index,
			label: label.into(),
			match_count,
			applied: match_count > 0,
		}
	}
}

/// Result of one job: an outcome per rule, in order, plus the final text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
	pub outcomes: Vec<RuleOutcome>,
	pub final_text: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
	target: &'a str,
	dry_run: bool,
	applied: usize,
	total: usize,
	outcomes: &'a [RuleOutcome],
}

impl JobReport {
	pub fn new(outcomes: Vec<RuleOutcome>, final_text: String) -> Self {
		JobReport {
			outcomes,
			final_text,
		}
	}

	/// Number of rules that replaced at least one match.
	pub fn applied_count(&self) -> usize {
		self.outcomes.iter().filter(|o| o.applied).count()
	}

	/// Rules that matched nothing, e.g. because the migration already ran or the
	/// source drifted away from what the rule expects.
	pub fn unmatched(&self) -> Vec<&RuleOutcome> {
		self.outcomes.iter().filter(|o| !o.applied).collect()
	}

	/// Whether the final text differs from `source_text`.
	pub fn changed(&self, source_text: &str) -> bool {
		self.final_text != source_text
	}

	/// Render the human-readable report, one line per rule.
	pub fn render_text(&self, target: &str) -> String {
		let mut out = String::new();
		let total = self.outcomes.len();

		let _ = writeln!(
			out,
			"Applying {total} {} to {target}",
			plural(total, "rule", "rules")
		);
		for outcome in &self.outcomes {
			let status = if outcome.applied {
				format!(
					"applied ({} {})",
					outcome.match_count,
					plural(outcome.match_count, "match", "matches")
				)
			} else {
				"no match".to_string()
			};
			let _ = writeln!(out, "  {}. {} ... {status}", outcome.index + 1, outcome.label);
		}
		let _ = writeln!(
			out,
			"{} of {total} {} applied",
			self.applied_count(),
			plural(total, "rule", "rules")
		);

		out
	}

	/// Render the report as pretty-printed JSON. The final text is not included.
	pub fn to_json(&self, target: &str, dry_run: bool) -> serde_json::Result<String> {
		serde_json::to_string_pretty(&JsonReport {
			target,
			dry_run,
			applied: self.applied_count(),
			total: self.outcomes.len(),
			outcomes: &self.outcomes,
		})
	}
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
	if n == 1 { one } else { many }
}
