use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::error::RewriteError;

/// Top-level contents of a rule-set file such as `rerule.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
	/// File to rewrite when none is given on the command line.
	/// Relative paths are resolved against the rule-set file's directory.
	#[serde(default)]
	pub target: Option<PathBuf>,

	/// Lines printed after a successful write, e.g. how to verify the migration.
	#[serde(default)]
	pub notes: Vec<String>,

	/// Rules to apply, in order. Each rule sees the output of the ones before it.
	#[serde(default)]
	pub rules: Vec<RuleSpec>,
}

/// One rule as written in the rule-set file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct RuleSpec {
	/// Human-readable description, shown in the report.
	pub label: String,

	/// Regular expression to match (mutually exclusive with literal and sed).
	pub regex: Option<String>,

	/// Exact text to match (mutually exclusive with regex and sed).
	pub literal: Option<String>,

	/// Sed-like substitution, e.g. "s/pattern/replacement/g".
	/// Carries its own replacement, so `replacement` must not be set.
	pub sed: Option<String>,

	/// Text substituted for each match. Required for regex and literal rules.
	pub replacement: Option<String>,

	/// Replace at most this many matches.
	pub count: Option<NonZeroUsize>,

	/// Match regardless of case. Not available for literal rules.
	#[serde(default)]
	pub case_insensitive: bool,
}

/// A loaded rule set with its source path for display.
#[derive(Debug, Clone)]
pub struct LoadedRuleSet {
	/// The parsed rule set.
	pub rule_set: RuleSet,

	/// The path this rule set was loaded from.
	pub path: PathBuf,
}

impl LoadedRuleSet {
	/// Resolve the file to rewrite: an explicit path wins over the rule set's `target`.
	pub fn resolve_target(&self, explicit: Option<PathBuf>) -> Result<PathBuf, RewriteError> {
		if let Some(path) = explicit {
			return Ok(path);
		}

		let target = self
			.rule_set
			.target
			.as_ref()
			.ok_or(RewriteError::MissingTarget)?;

		if target.is_absolute() {
			return Ok(target.clone());
		}

		Ok(match self.path.parent() {
			Some(dir) => dir.join(target),
			None => target.clone(),
		})
	}
}

impl RuleSpec {
	/// Validate that exactly one pattern kind is set and the replacement fits it.
	pub fn validate(&self) -> Result<(), RewriteError> {
		let pattern_fields = [
			("regex", self.regex.is_some()),
			("literal", self.literal.is_some()),
			("sed", self.sed.is_some()),
		];

		let set_fields: Vec<_> = pattern_fields
			.iter()
			.filter(|(_, is_set)| *is_set)
			.map(|(name, _)| *name)
			.collect();

		if set_fields.len() > 1 {
			return Err(self.mutually_exclusive(set_fields[0], set_fields[1]));
		}

		match set_fields.first() {
			None => Err(RewriteError::MissingPattern {
				label: self.label.clone(),
			}),
			Some(&"sed") if self.replacement.is_some() => {
				Err(self.mutually_exclusive("sed", "replacement"))
			}
			Some(&"literal") if self.case_insensitive => {
				Err(self.mutually_exclusive("literal", "case_insensitive"))
			}
			Some(&"sed") => Ok(()),
			Some(_) if self.replacement.is_none() => Err(RewriteError::MissingReplacement {
				label: self.label.clone(),
			}),
			Some(_) => Ok(()),
		}
	}

	fn mutually_exclusive(&self, option1: &str, option2: &str) -> RewriteError {
		RewriteError::MutuallyExclusive {
			label: self.label.clone(),
			option1: option1.to_string(),
			option2: option2.to_string(),
		}
	}
}

impl RuleSet {
	/// Validate all rules in this rule set.
	pub fn validate(&self) -> Result<(), RewriteError> {
		for rule in &self.rules {
			rule.validate()?;
		}
		Ok(())
	}
}
