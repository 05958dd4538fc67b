use crate::config::types::{RuleSet, RuleSpec};
use crate::error::{Result, RewriteError};
use crate::rules::pattern::Pattern;
use crate::rules::rewriter::Substitution;
use std::num::NonZeroUsize;

/// One immutable text transformation: a pattern, its replacement and a label.
#[derive(Debug, Clone)]
pub struct Rule {
	label: String,
	pattern: Pattern,
	replacement: String,
	limit: Option<NonZeroUsize>,
}

impl Rule {
	/// Create a rule that replaces every match of `pattern`.
	pub fn new(label: impl Into<String>, pattern: Pattern, replacement: impl Into<String>) -> Self {
		Rule {
			label: label.into(),
			pattern,
			replacement: replacement.into(),
			limit: None,
		}
	}

	/// Create a rule from a regular expression.
	pub fn regex(
		label: impl Into<String>,
		pattern: &str,
		replacement: impl Into<String>,
	) -> Result<Self> {
		let label: String = label.into();
		let pattern = Pattern::regex(&label, pattern, false)?;
		Ok(Rule::new(label, pattern, replacement))
	}

	/// Create a rule from a literal substring.
	pub fn literal(
		label: impl Into<String>,
		pattern: impl Into<String>,
		replacement: impl Into<String>,
	) -> Result<Self> {
		let label: String = label.into();
		let pattern = Pattern::literal(&label, pattern)?;
		Ok(Rule::new(label, pattern, replacement))
	}

	/// Create a rule from a sed-like expression such as `s/foo/bar/g`.
	pub fn sed(label: impl Into<String>, expression: &str) -> Result<Self> {
		Substitution::parse(expression)?.into_rule(label)
	}

	/// Cap the number of replacements this rule performs.
	pub fn with_limit(mut self, limit: NonZeroUsize) -> Self {
		self.limit = Some(limit);
		self
	}

	/// Compile a rule from its rule-set entry.
	pub fn from_spec(spec: &RuleSpec) -> Result<Self> {
		spec.validate()?;

		let label = spec.label.as_str();
		let rule = match (&spec.regex, &spec.literal, &spec.sed) {
			(Some(regex), None, None) => {
				let pattern = Pattern::regex(label, regex, spec.case_insensitive)?;
				Rule::new(label, pattern, required_replacement(spec)?)
			}
			(None, Some(literal), None) => {
				let pattern = Pattern::literal(label, literal.as_str())?;
				Rule::new(label, pattern, required_replacement(spec)?)
			}
			(None, None, Some(sed)) => {
				let mut substitution = Substitution::parse(sed)?;
				substitution.case_insensitive |= spec.case_insensitive;
				substitution.into_rule(label)?
			}
			// validate() has already rejected every other combination.
			_ => {
				return Err(RewriteError::MissingPattern {
					label: label.to_string(),
				});
			}
		};

		Ok(match spec.count {
			Some(count) => rule.with_limit(count),
			None => rule,
		})
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn pattern(&self) -> &Pattern {
		&self.pattern
	}

	pub fn replacement(&self) -> &str {
		&self.replacement
	}

	pub fn limit(&self) -> Option<NonZeroUsize> {
		self.limit
	}

	/// Apply this rule to `text`, returning the new text and the number of replacements.
	///
	/// When nothing matches the input is handed back untouched.
	pub fn apply(&self, text: String) -> (String, usize) {
		let count = self
			.pattern
			.count_matches(&text, self.limit.map(NonZeroUsize::get));
		if count == 0 {
			return (text, 0);
		}

		let rewritten = self.pattern.replace_first(&text, &self.replacement, count);
		(rewritten, count)
	}
}

fn required_replacement(spec: &RuleSpec) -> Result<&str> {
	spec.replacement
		.as_deref()
		.ok_or_else(|| RewriteError::MissingReplacement {
			label: spec.label.clone(),
		})
}

/// Compile every rule in a rule set, in order.
///
/// Fails on the first malformed rule so that no rule runs unless all of them are valid.
pub fn compile_rules(rule_set: &RuleSet) -> Result<Vec<Rule>> {
	rule_set.rules.iter().map(Rule::from_spec).collect()
}
