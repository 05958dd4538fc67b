use crate::error::{Result, RewriteError};
use crate::rules::pattern::Pattern;
use crate::rules::rule::Rule;
use std::num::NonZeroUsize;

/// Parsed substitution command (sed-like syntax).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
	/// The regex source to match.
	pub pattern: String,

	/// The replacement string.
	pub replacement: String,

	/// Whether to replace all occurrences (global flag).
	pub global: bool,

	/// Whether matching ignores case (`i` flag).
	pub case_insensitive: bool,
}

impl Substitution {
	/// Parse a substitution string in sed-like format: "s/pattern/replacement/" or "s/pattern/replacement/g"
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = |reason: &str| RewriteError::InvalidSubstitution {
			input: input.to_string(),
			reason: reason.to_string(),
		};

		let mut chars = input.chars();
		if chars.next() != Some('s') {
			return Err(invalid("substitution must start with 's'"));
		}

		// The delimiter is whatever follows the 's'
		let delimiter = chars.next().ok_or_else(|| invalid("substitution too short"))?;
		if delimiter.is_alphanumeric() || delimiter == '\\' || delimiter.is_whitespace() {
			return Err(invalid("delimiter must be a punctuation character"));
		}

		let parts = split_by_delimiter(chars.as_str(), delimiter);
		if parts.len() < 3 {
			return Err(invalid(
				"substitution must have pattern, replacement and a closing delimiter",
			));
		}
		if parts.len() > 3 {
			return Err(invalid("unexpected text after flags"));
		}

		let mut substitution = Substitution {
			pattern: parts[0].clone(),
			replacement: parts[1].clone(),
			global: false,
			case_insensitive: false,
		};

		for flag in parts[2].chars() {
			match flag {
				'g' => substitution.global = true,
				'i' => substitution.case_insensitive = true,
				_ => return Err(invalid(&format!("unknown flag '{flag}'"))),
			}
		}

		Ok(substitution)
	}

	/// Compile this substitution into a rule.
	///
	/// Without the global flag the rule replaces only the first match.
	pub fn into_rule(self, label: impl Into<String>) -> Result<Rule> {
		let label: String = label.into();
		let pattern = Pattern::regex(&label, &self.pattern, self.case_insensitive)?;
		let rule = Rule::new(label, pattern, self.replacement);

		if self.global {
			Ok(rule)
		} else {
			Ok(rule.with_limit(NonZeroUsize::MIN))
		}
	}
}

/// Split a string by a delimiter, respecting backslash escapes.
///
/// A backslash always pairs with the next character: `\<d>` becomes a literal
/// delimiter, every other pair (including `\\`) is kept as-is for the regex.
fn split_by_delimiter(input: &str, delimiter: char) -> Vec<String> {
	let mut parts = Vec::new();
	let mut current = String::new();
	let mut chars = input.chars();

	while let Some(c) = chars.next() {
		if c == '\\' {
			match chars.next() {
				Some(next) if next == delimiter => current.push(next),
				Some(next) => {
					current.push(c);
					current.push(next);
				}
				None => current.push(c),
			}
		} else if c == delimiter {
			parts.push(current);
			current = String::new();
		} else {
			current.push(c);
		}
	}

	parts.push(current);

	parts
}
