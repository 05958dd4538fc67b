use crate::error::{Result, RewriteError};
use regex::{Regex, RegexBuilder};
use std::fmt;

/// A compiled matcher over text.
#[derive(Debug, Clone)]
pub enum Pattern {
	/// Exact substring match. Replacements are inserted verbatim.
	Literal(String),

	/// Regular expression. Replacements may reference capture groups (`$1`, `${name}`).
	Regex(Regex),
}

impl Pattern {
	/// Build a literal pattern.
	pub fn literal(label: &str, text: impl Into<String>) -> Result<Self> {
		let text = text.into();
		if text.is_empty() {
			return Err(RewriteError::EmptyPattern {
				label: label.to_string(),
			});
		}
		Ok(Pattern::Literal(text))
	}

	/// Compile a regex pattern.
	pub fn regex(label: &str, source: &str, case_insensitive: bool) -> Result<Self> {
		if source.is_empty() {
			return Err(RewriteError::EmptyPattern {
				label: label.to_string(),
			});
		}

		let regex = RegexBuilder::new(source)
			.case_insensitive(case_insensitive)
			.build()
			.map_err(|source_err| RewriteError::InvalidPattern {
				label: label.to_string(),
				pattern: source.to_string(),
				source: source_err,
			})?;

		Ok(Pattern::Regex(regex))
	}

	/// The pattern source text.
	pub fn as_str(&self) -> &str {
		match self {
			Pattern::Literal(text) => text,
			Pattern::Regex(regex) => regex.as_str(),
		}
	}

	/// Short name of the pattern kind, for display.
	pub fn kind(&self) -> &'static str {
		match self {
			Pattern::Literal(_) => "literal",
			Pattern::Regex(_) => "regex",
		}
	}

	/// Count non-overlapping matches in `text`, stopping at `limit` if given.
	pub fn count_matches(&self, text: &str, limit: Option<usize>) -> usize {
		let limit = limit.unwrap_or(usize::MAX);
		match self {
			Pattern::Literal(needle) => text.matches(needle.as_str()).take(limit).count(),
			Pattern::Regex(regex) => regex.find_iter(text).take(limit).count(),
		}
	}

	/// Replace the first `count` matches in `text`.
	///
	/// `count` must come from [`Pattern::count_matches`] on the same text and be non-zero.
	pub(crate) fn replace_first(&self, text: &str, replacement: &str, count: usize) -> String {
		debug_assert!(count > 0);
		match self {
			Pattern::Literal(needle) => text.replacen(needle.as_str(), replacement, count),
			Pattern::Regex(regex) => regex.replacen(text, count, replacement).into_owned(),
		}
	}
}

impl fmt::Display for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {:?}", self.kind(), self.as_str())
	}
}
