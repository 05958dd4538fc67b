use std::path::PathBuf;

/// Library-level structured errors for rerule.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
	#[error("Rule set not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read rule set: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse rule set: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Rule '{label}' sets mutually exclusive options: {option1} and {option2}")]
	MutuallyExclusive {
		label: String,
		option1: String,
		option2: String,
	},

	#[error("Rule '{label}' has no pattern (set one of regex, literal or sed)")]
	MissingPattern { label: String },

	#[error("Rule '{label}' has no replacement")]
	MissingReplacement { label: String },

	#[error("Invalid regex pattern in rule '{label}': {pattern}")]
	InvalidPattern {
		label: String,
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Empty pattern in rule '{label}'")]
	EmptyPattern { label: String },

	#[error("Invalid substitution '{input}': {reason}")]
	InvalidSubstitution { input: String, reason: String },

	#[error("No target file given and the rule set does not name one")]
	MissingTarget,

	#[error("Failed to read {path}")]
	ResourceRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write {path}")]
	ResourceWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl RewriteError {
	/// Whether this error comes from a malformed rule pattern.
	///
	/// Pattern errors are always raised while compiling the rule set, before any
	/// text has been touched.
	pub fn is_pattern_error(&self) -> bool {
		matches!(
			self,
			RewriteError::InvalidPattern { .. }
				| RewriteError::EmptyPattern { .. }
				| RewriteError::InvalidSubstitution { .. }
		)
	}

	/// Whether this error comes from reading or writing the target file.
	pub fn is_resource_error(&self) -> bool {
		matches!(
			self,
			RewriteError::ResourceRead { .. } | RewriteError::ResourceWrite { .. }
		)
	}
}

/// Result type alias using RewriteError.
pub type Result<T> = std::result::Result<T, RewriteError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_classification() {
		let err = RewriteError::EmptyPattern {
			label: "x".to_string(),
		};
		assert!(err.is_pattern_error());
		assert!(!err.is_resource_error());

		let err = RewriteError::ResourceRead {
			path: PathBuf::from("main.js"),
			source: std::io::Error::from(std::io::ErrorKind::NotFound),
		};
		assert!(err.is_resource_error());
		assert!(!err.is_pattern_error());

		assert!(!RewriteError::MissingTarget.is_pattern_error());
	}

	#[test]
	fn test_error_messages_name_the_rule() {
		let err = RewriteError::MissingPattern {
			label: "rename call".to_string(),
		};
		assert!(err.to_string().contains("rename call"));
	}
}
