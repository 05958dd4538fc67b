use crate::config::types::{LoadedRuleSet, RuleSet};
use crate::error::{Result, RewriteError};
use std::path::Path;

/// Default rule-set file name, looked up in the current directory.
pub const DEFAULT_RULE_SET: &str = "rerule.toml";

/// Load a rule set from the given path.
pub fn load_rule_set(path: &Path) -> Result<LoadedRuleSet> {
	if !path.exists() {
		return Err(RewriteError::ConfigNotFound {
			path: path.to_path_buf(),
		});
	}

	let rule_set = parse_rule_set_file(path)?;
	tracing::debug!(
		path = %path.display(),
		rules = rule_set.rules.len(),
		"Loaded rule set"
	);

	Ok(LoadedRuleSet {
		rule_set,
		path: path.to_path_buf(),
	})
}

/// Parse a rule-set file from the given path.
pub fn parse_rule_set_file(path: &Path) -> Result<RuleSet> {
	let content = std::fs::read_to_string(path).map_err(|source| RewriteError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_rule_set_str(&content, path)
}

/// Parse a rule set from a string (useful for testing).
pub fn parse_rule_set_str(content: &str, path: &Path) -> Result<RuleSet> {
	let rule_set: RuleSet =
		toml::from_str(content).map_err(|source| RewriteError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	// Validate the parsed rule set
	rule_set.validate()?;

	Ok(rule_set)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_rule_set() {
		let path = PathBuf::from("test.toml");
		let rule_set = parse_rule_set_str("", &path).unwrap();

		assert!(rule_set.target.is_none());
		assert!(rule_set.notes.is_empty());
		assert!(rule_set.rules.is_empty());
	}

	#[test]
	fn test_parse_rules_array_of_tables() {
		let content = r#"
target = "main.js"
notes = ["Hold space to speed up"]

[[rules]]
label = "Remove Z-axis variables"
regex = '  let sphereOffsetZ = 0;[^\n]*\n'
replacement = ""

[[rules]]
label = "Rename call"
literal = "foo();"
replacement = "bar();"
count = 1

[[rules]]
label = "Swap words"
sed = 's/(\w+) (\w+)/$2 $1/g'
"#;
		let path = PathBuf::from("test.toml");
		let rule_set = parse_rule_set_str(content, &path).unwrap();

		assert_eq!(rule_set.target, Some(PathBuf::from("main.js")));
		assert_eq!(rule_set.notes, vec!["Hold space to speed up".to_string()]);
		assert_eq!(rule_set.rules.len(), 3);

		let rule1 = &rule_set.rules[0];
		assert_eq!(rule1.label, "Remove Z-axis variables");
		assert_eq!(rule1.regex.as_deref(), Some(r"  let sphereOffsetZ = 0;[^\n]*\n"));
		assert_eq!(rule1.replacement.as_deref(), Some(""));

		let rule2 = &rule_set.rules[1];
		assert_eq!(rule2.literal.as_deref(), Some("foo();"));
		assert_eq!(rule2.count.map(|c| c.get()), Some(1));

		let rule3 = &rule_set.rules[2];
		assert_eq!(rule3.sed.as_deref(), Some(r"s/(\w+) (\w+)/$2 $1/g"));
		assert!(rule3.replacement.is_none());
	}

	#[test]
	fn test_parse_multiline_replacement() {
		let content = r#"
[[rules]]
label = "Replace block"
literal = "old();\n"
replacement = """
new();
more();
"""
"#;
		let path = PathBuf::from("test.toml");
		let rule_set = parse_rule_set_str(content, &path).unwrap();

		assert_eq!(rule_set.rules[0].literal.as_deref(), Some("old();\n"));
		assert_eq!(
			rule_set.rules[0].replacement.as_deref(),
			Some("new();\nmore();\n")
		);
	}

	#[test]
	fn test_mutually_exclusive_pattern_options() {
		let content = r#"
[[rules]]
label = "both"
regex = "foo"
literal = "foo"
replacement = "bar"
"#;
		let path = PathBuf::from("test.toml");
		let result = parse_rule_set_str(content, &path);

		match result.unwrap_err() {
			RewriteError::MutuallyExclusive {
				label,
				option1,
				option2,
			} => {
				assert_eq!(label, "both");
				assert_eq!(option1, "regex");
				assert_eq!(option2, "literal");
			}
			other => panic!("Expected MutuallyExclusive error, got {other:?}"),
		}
	}

	#[test]
	fn test_missing_pattern() {
		let content = r#"
[[rules]]
label = "nothing"
replacement = "bar"
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_rule_set_str(content, &path),
			Err(RewriteError::MissingPattern { .. })
		));
	}

	#[test]
	fn test_zero_count_rejected() {
		let content = r#"
[[rules]]
label = "zero"
literal = "a"
replacement = "b"
count = 0
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_rule_set_str(content, &path),
			Err(RewriteError::ConfigParseError { .. })
		));
	}

	#[test]
	fn test_unknown_field_rejected() {
		let content = r#"
[[rules]]
label = "typo"
literl = "a"
replacement = "b"
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_rule_set_str(content, &path),
			Err(RewriteError::ConfigParseError { .. })
		));
	}

	#[test]
	fn test_load_missing_rule_set() {
		let result = load_rule_set(Path::new("/nonexistent/rerule.toml"));
		assert!(matches!(result, Err(RewriteError::ConfigNotFound { .. })));
	}
}
