/// Generate a template `rerule.toml` for `rerule --init`.
pub fn generate_init_template() -> String {
	r#"# rerule rule set
#
# Rules run top to bottom. Each rule sees the text produced by the rules
# before it, so put removals ahead of rules that depend on them.

# File to rewrite when none is given on the command line
# (relative to this file).
# target = "src/main.js"

# Printed after the file has been written.
# notes = ["Run the test suite to verify the migration."]

[[rules]]
label = "Rename legacy call"
literal = "legacyInit();"
replacement = "init();"

[[rules]]
label = "Drop debug logging"
regex = '''\n\s*console\.debug\([^)]*\);'''
replacement = ""

# Sed-style shorthand: flags g (every match) and i (ignore case).
# [[rules]]
# label = "Swap arguments"
# sed = 's/move\((\w+), (\w+)\)/move($2, $1)/g'
"#
	.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parser::parse_rule_set_str;
	use crate::rules::compile_rules;
	use std::path::Path;

	#[test]
	fn test_template_is_a_valid_rule_set() {
		let template = generate_init_template();
		let rule_set = parse_rule_set_str(&template, Path::new("rerule.toml")).unwrap();

		assert_eq!(rule_set.rules.len(), 2);
		assert!(rule_set.target.is_none());

		let rules = compile_rules(&rule_set).unwrap();
		assert_eq!(rules[0].label(), "Rename legacy call");
	}
}
