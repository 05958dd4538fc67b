use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rerule_cli::config::{DEFAULT_RULE_SET, LoadedRuleSet, generate_init_template, load_rule_set};
use rerule_cli::engine::{JobReport, RewriteJob};
use rerule_cli::resource::{backup_original, load_text, persist_text};
use rerule_cli::rules::compile_rules;

/// Exit status when `--strict` finds rules that matched nothing.
const EXIT_STALE_RULES: u8 = 2;

#[derive(Parser)]
#[command(name = "rerule")]
#[command(
	author,
	version,
	about = "CLI tool for applying ordered, pattern-based rewrite rules to a source file"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Rule-set file to load
	#[arg(short, long, value_name = "PATH", default_value = DEFAULT_RULE_SET, global = true)]
	rules: PathBuf,

	/// Create a template rule set at the --rules path
	#[arg(long)]
	init: bool,

	/// Overwrite an existing rule set when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Apply the rules and report, but leave the file untouched
	#[arg(long)]
	dry_run: bool,

	/// Fail without writing if any rule matched nothing
	#[arg(long)]
	strict: bool,

	/// Copy the original file to <FILE>.orig before writing
	#[arg(long)]
	backup: bool,

	/// Report format
	#[arg(long, value_enum, default_value_t = Format::Text)]
	format: Format,

	/// Enable debug logging on stderr
	#[arg(short, long, global = true)]
	verbose: bool,

	/// File to rewrite (defaults to the rule set's `target`)
	#[arg(value_name = "FILE")]
	file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Rule-set inspection commands
	Rules {
		#[command(subcommand)]
		action: RulesAction,
	},
}

#[derive(Subcommand)]
enum RulesAction {
	/// List the compiled rules in application order
	Show,
	/// Compile every rule without touching any file
	Validate,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
	Text,
	Json,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	rerule_cli::init_tracing(cli.verbose);

	// Handle --init
	if cli.init {
		return handle_init(&cli.rules, cli.force);
	}

	// Handle subcommands
	if let Some(command) = &cli.command {
		return match command {
			Commands::Rules { action } => match action {
				RulesAction::Show => handle_rules_show(&cli.rules),
				RulesAction::Validate => handle_rules_validate(&cli.rules),
			},
		};
	}

	handle_rewrite(cli)
}

fn handle_init(path: &Path, force: bool) -> Result<ExitCode> {
	if path.exists() && !force {
		anyhow::bail!(
			"{} already exists. Use --force to overwrite.",
			path.display()
		);
	}

	let template = generate_init_template();
	std::fs::write(path, template)
		.with_context(|| format!("Failed to write {}", path.display()))?;

	println!("Created {}", path.display());
	Ok(ExitCode::SUCCESS)
}

fn handle_rules_show(path: &Path) -> Result<ExitCode> {
	let loaded = load_rule_set(path).context("Failed to load rule set")?;
	let rules = compile_rules(&loaded.rule_set).context("Failed to compile rules")?;

	println!("# Source: {}", loaded.path.display());
	match loaded.resolve_target(None) {
		Ok(target) => println!("# target: {}", target.display()),
		Err(_) => println!("# target: (none)"),
	}
	println!("# rules: {}", rules.len());
	println!();

	for (i, rule) in rules.iter().enumerate() {
		println!("  Rule {}: {}", i + 1, rule.label());
		println!("    {}: {}", rule.pattern().kind(), rule.pattern().as_str());
		println!("    replacement: {:?}", rule.replacement());
		if let Some(limit) = rule.limit() {
			println!("    limit: {}", limit);
		}
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_rules_validate(path: &Path) -> Result<ExitCode> {
	let result =
		load_rule_set(path).and_then(|loaded| compile_rules(&loaded.rule_set).map(|r| r.len()));

	match result {
		Ok(count) => {
			println!("Rule set is valid: {} ({} rules)", path.display(), count);
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Rule set error: {:#}", anyhow::Error::from(e));
			Ok(ExitCode::FAILURE)
		}
	}
}

fn handle_rewrite(cli: Cli) -> Result<ExitCode> {
	// Compile everything before the target is even read
	let loaded = load_rule_set(&cli.rules).context("Failed to load rule set")?;
	let rules = compile_rules(&loaded.rule_set).context("Failed to compile rules")?;

	let target = loaded
		.resolve_target(cli.file)
		.context("No file to rewrite")?;
	let source = load_text(&target).context("Failed to load target")?;
	let display_name = target.display().to_string();

	let report = RewriteJob::new(rules, source.as_str()).run();
	let text_output = cli.format == Format::Text;

	match cli.format {
		Format::Text => print!("{}", report.render_text(&display_name)),
		Format::Json => println!(
			"{}",
			report
				.to_json(&display_name, cli.dry_run)
				.context("Failed to serialize report")?
		),
	}

	if cli.strict && !check_strict(&report) {
		return Ok(ExitCode::from(EXIT_STALE_RULES));
	}

	if cli.dry_run {
		if text_output {
			let state = if report.changed(&source) {
				"would change"
			} else {
				"unchanged"
			};
			println!("Dry run: {display_name} not written ({state})");
		}
		return Ok(ExitCode::SUCCESS);
	}

	if cli.backup {
		let backup = backup_original(&target).context("Failed to back up target")?;
		if text_output {
			println!("Backed up original to {}", backup.display());
		}
	}

	persist_text(&target, &report.final_text).context("Failed to write target")?;

	if text_output {
		println!("Wrote {display_name}");
		print_notes(&loaded);
	}

	Ok(ExitCode::SUCCESS)
}

/// Returns false when any rule matched nothing.
fn check_strict(report: &JobReport) -> bool {
	let unmatched = report.unmatched();
	if unmatched.is_empty() {
		return true;
	}

	for outcome in &unmatched {
		tracing::warn!(
			rule = outcome.index + 1,
			label = %outcome.label,
			"Rule matched nothing"
		);
	}
	let labels: Vec<_> = unmatched.iter().map(|o| o.label.as_str()).collect();
	eprintln!(
		"error: strict mode: {} rule(s) matched nothing: {}",
		unmatched.len(),
		labels.join(", ")
	);
	false
}

fn print_notes(loaded: &LoadedRuleSet) {
	if loaded.rule_set.notes.is_empty() {
		return;
	}

	println!();
	for note in &loaded.rule_set.notes {
		println!("{}", note);
	}
}
