//! Check command implementation.

use anyhow::{Context, Result};
use archlint::{has_findings_at, Architecture, EngineOptions, RuleSetFile, Severity};
use std::path::PathBuf;

use crate::config_resolver::{self, Origin};
use crate::OutputFormat;

/// Severity threshold at which `check` exits non-zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FailOn {
    /// Fail on errors only.
    #[default]
    Error,
    /// Fail on warnings or errors.
    Warn,
    /// Fail on any finding.
    Info,
    /// Never fail because of findings.
    None,
}

impl FailOn {
    /// Returns the lowest failing severity, or `None` when nothing fails.
    #[must_use]
    pub fn threshold(self) -> Option<Severity> {
        match self {
            Self::Error => Some(Severity::Error),
            Self::Warn => Some(Severity::Warn),
            Self::Info => Some(Severity::Info),
            Self::None => None,
        }
    }
}

/// Arguments of the check command.
#[derive(Debug)]
pub struct CheckArgs {
    /// Architecture document to lint.
    pub file: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Failure threshold.
    pub fail_on: FailOn,
    /// Allow-list overriding the rule-set file.
    pub rules: Vec<String>,
    /// Explicit rule-set file.
    pub config: Option<PathBuf>,
}

/// Runs the check command.
///
/// Returns `true` when a finding reaches the `--fail-on` threshold.
pub fn run(args: &CheckArgs) -> Result<bool> {
    let options = load_options(args)?;

    let model = Architecture::from_path(&args.file)
        .with_context(|| format!("Failed to load architecture: {}", args.file.display()))?;

    tracing::info!("Checking {}", args.file.display());
    let findings = archlint::check(&model, &options);

    super::output::print(&findings, args.format)?;

    Ok(exceeds_threshold(&findings, args.fail_on))
}

fn exceeds_threshold(findings: &[archlint::Finding], fail_on: FailOn) -> bool {
    fail_on
        .threshold()
        .is_some_and(|severity| has_findings_at(findings, severity))
}

/// Resolves and loads the rule-set file, then applies `--rules`.
fn load_options(args: &CheckArgs) -> Result<EngineOptions> {
    let mut options = match config_resolver::resolve(&args.file, args.config.as_deref()) {
        None => EngineOptions::default(),
        Some(source) => {
            if source.origin == Origin::Global {
                tracing::info!("Using global rule set: {}", source.path.display());
            }
            RuleSetFile::from_file(&source.path)
                .and_then(RuleSetFile::into_options)
                .with_context(|| format!("Failed to load rule set: {}", source.path.display()))?
        }
    };

    if !args.rules.is_empty() {
        options.enabled_rules = args
            .rules
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
    }
    Ok(options)
}
