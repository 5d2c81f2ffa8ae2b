//! Shared output formatting for findings and errors.

use anyhow::Result;
use archlint::{count_by_severity, report, ConfigError, Finding, LoadError};
use miette::{Diagnostic, GraphicalReportHandler};

use crate::OutputFormat;

/// Print findings to stdout in the specified format.
pub fn print(findings: &[Finding], format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout().lock();
    match format {
        OutputFormat::Text => report::write_text(stdout, findings)?,
        OutputFormat::Json => report::write_json(stdout, findings)?,
    }

    let (errors, warnings, infos) = count_by_severity(findings);
    tracing::info!("Found {errors} error(s), {warnings} warning(s), {infos} info(s)");
    Ok(())
}

/// Print a command failure to stderr.
///
/// Load and rule-set errors are rendered as diagnostics; anything else
/// falls back to the error chain.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("Error: {err}");

    if let Some(diagnostic) = find_diagnostic(err) {
        let mut rendered = String::new();
        if GraphicalReportHandler::new()
            .render_report(&mut rendered, diagnostic)
            .is_ok()
        {
            eprint!("{rendered}");
            return;
        }
    }

    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

fn find_diagnostic(err: &anyhow::Error) -> Option<&dyn Diagnostic> {
    if let Some(e) = err.downcast_ref::<LoadError>() {
        return Some(e as &dyn Diagnostic);
    }
    err.downcast_ref::<ConfigError>()
        .map(|e| e as &dyn Diagnostic)
}
