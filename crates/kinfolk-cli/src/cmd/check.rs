//! `kin check` — report data-quality findings.

use crate::output::{OutputMode, pretty_rule, render_mode};
use clap::Args;
use kinfolk_core::Family;
use kinfolk_core::diagnostics::{Finding, diagnose};
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Args, Debug)]
#[command(
    about = "Check the family file for data problems",
    long_about = "Report dangling relationships, self-links, people with more than two parents, \
                  duplicate facts, and parent cycles. Findings never block other commands.",
    after_help = "EXAMPLES:\n    # Report findings\n    kin check\n\n\
                  # Fail when anything is found (for CI)\n    kin check --strict\n\n\
                  # Machine-readable output\n    kin check --json"
)]
pub struct CheckArgs {
    /// Exit non-zero when any finding is reported.
    #[arg(long)]
    pub strict: bool,
}

/// JSON shape of `kin check`.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub ok: bool,
    pub content_hash: String,
    pub findings: Vec<Finding>,
}

/// Execute `kin check`.
///
/// # Errors
///
/// Returns an error if output fails, or in strict mode when findings exist.
pub fn run_check(args: &CheckArgs, family: &Family, output: OutputMode) -> anyhow::Result<()> {
    let findings = diagnose(family);
    info!(findings = findings.len(), "family checked");
    let result = CheckOutput {
        ok: findings.is_empty(),
        content_hash: family.content_hash(),
        findings,
    };

    render_mode(
        output,
        &result,
        |r, w| {
            for finding in &r.findings {
                writeln!(w, "{}\t{}", finding.code, finding.message)?;
            }
            Ok(())
        },
        |r, w| {
            if r.ok {
                return writeln!(w, "No problems found.");
            }
            for finding in &r.findings {
                writeln!(w, "warning[{}]: {}", finding.code, finding.message)?;
                if !finding.relationships.is_empty() {
                    writeln!(w, "  relationships: {}", finding.relationships.join(", "))?;
                }
                if let Some(hint) = finding.error_code.hint() {
                    writeln!(w, "  hint: {hint}")?;
                }
            }
            pretty_rule(w)?;
            writeln!(w, "{} findings", r.findings.len())
        },
    )?;

    if args.strict && !result.ok {
        anyhow::bail!("{} data problems found", result.findings.len());
    }
    Ok(())
}
