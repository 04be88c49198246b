//! `kin search` — find people by name.

use crate::output::{OutputMode, render_mode};
use clap::Args;
use kinfolk_core::Family;
use kinfolk_core::search::{DEFAULT_LIMIT, SearchHit, search};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
#[command(
    about = "Search people by name",
    long_about = "Case-insensitive substring search over family-name and given-name \
                  combinations in either order.",
    after_help = "EXAMPLES:\n    # Find people named Wang\n    kin search wang\n\n\
                  # More results\n    kin search wang -n 20\n\n\
                  # Machine-readable output\n    kin search wang --json"
)]
pub struct SearchArgs {
    /// Name fragment to look for.
    pub query: String,

    /// Maximum number of results to return.
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
}

/// JSON envelope for search output.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub count: usize,
    pub results: Vec<SearchHit>,
}

/// Execute `kin search <query>`.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn run_search(args: &SearchArgs, family: &Family, output: OutputMode) -> anyhow::Result<()> {
    let results = search(family, &args.query, args.limit);
    let result = SearchOutput {
        query: args.query.clone(),
        count: results.len(),
        results,
    };

    render_mode(
        output,
        &result,
        |r, w| {
            for hit in &r.results {
                writeln!(w, "{}\t{}", hit.id, hit.name)?;
            }
            Ok(())
        },
        |r, w| {
            if r.results.is_empty() {
                return writeln!(w, "No people match '{}'.", r.query);
            }
            for hit in &r.results {
                writeln!(w, "{:<14} {}", hit.id, hit.name)?;
            }
            Ok(())
        },
    )
}
