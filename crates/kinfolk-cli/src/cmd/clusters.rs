//! `kin clusters` — marriage clusters.

use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode};
use clap::Args;
use kinfolk_core::Family;
use kinfolk_layout::MarriageClusters;
use kinfolk_layout::build::group_id;
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
#[command(
    about = "List marriage clusters",
    long_about = "List groups of people connected through spouse relationships, \
                  including remarriage chains.",
    after_help = "EXAMPLES:\n    # List clusters\n    kin clusters\n\n\
                  # Machine-readable output\n    kin clusters --json"
)]
pub struct ClustersArgs {}

/// One cluster in `kin clusters` output.
#[derive(Debug, Serialize)]
pub struct ClusterRow {
    /// Group container id used by `kin layout`.
    pub group: String,
    pub members: Vec<String>,
    /// Spouse pairs inside the cluster, each ordered `(lower, higher)`.
    pub pairs: Vec<(String, String)>,
}

/// Execute `kin clusters`.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn run_clusters(_args: &ClustersArgs, family: &Family, output: OutputMode) -> anyhow::Result<()> {
    let clusters = MarriageClusters::detect(family);
    let rows: Vec<ClusterRow> = clusters
        .clusters()
        .iter()
        .enumerate()
        .map(|(index, members)| ClusterRow {
            group: group_id(members),
            members: members.clone(),
            pairs: clusters
                .pairs_in(index)
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        })
        .collect();

    render_mode(
        output,
        &rows,
        |rows, w| {
            for row in rows {
                writeln!(w, "{}\t{}", row.group, row.members.join(","))?;
            }
            Ok(())
        },
        |rows, w| {
            if rows.is_empty() {
                return writeln!(w, "No marriage clusters.");
            }
            for row in rows {
                pretty_section(w, &row.group)?;
                for (a, b) in &row.pairs {
                    writeln!(w, "  {a} + {b}")?;
                }
                writeln!(w)?;
            }
            pretty_rule(w)?;
            writeln!(w, "{} clusters", rows.len())
        },
    )
}
