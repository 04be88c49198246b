//! `kin generations` — generation number of every person.

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use clap::Args;
use kinfolk_core::Family;
use kinfolk_core::graph::Generations;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Args, Debug)]
#[command(
    about = "Show generation numbers",
    long_about = "Assign generation numbers: founders are 1, children sit below their deepest \
                  parent, spouses share the deeper generation.",
    after_help = "EXAMPLES:\n    # Grouped by generation\n    kin generations\n\n\
                  # Machine-readable output\n    kin generations --json"
)]
pub struct GenerationsArgs {}

/// JSON shape of `kin generations`.
#[derive(Debug, Serialize)]
pub struct GenerationsOutput {
    pub passes: usize,
    pub converged: bool,
    pub generations: BTreeMap<String, u32>,
}

/// Execute `kin generations`.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn run_generations(
    _args: &GenerationsArgs,
    family: &Family,
    output: OutputMode,
) -> anyhow::Result<()> {
    let computed = Generations::compute(family);
    let result = GenerationsOutput {
        passes: computed.passes(),
        converged: computed.converged(),
        generations: computed.as_map().clone(),
    };

    render_mode(
        output,
        &result,
        |r, w| {
            for (id, value) in &r.generations {
                writeln!(w, "{id}\t{value}")?;
            }
            Ok(())
        },
        |_, w| {
            for (value, ids) in computed.groups() {
                pretty_section(w, &format!("Generation {value}"))?;
                writeln!(w, "{}", ids.join(", "))?;
                writeln!(w)?;
            }
            pretty_kv(w, "Passes", computed.passes().to_string())?;
            if !computed.converged() {
                writeln!(w, "warning: values did not settle; check for parent cycles")?;
            }
            Ok(())
        },
    )
}
