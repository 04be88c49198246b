//! `kin roster` — everyone with their title relative to the root.

use crate::cmd::pick_root;
use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode};
use chrono::{Local, NaiveDate};
use clap::Args;
use kinfolk_core::config::KinshipConfig;
use kinfolk_core::roster::{RosterEntry, roster};
use kinfolk_core::{Family, Locale};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Args, Debug)]
#[command(
    about = "List every person with title, generation, and age",
    long_about = "List every person ordered by generation. Titles are shown relative to the \
                  root person (from --root or the family file).",
    after_help = "EXAMPLES:\n    # Roster from the file's root person\n    kin roster\n\n\
                  # Roster from another perspective\n    kin roster --root bob\n\n\
                  # Ages as of a fixed date\n    kin roster --on 2020-01-01 --json"
)]
pub struct RosterArgs {
    /// Perspective person; defaults to the root recorded in the family file.
    #[arg(long)]
    pub root: Option<String>,

    /// Title vocabulary (zh-TW or en); overrides the project config.
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Compute ages as of this date (YYYY-MM-DD) instead of today.
    #[arg(long)]
    pub on: Option<NaiveDate>,
}

/// JSON shape of `kin roster`.
#[derive(Debug, Serialize)]
pub struct RosterOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    pub on: NaiveDate,
    pub count: usize,
    pub people: Vec<RosterEntry>,
}

/// Execute `kin roster`.
///
/// # Errors
///
/// Returns an error if the root person is unknown or output fails.
pub fn run_roster(
    args: &RosterArgs,
    family: &Family,
    config: &KinshipConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let root = pick_root(family, args.root.as_deref(), output)?;
    let config = args
        .locale
        .map_or_else(|| config.clone(), |locale| config.clone().with_locale(locale));
    let on = args.on.unwrap_or_else(|| Local::now().date_naive());

    let people = roster(family, root, &config, on);
    let result = RosterOutput {
        root: root.map(str::to_string),
        on,
        count: people.len(),
        people,
    };

    render_mode(output, &result, render_text, render_pretty)
}

fn render_text(result: &RosterOutput, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id\tname\ttitle\tgeneration\tage")?;
    for entry in &result.people {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            entry.id,
            entry.name,
            entry.title,
            entry.generation,
            entry.age.map(|a| a.to_string()).unwrap_or_default(),
        )?;
    }
    Ok(())
}

fn render_pretty(result: &RosterOutput, w: &mut dyn Write) -> io::Result<()> {
    if result.people.is_empty() {
        return writeln!(w, "No people in this family.");
    }

    let mut current = None;
    for entry in &result.people {
        if current != Some(entry.generation) {
            if current.is_some() {
                writeln!(w)?;
            }
            pretty_section(w, &format!("Generation {}", entry.generation))?;
            current = Some(entry.generation);
        }
        let age = match (entry.age, entry.deceased) {
            (Some(age), true) => format!("{age} (deceased)"),
            (Some(age), false) => age.to_string(),
            (None, true) => "(deceased)".to_string(),
            (None, false) => String::new(),
        };
        writeln!(w, "{:<14} {:<16} {:<12} {age}", entry.id, entry.name, entry.title)?;
    }
    pretty_rule(w)?;
    writeln!(w, "{} people", result.count)
}
