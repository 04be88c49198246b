//! `kin title` — what one person calls another.

use crate::cmd::require_person;
use crate::output::{OutputMode, pretty_kv, render_mode};
use clap::Args;
use kinfolk_core::config::KinshipConfig;
use kinfolk_core::{Family, Kinship, Locale, classify};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
#[command(
    about = "Show the kinship title one person uses for another",
    long_about = "Resolve the shortest relational path from FROM to TO and name it in the \
                  configured vocabulary.",
    after_help = "EXAMPLES:\n    # What does alice call bob?\n    kin title alice bob\n\n\
                  # English vocabulary\n    kin title alice bob --locale en\n\n\
                  # Machine-readable output\n    kin title alice bob --json"
)]
pub struct TitleArgs {
    /// Person whose perspective is used.
    pub from: String,

    /// Person being named.
    pub to: String,

    /// Title vocabulary (zh-TW or en); overrides the project config.
    #[arg(long)]
    pub locale: Option<Locale>,
}

/// JSON shape of `kin title`.
#[derive(Debug, Serialize)]
pub struct TitleOutput {
    pub from: String,
    pub to: String,
    pub locale: Locale,
    pub max_depth: usize,
    /// Empty when no path exists within `max_depth` edges.
    pub title: String,
    /// Structured category; absent when no path was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinship: Option<Kinship>,
}

/// Execute `kin title`.
///
/// # Errors
///
/// Returns an error if either person is unknown or output fails.
pub fn run_title(
    args: &TitleArgs,
    family: &Family,
    config: &KinshipConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    require_person(family, &args.from, output)?;
    require_person(family, &args.to, output)?;

    let config = args
        .locale
        .map_or_else(|| config.clone(), |locale| config.clone().with_locale(locale));
    let kinship = classify(family, &args.from, &args.to, &config);
    let title = kinship.map(|k| k.title(config.locale)).unwrap_or_default();

    let result = TitleOutput {
        from: args.from.clone(),
        to: args.to.clone(),
        locale: config.locale,
        max_depth: config.max_depth,
        title,
        kinship,
    };

    render_mode(
        output,
        &result,
        |r, w| writeln!(w, "{}", r.title),
        |r, w| {
            pretty_kv(w, "From", &r.from)?;
            pretty_kv(w, "To", &r.to)?;
            if r.kinship.is_some() {
                pretty_kv(w, "Title", &r.title)
            } else {
                pretty_kv(w, "Title", format!("(no path within {} steps)", r.max_depth))
            }
        },
    )
}
