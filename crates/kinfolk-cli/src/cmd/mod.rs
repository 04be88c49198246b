pub mod check;
pub mod clusters;
pub mod completions;
pub mod generations;
pub mod layout;
pub mod roster;
pub mod search;
pub mod title;

use crate::output::{CliError, OutputMode, render_error};
use kinfolk_core::{ErrorCode, Family};
use std::path::Path;
use tracing::instrument;

/// Load the family file, reporting failures in the requested output mode.
///
/// # Errors
///
/// Returns an error if the file is missing, malformed, or has duplicate ids.
#[instrument(skip(output))]
pub fn load_family(path: &Path, output: OutputMode) -> anyhow::Result<Family> {
    match Family::load(path) {
        Ok(family) => Ok(family),
        Err(e) => {
            render_error(output, &CliError::from(&e))?;
            anyhow::bail!("{e}");
        }
    }
}

/// Fail with `E2002` unless `id` names a person in `family`.
///
/// # Errors
///
/// Returns an error when the person is unknown.
pub fn require_person(family: &Family, id: &str, output: OutputMode) -> anyhow::Result<()> {
    if family.contains(id) {
        return Ok(());
    }
    render_error(
        output,
        &CliError::from_code(ErrorCode::PersonNotFound, format!("person '{id}' not found")),
    )?;
    anyhow::bail!("person '{id}' not found");
}

/// Pick the perspective person: the explicit flag, else the file's root.
///
/// # Errors
///
/// Returns an error when the chosen person is unknown.
pub fn pick_root<'a>(
    family: &'a Family,
    flag: Option<&'a str>,
    output: OutputMode,
) -> anyhow::Result<Option<&'a str>> {
    let root = flag.or_else(|| family.root());
    if let Some(id) = root {
        require_person(family, id, output)?;
    }
    Ok(root)
}
