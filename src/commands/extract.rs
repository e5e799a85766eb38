//! `depgen extract` command.

use std::path::Path;

use crate::config::DEFAULT_HEADER_COMMENT;
use crate::context::ServiceContext;
use crate::deps::{makefile, update};
use crate::ports::UpdateOutcome;

/// Execute the `extract` command.
///
/// Reads compiler-generated rules from `input`, drops system headers, and
/// writes the normalized fragment to `output` if it changed.
///
/// # Errors
///
/// Returns an error string if the input cannot be read or the output
/// cannot be written.
pub fn run(
    ctx: &ServiceContext,
    input: &Path,
    output: &Path,
    comment: Option<&str>,
) -> Result<(), String> {
    let outcome = convert(ctx, input, output, comment)?;
    if outcome != UpdateOutcome::Unchanged {
        println!("{}:0: {outcome}", output.display());
    }
    Ok(())
}

/// Converts `input` into a dependency file at `output`.
///
/// # Errors
///
/// Returns an error string if reading or writing fails.
pub fn convert(
    ctx: &ServiceContext,
    input: &Path,
    output: &Path,
    comment: Option<&str>,
) -> Result<UpdateOutcome, String> {
    let bytes =
        ctx.fs.read(input).map_err(|e| format!("failed to read {}: {e}", input.display()))?;
    let deps = makefile::extract(&String::from_utf8_lossy(&bytes));
    let rendered = makefile::render_with_comment(&deps, comment.unwrap_or(DEFAULT_HEADER_COMMENT));
    update::update_file(ctx.fs.as_ref(), output, &rendered)
}
