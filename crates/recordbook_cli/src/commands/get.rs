//! Get command implementation.

use super::error::CliResult;
use super::{print_record, Context};
use std::io::Write;

/// Runs the get command.
pub fn run(
    ctx: &Context,
    kind: &str,
    id: &str,
    format: &str,
    out: &mut impl Write,
) -> CliResult<()> {
    let store = ctx.viewable(kind)?;
    let record = store.get_by_id(id)?;

    match format {
        "json" => writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?,
        _ => print_record(out, &record)?,
    }

    Ok(())
}
