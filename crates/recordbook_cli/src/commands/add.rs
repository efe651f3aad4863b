//! Add command implementation.

use super::error::CliResult;
use super::{parse_record, print_record, Context};
use recordbook_core::Record;
use std::io::Write;

/// Runs the add command.
pub fn run(ctx: &Context, kind: &str, json: &str, out: &mut impl Write) -> CliResult<()> {
    let store = ctx.mutable(kind)?;
    let record = store.add(parse_record(json)?)?;
    tracing::info!(key = store.key(), id = %record.id(), "record added");
    print_record(out, &record)
}
