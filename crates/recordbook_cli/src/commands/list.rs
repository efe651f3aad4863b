//! List command implementation.

use super::error::CliResult;
use super::{print_record, Context};
use std::io::Write;

/// Runs the list command.
pub fn run(ctx: &Context, kind: &str, format: &str, out: &mut impl Write) -> CliResult<()> {
    let store = ctx.viewable(kind)?;
    let collection = store.load()?;

    match format {
        "json" => {
            writeln!(out, "{}", serde_json::to_string_pretty(&collection)?)?;
        }
        _ => {
            writeln!(
                out,
                "{}: {} record(s), next id {}",
                store.key(),
                collection.len(),
                collection.next_id
            )?;
            for record in &collection.records {
                print_record(out, record)?;
            }
        }
    }

    Ok(())
}
