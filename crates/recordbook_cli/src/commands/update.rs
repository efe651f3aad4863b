//! Update command implementation.

use super::error::CliResult;
use super::{parse_record, Context};
use recordbook_core::Record;
use std::io::Write;

/// Runs the update command.
pub fn run(ctx: &Context, kind: &str, json: &str, out: &mut impl Write) -> CliResult<()> {
    let store = ctx.mutable(kind)?;
    let record = parse_record(json)?;
    let id = record.id();
    store.update(record)?;
    writeln!(out, "{} with id {} updated", store.entity(), id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::error::CliError;
    use crate::commands::test_support::{admin, output};
    use crate::commands::{add, get};
    use tempfile::tempdir;

    #[test]
    fn replaces_the_record() {
        let dir = tempdir().unwrap();
        let ctx = admin(dir.path());
        add::run(&ctx, "todos", r#"{"title":"groceries"}"#, &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        run(&ctx, "todos", r#"{"id":"1","title":"groceries","done":true}"#, &mut buf).unwrap();
        assert_eq!(output(buf), "todo with id 1 updated\n");

        let mut buf = Vec::new();
        get::run(&ctx, "todos", "1", "json", &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output(buf)).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["done"], true);
    }

    #[test]
    fn missing_id() {
        let dir = tempdir().unwrap();
        let err = run(&admin(dir.path()), "todos", r#"{"title":"x"}"#, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "id is a required parameter");
    }

    #[test]
    fn unknown_id() {
        let dir = tempdir().unwrap();
        let err = run(&admin(dir.path()), "todos", r#"{"id":7}"#, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Store(ref e) if e.is_not_found()));
    }
}
