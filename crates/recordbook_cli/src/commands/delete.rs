//! Delete command implementation.

use super::error::CliResult;
use super::Context;
use recordbook_core::{EntityKind, Endpoint};
use std::io::Write;

/// Runs the delete command.
pub fn run(ctx: &Context, kind: &str, id: &str, out: &mut impl Write) -> CliResult<()> {
    let store = ctx.mutable(kind)?;
    let remaining = store.delete(id)?;
    let kind: EntityKind = kind.parse()?;
    writeln!(out, "{}", Endpoint::new(kind).delete_message(id))?;
    tracing::debug!(key = store.key(), remaining = remaining.len(), "record deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::error::CliError;
    use crate::commands::test_support::{admin, output};
    use crate::commands::{add, list};
    use tempfile::tempdir;

    #[test]
    fn removes_the_record() {
        let dir = tempdir().unwrap();
        let ctx = admin(dir.path());
        for name in ["Arches", "Zion"] {
            let json = format!(r#"{{"name":"{name}","state":"Utah","acres":1}}"#);
            add::run(&ctx, "parks", &json, &mut Vec::new()).unwrap();
        }

        let mut buf = Vec::new();
        run(&ctx, "parks", "1", &mut buf).unwrap();
        assert_eq!(output(buf), "Park with id 1 deleted\n");

        let mut buf = Vec::new();
        list::run(&ctx, "parks", "text", &mut buf).unwrap();
        let text = output(buf);
        assert!(text.starts_with("parks: 1 record(s), next id 3"));
        assert!(text.contains("Zion"));
        assert!(!text.contains("Arches"));
    }

    #[test]
    fn missing_record_leaves_blob_untouched() {
        let dir = tempdir().unwrap();
        let ctx = admin(dir.path());
        add::run(&ctx, "parks", r#"{"name":"Zion","state":"Utah","acres":1}"#, &mut Vec::new())
            .unwrap();
        let before = std::fs::read_to_string(dir.path().join("parks.json")).unwrap();

        let err = run(&ctx, "parks", "99", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Store(_)));
        assert_eq!(err.to_string(), "park with id 99 not found");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("parks.json")).unwrap(),
            before
        );
    }
}
