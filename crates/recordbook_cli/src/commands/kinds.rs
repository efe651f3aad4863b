//! Kinds command implementation.

use super::error::CliResult;
use recordbook_core::EntityKind;
use std::io::Write;

/// Runs the kinds command.
pub fn run(out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "{:<12} {:<12} {:<12} REST base", "KIND", "KEY", "ENTITY")?;
    for kind in EntityKind::ALL {
        writeln!(
            out,
            "{:<12} {:<12} {:<12} {}",
            kind.display_name(),
            kind.collection_key(),
            kind.entity_name(),
            kind.api_base()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_kind() {
        let mut buf = Vec::new();
        run(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(text.lines().count(), 1 + EntityKind::ALL.len());
        assert!(text.contains("/api/parks"));
        assert!(text.contains("ucsbdates"));
    }
}
