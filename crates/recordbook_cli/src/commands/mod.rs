//! CLI command implementations.

pub mod add;
pub mod delete;
pub mod error;
pub mod get;
pub mod kinds;
pub mod list;
pub mod update;

use error::{CliError, CliResult};
use recordbook_core::{
    Access, Config, CurrentUser, EntityKind, EntityStore, JsonRecord, Record, Stores, ROLE_ADMIN,
    ROLE_USER,
};
use recordbook_storage::FileKeyValueStore;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Store handed out to commands.
pub type KindStore = EntityStore<JsonRecord, Arc<FileKeyValueStore>>;

/// Opened data directory plus the acting user.
pub struct Context {
    stores: Stores<FileKeyValueStore>,
    access: Access,
}

impl Context {
    /// Opens the data directory at `path`, creating it if needed.
    pub fn open<I>(path: &Path, roles: I, pretty: bool) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let backend = FileKeyValueStore::open(path)?;
        let user = CurrentUser::with_roles(
            roles
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
        );
        tracing::debug!(path = %path.display(), roles = ?user.roles, "opened data directory");
        Ok(Self {
            stores: Stores::with_config(backend, Config::new().pretty_print(pretty)),
            access: Access::for_user(Some(&user)),
        })
    }

    /// Store for `kind`, if the user may view records.
    pub fn viewable(&self, kind: &str) -> CliResult<KindStore> {
        if !self.access.can_view {
            return Err(CliError::Forbidden { role: ROLE_USER });
        }
        self.store(kind)
    }

    /// Store for `kind`, if the user may change records.
    pub fn mutable(&self, kind: &str) -> CliResult<KindStore> {
        if !self.access.can_mutate {
            return Err(CliError::Forbidden { role: ROLE_ADMIN });
        }
        self.store(kind)
    }

    fn store(&self, kind: &str) -> CliResult<KindStore> {
        let kind: EntityKind = kind.parse()?;
        Ok(self.stores.dynamic(kind))
    }
}

/// Parses a command-line record argument.
pub fn parse_record(json: &str) -> CliResult<JsonRecord> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(JsonRecord::from_value(value)?)
}

/// Writes one record as `<id>  <fields>`.
pub fn print_record(out: &mut impl Write, record: &JsonRecord) -> CliResult<()> {
    let fields = serde_json::Value::Object(record.fields_without_id());
    writeln!(out, "{:>4}  {}", record.id(), fields)?;
    Ok(())
}
