use std::sync::Arc;

use shiftql_core::{
    Connection, Delimiter, Dialect, DriverVariant, LoadableResource, PlaceholderReplacer, Result,
    Session, SqlScript, SupportedVersions, UpgradeAdvisory, Version, quote_delimited,
};
use tracing::debug;

use crate::{NAME, SqliteConnection, script::SqliteScriptParser};

/// SQLite has no upper bound; the file format has been stable across 3.x.
pub const SUPPORTED_VERSIONS: SupportedVersions = SupportedVersions::new("SQLite").minimum(3, 7);

pub struct SqliteDialect<C: Connection = SqliteConnection> {
    session: Session<C>,
    version: Version,
    advisory: Option<UpgradeAdvisory>,
}

impl<C: Connection> SqliteDialect<C> {
    pub fn open(connection: C, driver: DriverVariant) -> Result<Self> {
        let mut session = Session::acquire(NAME, connection, driver)?;
        let version = session.server_version()?;
        let advisory = SUPPORTED_VERSIONS.check(version)?;
        debug!(backend = NAME, %version, "server version supported");

        Ok(Self {
            session,
            version,
            advisory,
        })
    }

    pub fn session(&mut self) -> &mut Session<C> {
        &mut self.session
    }

    pub fn close(self) -> Result<()> {
        self.session.release()
    }
}

impl<C: Connection> Dialect for SqliteDialect<C> {
    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> Version {
        self.version
    }

    fn driver_variant(&self) -> DriverVariant {
        self.session.driver()
    }

    fn upgrade_advisory(&self) -> Option<&UpgradeAdvisory> {
        self.advisory.as_ref()
    }

    fn default_delimiter(&self) -> Delimiter {
        Delimiter::semicolon()
    }

    // SQLite has no users.
    fn current_user(&mut self) -> Result<String> {
        Ok(String::new())
    }

    fn supports_ddl_transactions(&self) -> bool {
        true
    }

    fn supports_changing_current_schema(&self) -> bool {
        false
    }

    fn catalog_is_schema(&self) -> bool {
        false
    }

    fn boolean_true(&self) -> &str {
        "1"
    }

    fn boolean_false(&self) -> &str {
        "0"
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        quote_delimited(identifier, '"', '"')
    }

    fn create_script(
        &self,
        resource: Arc<dyn LoadableResource>,
        placeholder_replacer: Arc<dyn PlaceholderReplacer>,
        mixed: bool,
    ) -> SqlScript {
        SqlScript::new(
            resource,
            placeholder_replacer,
            Arc::new(SqliteScriptParser),
            self.default_delimiter(),
            mixed,
        )
    }
}
