use std::sync::Arc;

use shiftql_core::{
    Connection, Delimiter, Dialect, DriverVariant, LoadableResource, PlaceholderReplacer, Result,
    Session, SqlScript, SupportedVersions, UpgradeAdvisory, Version,
};
use tracing::{debug, warn};

use crate::{NAME, OdbcConnection, queries, script::AseScriptParser};

const CURRENT_USER_PURPOSE: &str = "read current user";
const BOOLEAN_TRUE: &str = "1";
const BOOLEAN_FALSE: &str = "0";

/// Adaptive Server releases this adapter has been verified against.
pub const SUPPORTED_VERSIONS: SupportedVersions = SupportedVersions::new("Sybase ASE")
    .minimum(15, 7)
    .maximum(16, 2);

/// Sybase Adaptive Server Enterprise adapter.
pub struct SybaseAseDialect<C: Connection = OdbcConnection> {
    session: Session<C>,
    version: Version,
    advisory: Option<UpgradeAdvisory>,
}

impl<C: Connection> SybaseAseDialect<C> {
    /// Takes ownership of `connection` and checks the server against
    /// [`SUPPORTED_VERSIONS`].
    ///
    /// Fails when the server is older than 15.7. A server newer than 16.2 is
    /// accepted and the advisory is logged once here.
    pub fn open(connection: C, driver: DriverVariant) -> Result<Self> {
        let mut session = Session::acquire(NAME, connection, driver)?;
        let version = session.server_version()?;
        let advisory = SUPPORTED_VERSIONS.check(version)?;

        match &advisory {
            Some(advisory) => warn!(backend = NAME, %version, "{advisory}"),
            None => debug!(backend = NAME, %version, driver = driver.as_str(), "server version supported"),
        }

        Ok(Self {
            session,
            version,
            advisory,
        })
    }

    pub fn session(&mut self) -> &mut Session<C> {
        &mut self.session
    }

    /// Restores the connection's original autocommit value and closes it.
    pub fn close(self) -> Result<()> {
        self.session.release()
    }
}

impl<C: Connection> Dialect for SybaseAseDialect<C> {
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
        Delimiter::go()
    }

    fn current_user(&mut self) -> Result<String> {
        self.session
            .query_string(CURRENT_USER_PURPOSE, queries::CURRENT_USER_QUERY)
    }

    fn supports_ddl_transactions(&self) -> bool {
        false
    }

    fn supports_changing_current_schema(&self) -> bool {
        true
    }

    fn catalog_is_schema(&self) -> bool {
        false
    }

    fn boolean_true(&self) -> &str {
        BOOLEAN_TRUE
    }

    fn boolean_false(&self) -> &str {
        BOOLEAN_FALSE
    }

    // Adaptive Server identifiers are emitted as written.
    fn quote_identifier(&self, identifier: &str) -> String {
        identifier.to_string()
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
            Arc::new(AseScriptParser),
            self.default_delimiter(),
            mixed,
        )
    }
}
