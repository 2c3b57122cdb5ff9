use std::sync::Arc;

use shiftql_core::{
    Connection, Delimiter, Dialect, DriverVariant, LoadableResource, PlaceholderReplacer, Result,
    Session, SqlScript, SupportedVersions, UpgradeAdvisory, Version, quote_delimited,
};
use tracing::{debug, warn};

use crate::{NAME, TdsConnection, queries, script::MssqlScriptParser};

const CURRENT_USER_PURPOSE: &str = "read current user";

/// SQL Server 2008 through SQL Server 2019.
pub const SUPPORTED_VERSIONS: SupportedVersions = SupportedVersions::new("SQL Server")
    .minimum(10, 0)
    .maximum(15, 0);

pub struct MssqlDialect<C: Connection = TdsConnection> {
    session: Session<C>,
    version: Version,
    advisory: Option<UpgradeAdvisory>,
}

impl<C: Connection> MssqlDialect<C> {
    pub fn open(connection: C, driver: DriverVariant) -> Result<Self> {
        let mut session = Session::acquire(NAME, connection, driver)?;
        let version = session.server_version()?;
        let advisory = SUPPORTED_VERSIONS.check(version)?;

        if let Some(advisory) = &advisory {
            warn!(backend = NAME, %version, "{advisory}");
        } else {
            debug!(backend = NAME, %version, "server version supported");
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

    pub fn close(self) -> Result<()> {
        self.session.release()
    }
}

impl<C: Connection> Dialect for MssqlDialect<C> {
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
        quote_delimited(identifier, '[', ']')
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
            Arc::new(MssqlScriptParser),
            self.default_delimiter(),
            mixed,
        )
    }
}
