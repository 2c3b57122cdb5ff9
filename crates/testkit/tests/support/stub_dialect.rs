use std::sync::Arc;

use shiftql_core::{
    DefaultScriptParser, Delimiter, Dialect, DriverVariant, LoadableResource, PlaceholderReplacer,
    Result, Session, SqlScript, SupportedVersions, UpgradeAdvisory, Version, quote_delimited,
};
use shiftql_testkit::FakeConnection;

const STUB_VERSIONS: SupportedVersions = SupportedVersions::new("Stub")
    .minimum(1, 0)
    .maximum(2, 0);

pub struct StubDialect {
    session: Session<FakeConnection>,
    version: Version,
    advisory: Option<UpgradeAdvisory>,
}

pub fn open(connection: FakeConnection) -> Result<StubDialect> {
    let mut session = Session::acquire("stub", connection, DriverVariant::Vendor)?;
    let version = session.server_version()?;
    let advisory = STUB_VERSIONS.check(version)?;

    Ok(StubDialect {
        session,
        version,
        advisory,
    })
}

impl Dialect for StubDialect {
    fn name(&self) -> &str {
        "stub"
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

    fn current_user(&mut self) -> Result<String> {
        self.session.query_string("current user", "SELECT CURRENT_USER")
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
        "true"
    }

    fn boolean_false(&self) -> &str {
        "false"
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        quote_delimited(identifier, '`', '`')
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
            Arc::new(DefaultScriptParser),
            self.default_delimiter(),
            mixed,
        )
    }
}
