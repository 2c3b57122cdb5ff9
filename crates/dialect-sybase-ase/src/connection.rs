use std::{io, sync::OnceLock};

use odbc_api::{ConnectionOptions, Cursor, Environment};
use shiftql_core::{
    ConnectionConfig, Connection, DriverResult, DriverVariant, ExecutionError, Result, Version,
};
use tracing::debug;

use crate::{NAME, queries};

const DEFAULT_SYBASE_HOST: &str = "127.0.0.1";
const DEFAULT_SYBASE_PORT: u16 = 5000;
const DEFAULT_ODBC_DRIVER: &str = "Adaptive Server Enterprise";
const FREETDS_TDS_VERSION: &str = "5.0";
const DRIVER_OVERRIDE_KEY: &str = "sybasease.driver";
const DSN_OVERRIDE_KEY: &str = "sybasease.dsn";

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

/// Live Adaptive Server connection through an ODBC driver manager.
pub struct OdbcConnection {
    connection: odbc_api::Connection<'static>,
    autocommit: bool,
}

impl OdbcConnection {
    /// Opens a connection from a raw ODBC connection string.
    ///
    /// ODBC connections start in autocommit mode, and the tracked value
    /// assumes so: the driver manager exposes no way to read the mode back.
    /// A DSN that disables autocommit would break that assumption, so the
    /// mode is set explicitly before the connection is handed out and the
    /// session always captures `true` as the original value.
    pub fn open(connection_string: &str) -> std::result::Result<Self, odbc_api::Error> {
        let connection = environment()?
            .connect_with_connection_string(connection_string, ConnectionOptions::default())?;
        connection.set_autocommit(true)?;

        Ok(Self {
            connection,
            autocommit: true,
        })
    }
}

impl Connection for OdbcConnection {
    fn query_string(&mut self, sql: &str) -> DriverResult<Option<String>> {
        let Some(mut cursor) = self.connection.execute(sql, ())? else {
            return Ok(None);
        };
        let Some(mut row) = cursor.next_row()? else {
            return Ok(None);
        };

        let mut buffer = Vec::new();
        if !row.get_text(1, &mut buffer)? {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buffer).trim().to_string()))
    }

    fn execute(&mut self, sql: &str) -> DriverResult<()> {
        self.connection.execute(sql, ())?;
        Ok(())
    }

    fn autocommit(&mut self) -> DriverResult<bool> {
        Ok(self.autocommit)
    }

    fn set_autocommit(&mut self, enabled: bool) -> DriverResult<()> {
        self.connection.set_autocommit(enabled)?;
        self.autocommit = enabled;
        Ok(())
    }

    fn server_version(&mut self) -> DriverResult<Version> {
        let raw = self
            .query_string(queries::SERVER_VERSION_QUERY)?
            .ok_or_else(|| io::Error::other("@@version returned no rows"))?;
        parse_server_version(&raw).map_err(Into::into)
    }
}

fn environment() -> std::result::Result<&'static Environment, odbc_api::Error> {
    if let Some(environment) = ENVIRONMENT.get() {
        return Ok(environment);
    }

    let environment = Environment::new()?;
    Ok(ENVIRONMENT.get_or_init(|| environment))
}

/// Extracts `major.minor` from an `@@version` banner.
pub fn parse_server_version(raw: &str) -> std::result::Result<Version, io::Error> {
    let banner = raw.trim();
    let version_part = banner
        .strip_prefix(queries::SERVER_VERSION_PREFIX)
        .unwrap_or(banner);

    version_part
        .split('/')
        .next()
        .unwrap_or_default()
        .parse::<Version>()
        .map_err(io::Error::other)
}

/// Client driver family implied by the configured ODBC driver name.
#[must_use]
pub fn driver_variant(config: &ConnectionConfig) -> DriverVariant {
    let driver = config
        .extra_value(DRIVER_OVERRIDE_KEY)
        .unwrap_or(DEFAULT_ODBC_DRIVER);

    if driver.to_ascii_lowercase().contains("freetds") {
        DriverVariant::OpenSource
    } else {
        DriverVariant::Vendor
    }
}

/// Builds the ODBC connection string for `config`.
///
/// FreeTDS must be told to speak TDS 5.0, the protocol level Adaptive Server
/// uses; the vendor driver negotiates it on its own.
#[must_use]
pub fn connection_string(config: &ConnectionConfig, driver: DriverVariant) -> String {
    let mut attributes = Vec::new();

    if let Some(dsn) = config.extra_value(DSN_OVERRIDE_KEY) {
        attributes.push(("DSN", dsn.to_string()));
    } else {
        let driver_name = config
            .extra_value(DRIVER_OVERRIDE_KEY)
            .unwrap_or(DEFAULT_ODBC_DRIVER);
        attributes.push(("Driver", format!("{{{driver_name}}}")));
        attributes.push((
            "Server",
            config
                .host
                .clone()
                .unwrap_or_else(|| DEFAULT_SYBASE_HOST.to_string()),
        ));
        attributes.push((
            "Port",
            config.port.unwrap_or(DEFAULT_SYBASE_PORT).to_string(),
        ));
    }

    if !config.database.is_empty() {
        attributes.push(("Database", config.database.clone()));
    }
    if let Some(user) = &config.user {
        attributes.push(("UID", user.clone()));
    }
    if let Some(password) = &config.password {
        attributes.push(("PWD", password.clone()));
    }
    if driver == DriverVariant::OpenSource {
        attributes.push(("TDS_Version", FREETDS_TDS_VERSION.to_string()));
    }

    attributes
        .into_iter()
        .map(|(key, value)| format!("{key}={}", escape_attribute_value(key, &value)))
        .collect::<Vec<_>>()
        .join(";")
}

fn escape_attribute_value(key: &str, value: &str) -> String {
    let already_braced = key == "Driver" && value.starts_with('{') && value.ends_with('}');
    if already_braced || !value.contains([';', '{', '}']) {
        return value.to_string();
    }

    format!("{{{}}}", value.replace('}', "}}"))
}

pub(crate) fn connect_live(config: &ConnectionConfig, driver: DriverVariant) -> Result<OdbcConnection> {
    let target = config.target(DEFAULT_SYBASE_HOST, DEFAULT_SYBASE_PORT);
    debug!(backend = NAME, %target, driver = driver.as_str(), "connecting via odbc");

    OdbcConnection::open(&connection_string(config, driver))
        .map_err(|source| ExecutionError::connect_failed(NAME, target, source).into())
}
