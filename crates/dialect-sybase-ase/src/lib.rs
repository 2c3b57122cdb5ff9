mod connection;
mod dialect;
mod queries;
mod script;

use shiftql_core::{ConnectionConfig, Result};

pub use connection::{OdbcConnection, connection_string, driver_variant, parse_server_version};
pub use dialect::{SUPPORTED_VERSIONS, SybaseAseDialect};
pub use script::AseScriptParser;

/// Backend identifier used in logs and error messages.
pub const NAME: &str = "sybasease";

/// Connects to Adaptive Server through ODBC and opens the adapter.
pub fn connect(config: &ConnectionConfig) -> Result<SybaseAseDialect<OdbcConnection>> {
    let driver = driver_variant(config);
    let connection = connection::connect_live(config, driver)?;
    SybaseAseDialect::open(connection, driver)
}
