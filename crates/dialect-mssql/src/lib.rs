mod connection;
mod dialect;
mod queries;
mod script;

use shiftql_core::{ConnectionConfig, DriverVariant, Result};

pub use connection::{TdsConnection, parse_server_version, trusts_server_certificate};
pub use dialect::{MssqlDialect, SUPPORTED_VERSIONS};
pub use script::MssqlScriptParser;

/// Backend identifier used in logs and error messages.
pub const NAME: &str = "sqlserver";

/// Connects over TDS and opens the adapter.
///
/// The TDS client is an open-source implementation, so the adapter reports
/// [`DriverVariant::OpenSource`].
pub fn connect(config: &ConnectionConfig) -> Result<MssqlDialect<TdsConnection>> {
    let connection = connection::connect_live(config)?;
    MssqlDialect::open(connection, DriverVariant::OpenSource)
}
