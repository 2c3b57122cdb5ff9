mod connection;
mod dialect;
mod script;

use shiftql_core::{ConnectionConfig, DriverVariant, Result};

pub use connection::SqliteConnection;
pub use dialect::{SUPPORTED_VERSIONS, SqliteDialect};
pub use script::SqliteScriptParser;

/// Backend identifier used in logs and error messages.
pub const NAME: &str = "sqlite";

/// Opens the database file named by `config.database`, or an in-memory
/// database when it is empty.
pub fn connect(config: &ConnectionConfig) -> Result<SqliteDialect<SqliteConnection>> {
    let connection = connection::connect_live(config)?;
    SqliteDialect::open(connection, DriverVariant::Vendor)
}
