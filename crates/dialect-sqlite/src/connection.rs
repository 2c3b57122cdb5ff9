use std::io;

use rusqlite::types::ValueRef;
use shiftql_core::{ConnectionConfig, DriverResult, ExecutionError, Result, Version};
use tracing::debug;

use crate::NAME;

const BEGIN_SQL: &str = "BEGIN";
const COMMIT_SQL: &str = "COMMIT";
const SERVER_VERSION_QUERY: &str = "select sqlite_version()";
const IN_MEMORY_DATABASE: &str = ":memory:";

/// SQLite database handle.
///
/// SQLite has no autocommit switch; disabling autocommit opens a transaction
/// and enabling it commits whatever is pending.
pub struct SqliteConnection {
    connection: rusqlite::Connection,
}

impl SqliteConnection {
    #[must_use]
    pub fn new(connection: rusqlite::Connection) -> Self {
        Self { connection }
    }

    pub fn open_in_memory() -> std::result::Result<Self, rusqlite::Error> {
        rusqlite::Connection::open_in_memory().map(Self::new)
    }

    #[must_use]
    pub fn inner(&self) -> &rusqlite::Connection {
        &self.connection
    }
}

impl shiftql_core::Connection for SqliteConnection {
    fn query_string(&mut self, sql: &str) -> DriverResult<Option<String>> {
        let mut statement = self.connection.prepare(sql)?;
        let mut rows = statement.query([])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        Ok(match row.get_ref(0)? {
            ValueRef::Null => None,
            ValueRef::Integer(value) => Some(value.to_string()),
            ValueRef::Real(value) => Some(value.to_string()),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Some(String::from_utf8_lossy(bytes).into_owned())
            }
        })
    }

    fn execute(&mut self, sql: &str) -> DriverResult<()> {
        self.connection.execute_batch(sql)?;
        Ok(())
    }

    fn autocommit(&mut self) -> DriverResult<bool> {
        Ok(self.connection.is_autocommit())
    }

    fn set_autocommit(&mut self, enabled: bool) -> DriverResult<()> {
        match (enabled, self.connection.is_autocommit()) {
            (false, true) => self.connection.execute_batch(BEGIN_SQL)?,
            (true, false) => self.connection.execute_batch(COMMIT_SQL)?,
            _ => {}
        }
        Ok(())
    }

    fn server_version(&mut self) -> DriverResult<Version> {
        let raw = self
            .query_string(SERVER_VERSION_QUERY)?
            .ok_or_else(|| io::Error::other("sqlite_version() returned no rows"))?;
        Ok(raw.parse::<Version>()?)
    }
}

pub(crate) fn connect_live(config: &ConnectionConfig) -> Result<SqliteConnection> {
    let path = if config.database.is_empty() {
        IN_MEMORY_DATABASE
    } else {
        config.database.as_str()
    };
    debug!(backend = NAME, path, "opening database");

    rusqlite::Connection::open(path)
        .map(SqliteConnection::new)
        .map_err(|source| ExecutionError::connect_failed(NAME, path, source).into())
}
