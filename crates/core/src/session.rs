use std::io;

use tracing::{debug, warn};

use crate::{
    Connection, DriverVariant, Error, ExecutionError, ReleaseError, Result, Version,
};

const READ_AUTOCOMMIT_PURPOSE: &str = "read autocommit";
const WRITE_AUTOCOMMIT_PURPOSE: &str = "change autocommit";
const SERVER_VERSION_PURPOSE: &str = "read server version";
const AUTOCOMMIT_PSEUDO_SQL: &str = "<autocommit>";
const SERVER_VERSION_PSEUDO_SQL: &str = "<server version>";

/// Exclusive owner of one live connection for one adapter.
///
/// The autocommit value seen at acquisition is restored on release, and on
/// drop when the session was never released explicitly. Drop skips the
/// restore while nothing could have changed session state: only reads went
/// through the session and the raw connection was never handed out.
pub struct Session<C: Connection> {
    backend: &'static str,
    driver: DriverVariant,
    original_autocommit: bool,
    touched: bool,
    released: bool,
    connection: C,
}

/// Value produced inside [`Session::scoped`], plus the release failure that
/// was degraded to a warning because the operation itself succeeded.
#[derive(Debug)]
pub struct Released<T> {
    pub value: T,
    pub release_warning: Option<Error>,
}

impl<C: Connection> Session<C> {
    pub fn acquire(backend: &'static str, mut connection: C, driver: DriverVariant) -> Result<Self> {
        let original_autocommit = connection.autocommit().map_err(|source| {
            ExecutionError::query_failed(
                backend,
                READ_AUTOCOMMIT_PURPOSE,
                AUTOCOMMIT_PSEUDO_SQL,
                source,
            )
        })?;
        debug!(
            backend,
            driver = driver.as_str(),
            original_autocommit,
            "acquired session"
        );

        Ok(Self {
            backend,
            driver,
            original_autocommit,
            touched: false,
            released: false,
            connection,
        })
    }

    #[must_use]
    pub const fn backend(&self) -> &'static str {
        self.backend
    }

    #[must_use]
    pub const fn driver(&self) -> DriverVariant {
        self.driver
    }

    #[must_use]
    pub const fn original_autocommit(&self) -> bool {
        self.original_autocommit
    }

    /// Whether anything that may change session state went through this
    /// session since acquisition.
    #[must_use]
    pub const fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn connection(&mut self) -> &mut C {
        self.touched = true;
        &mut self.connection
    }

    pub fn query_optional(&mut self, purpose: &'static str, sql: &str) -> Result<Option<String>> {
        self.connection
            .query_string(sql)
            .map_err(|source| ExecutionError::query_failed(self.backend, purpose, sql, source).into())
    }

    pub fn query_string(&mut self, purpose: &'static str, sql: &str) -> Result<String> {
        self.query_optional(purpose, sql)?.ok_or_else(|| {
            ExecutionError::query_failed(
                self.backend,
                purpose,
                sql,
                io::Error::other("query returned no rows"),
            )
            .into()
        })
    }

    pub fn execute(&mut self, purpose: &'static str, sql: &str) -> Result<()> {
        self.touched = true;
        self.connection
            .execute(sql)
            .map_err(|source| ExecutionError::query_failed(self.backend, purpose, sql, source).into())
    }

    pub fn set_autocommit(&mut self, enabled: bool) -> Result<()> {
        self.touched = true;
        self.connection.set_autocommit(enabled).map_err(|source| {
            ExecutionError::query_failed(
                self.backend,
                WRITE_AUTOCOMMIT_PURPOSE,
                AUTOCOMMIT_PSEUDO_SQL,
                source,
            )
            .into()
        })
    }

    pub fn server_version(&mut self) -> Result<Version> {
        self.connection.server_version().map_err(|source| {
            ExecutionError::query_failed(
                self.backend,
                SERVER_VERSION_PURPOSE,
                SERVER_VERSION_PSEUDO_SQL,
                source,
            )
            .into()
        })
    }

    /// Restores the captured autocommit value and closes the connection.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.restore_original_state().map_err(Error::from)
    }

    /// Runs `operation` and releases the session on every exit path.
    ///
    /// An operation error wins over a release error, which is then only
    /// logged. A release error after a successful operation is returned as
    /// [`Released::release_warning`].
    pub fn scoped<T, F>(mut self, operation: F) -> Result<Released<T>>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let outcome = operation(&mut self);
        let backend = self.backend;
        let release = self.release();

        match (outcome, release) {
            (Ok(value), Ok(())) => Ok(Released {
                value,
                release_warning: None,
            }),
            (Ok(value), Err(error)) => {
                warn!(backend, %error, "session release failed after a successful operation");
                Ok(Released {
                    value,
                    release_warning: Some(error),
                })
            }
            (Err(error), Ok(())) => Err(error),
            (Err(error), Err(release_error)) => {
                warn!(backend, error = %release_error, "session release failed after an operation error");
                Err(error)
            }
        }
    }

    fn restore_original_state(&mut self) -> std::result::Result<(), ReleaseError> {
        let autocommit = self.original_autocommit;
        self.connection
            .set_autocommit(autocommit)
            .map_err(|source| ReleaseError::RestoreAutocommit {
                backend: self.backend.to_string(),
                autocommit,
                source,
            })?;
        debug!(backend = self.backend, autocommit, "restored session state");
        Ok(())
    }
}

impl<C: Connection> Drop for Session<C> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if !self.touched {
            debug!(backend = self.backend, "session dropped untouched; nothing to restore");
            return;
        }

        if let Err(error) = self.restore_original_state() {
            warn!(backend = self.backend, %error, "session dropped without a clean release");
        }
    }
}
