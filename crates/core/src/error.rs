use std::error::Error as StdError;

use thiserror::Error;

use crate::Version;

pub type BoxError = Box<dyn StdError + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Incompatible(#[from] IncompatibleVersion),
    #[error(transparent)]
    Execute(#[from] ExecutionError),
    #[error(transparent)]
    Release(#[from] ReleaseError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// The live server is older than the lowest version the adapter is known to be
/// correct for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{product} {version} is outdated and no longer supported by shiftql; upgrade to {minimum} or later"
)]
pub struct IncompatibleVersion {
    pub product: String,
    pub version: Version,
    pub minimum: Version,
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("{backend}: {purpose} failed (sql={sql:?}): {source}")]
    QueryFailed {
        backend: String,
        purpose: &'static str,
        sql: String,
        #[source]
        source: BoxError,
    },
    #[error("{backend}: connecting to {target} failed: {source}")]
    ConnectFailed {
        backend: String,
        target: String,
        #[source]
        source: BoxError,
    },
}

impl ExecutionError {
    #[must_use]
    pub fn query_failed<E>(
        backend: impl Into<String>,
        purpose: &'static str,
        sql: impl Into<String>,
        source: E,
    ) -> Self
    where
        E: Into<BoxError>,
    {
        Self::QueryFailed {
            backend: backend.into(),
            purpose,
            sql: sql.into(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn connect_failed<E>(backend: impl Into<String>, target: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::ConnectFailed {
            backend: backend.into(),
            target: target.into(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &str {
        match self {
            Self::QueryFailed { backend, .. } | Self::ConnectFailed { backend, .. } => backend,
        }
    }
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("{backend}: restoring autocommit={autocommit} on release failed: {source}")]
    RestoreAutocommit {
        backend: String,
        autocommit: bool,
        #[source]
        source: BoxError,
    },
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("unable to read script resource `{location}`: {source}")]
    Read {
        location: String,
        #[source]
        source: BoxError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error(
        "script `{location}` mixes transactional and non-transactional statements \
         (first non-transactional statement at line {line}); enable mixed mode to allow this"
    )]
    MixedStatements { location: String, line: usize },
}
