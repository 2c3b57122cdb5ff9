use crate::{BoxError, Version};

pub type DriverResult<T> = std::result::Result<T, BoxError>;

/// Blocking handle to one live database connection.
///
/// Implemented by each driver binding; adapters never talk to a driver
/// directly, they go through a [`Session`](crate::Session).
pub trait Connection {
    /// Runs `sql` and returns the first column of the first row, if any.
    fn query_string(&mut self, sql: &str) -> DriverResult<Option<String>>;

    fn execute(&mut self, sql: &str) -> DriverResult<()>;

    fn autocommit(&mut self) -> DriverResult<bool>;

    fn set_autocommit(&mut self, enabled: bool) -> DriverResult<()>;

    fn server_version(&mut self) -> DriverResult<Version>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn query_string(&mut self, sql: &str) -> DriverResult<Option<String>> {
        (**self).query_string(sql)
    }

    fn execute(&mut self, sql: &str) -> DriverResult<()> {
        (**self).execute(sql)
    }

    fn autocommit(&mut self) -> DriverResult<bool> {
        (**self).autocommit()
    }

    fn set_autocommit(&mut self, enabled: bool) -> DriverResult<()> {
        (**self).set_autocommit(enabled)
    }

    fn server_version(&mut self) -> DriverResult<Version> {
        (**self).server_version()
    }
}

/// Client driver family used for a backend.
///
/// Only influences how the connection itself is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverVariant {
    #[default]
    Vendor,
    OpenSource,
}

impl DriverVariant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::OpenSource => "open-source",
        }
    }
}
