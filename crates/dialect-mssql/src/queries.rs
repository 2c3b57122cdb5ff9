pub(crate) const CURRENT_USER_QUERY: &str = "SELECT SUSER_SNAME()";
pub(crate) const SERVER_VERSION_QUERY: &str =
    "SELECT CAST(SERVERPROPERTY('ProductVersion') AS nvarchar(128))";

// Bit 2 of @@OPTIONS is IMPLICIT_TRANSACTIONS; autocommit is its absence.
pub(crate) const IMPLICIT_TRANSACTIONS_QUERY: &str = "SELECT CAST(@@OPTIONS & 2 AS nvarchar(8))";
pub(crate) const DISABLE_AUTOCOMMIT_SQL: &str = "SET IMPLICIT_TRANSACTIONS ON";
pub(crate) const ENABLE_AUTOCOMMIT_SQL: &str =
    "IF @@TRANCOUNT > 0 COMMIT TRANSACTION; SET IMPLICIT_TRANSACTIONS OFF";
