use shiftql_core::{ScriptParser, leading_keywords};

/// T-SQL batch parser for SQL Server.
#[derive(Debug, Default, Clone, Copy)]
pub struct MssqlScriptParser;

impl ScriptParser for MssqlScriptParser {
    fn is_transactional(&self, sql: &str) -> bool {
        let keywords = leading_keywords(sql, 4);
        let words = keywords.iter().map(String::as_str).collect::<Vec<_>>();

        !matches!(
            words.as_slice(),
            ["CREATE" | "ALTER" | "DROP", "DATABASE", ..]
                | ["BACKUP" | "RESTORE" | "RECONFIGURE", ..]
                | ["CREATE" | "ALTER" | "DROP", "FULLTEXT", "CATALOG" | "INDEX", ..]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::MssqlScriptParser;
    use shiftql_core::ScriptParser;

    #[test]
    fn server_level_statements_are_not_transactional() {
        for sql in [
            "CREATE DATABASE Sales",
            "ALTER DATABASE Sales SET READ_COMMITTED_SNAPSHOT ON",
            "BACKUP DATABASE Sales TO DISK = 'C:\\backups\\sales.bak'",
            "RESTORE LOG Sales FROM DISK = 'C:\\backups\\sales.trn'",
            "create fulltext catalog ftCatalog AS DEFAULT",
            "DROP FULLTEXT INDEX ON dbo.Documents",
        ] {
            assert!(!MssqlScriptParser.is_transactional(sql), "{sql}");
        }
    }

    #[test]
    fn schema_changes_stay_transactional() {
        for sql in [
            "CREATE TABLE dbo.Users (Id int)",
            "ALTER TABLE dbo.Users ADD Name nvarchar(50)",
            "CREATE FULLTEXT STOPLIST myStoplist",
        ] {
            assert!(MssqlScriptParser.is_transactional(sql), "{sql}");
        }
    }
}
