use shiftql_core::{ScriptParser, leading_keywords};

/// Batch parser for Adaptive Server scripts.
///
/// Database-level maintenance cannot run inside a user transaction on ASE.
#[derive(Debug, Default, Clone, Copy)]
pub struct AseScriptParser;

impl ScriptParser for AseScriptParser {
    fn is_transactional(&self, sql: &str) -> bool {
        let keywords = leading_keywords(sql, 3);
        let words = keywords.iter().map(String::as_str).collect::<Vec<_>>();

        !matches!(
            words.as_slice(),
            ["CREATE" | "ALTER" | "DROP", "DATABASE", ..]
                | ["DUMP" | "LOAD", "DATABASE" | "TRANSACTION" | "TRAN", ..]
                | ["DISK" | "RECONFIGURE", ..]
                | ["SP_DBOPTION" | "SP_CONFIGURE", ..]
                | ["EXEC" | "EXECUTE", "SP_DBOPTION" | "SP_CONFIGURE", ..]
        )
    }
}
