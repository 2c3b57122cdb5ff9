use shiftql_core::{
    Delimiter, ScriptParser, SqlStatement, leading_keywords, split_statements, strip_literals,
};

/// Statement parser that keeps `CREATE TRIGGER ... BEGIN ... END` bodies in
/// one statement.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteScriptParser;

impl ScriptParser for SqliteScriptParser {
    fn parse(&self, text: &str, delimiter: &Delimiter) -> Vec<SqlStatement> {
        let statements = split_statements(text, delimiter);
        self.classify(merge_trigger_bodies(statements, delimiter.token()))
    }

    fn is_transactional(&self, sql: &str) -> bool {
        let keywords = leading_keywords(sql, 2);
        match keywords.as_slice() {
            [first, ..] if first == "VACUUM" => false,
            [first, second, ..] if first == "PRAGMA" => !second.starts_with("FOREIGN_KEYS"),
            _ => true,
        }
    }
}

fn merge_trigger_bodies(statements: Vec<SqlStatement>, token: &str) -> Vec<SqlStatement> {
    let mut merged = Vec::with_capacity(statements.len());
    let mut trigger: Option<(SqlStatement, i32)> = None;

    for statement in statements {
        let (mut open, depth) = match trigger.take() {
            Some((mut open, depth)) => {
                open.sql = format!("{}{token}\n{}", open.sql, statement.sql);
                let depth = depth + block_depth(&statement.sql);
                (open, depth)
            }
            None if is_create_trigger(&statement.sql) => {
                let depth = block_depth(&statement.sql);
                (statement, depth)
            }
            None => {
                merged.push(statement);
                continue;
            }
        };

        if depth > 0 || !mentions_begin(&open.sql) {
            trigger = Some((open, depth));
        } else {
            open.sql = open.sql.trim().to_string();
            merged.push(open);
        }
    }

    // An unterminated trigger is passed through for the database to reject.
    if let Some((open, _)) = trigger {
        merged.push(open);
    }

    merged
}

fn is_create_trigger(sql: &str) -> bool {
    match leading_keywords(sql, 3).as_slice() {
        [create, trigger, ..] if create == "CREATE" && trigger == "TRIGGER" => true,
        [create, temp, trigger] => {
            create == "CREATE" && (temp == "TEMP" || temp == "TEMPORARY") && trigger == "TRIGGER"
        }
        _ => false,
    }
}

// BEGIN and CASE open a block that END closes.
fn block_depth(sql: &str) -> i32 {
    words(sql)
        .iter()
        .map(|word| match word.as_str() {
            "BEGIN" | "CASE" => 1,
            "END" => -1,
            _ => 0,
        })
        .sum()
}

fn mentions_begin(sql: &str) -> bool {
    words(sql).iter().any(|word| word == "BEGIN")
}

// Keywords inside literals such as `'END'` do not count.
fn words(sql: &str) -> Vec<String> {
    strip_literals(sql)
        .split(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}
