use super::SqlStatement;
use crate::Delimiter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    SingleQuoted,
    DoubleQuoted,
    Bracketed,
    LineComment,
    BlockComment,
}

impl ScanState {
    /// State after `ch`, and whether `next` belongs to the same marker
    /// (`--`, `/*`, `*/`, `]]`) and must be consumed with it.
    fn advance(self, ch: char, next: Option<char>) -> (Self, bool) {
        match (self, ch, next) {
            (Self::Code, '\'', _) => (Self::SingleQuoted, false),
            (Self::Code, '"', _) => (Self::DoubleQuoted, false),
            (Self::Code, '[', _) => (Self::Bracketed, false),
            (Self::Code, '-', Some('-')) => (Self::LineComment, true),
            (Self::Code, '/', Some('*')) => (Self::BlockComment, true),
            (Self::SingleQuoted, '\'', _) | (Self::DoubleQuoted, '"', _) => (Self::Code, false),
            (Self::Bracketed, ']', Some(']')) => (Self::Bracketed, true),
            (Self::Bracketed, ']', _) => (Self::Code, false),
            (Self::LineComment, '\n', _) => (Self::Code, false),
            (Self::BlockComment, '*', Some('/')) => (Self::Code, true),
            (state, _, _) => (state, false),
        }
    }

    fn is_quoted(self) -> bool {
        matches!(self, Self::SingleQuoted | Self::DoubleQuoted | Self::Bracketed)
    }

    fn is_comment(self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }
}

/// Splits raw script text into statements according to `delimiter`.
///
/// Statements come back without their delimiter, trimmed, and marked
/// transactional; classification is left to the dialect parser.
#[must_use]
pub fn split_statements(text: &str, delimiter: &Delimiter) -> Vec<SqlStatement> {
    if delimiter.alone_on_line() {
        split_batches(text, delimiter)
    } else {
        split_inline(text, delimiter)
    }
}

// The scan state is carried across lines: a delimiter line only counts when
// it starts outside quoted text and comments.
fn split_batches(text: &str, delimiter: &Delimiter) -> Vec<SqlStatement> {
    let mut statements = Vec::new();
    let mut pending = PendingStatement::default();
    let mut state = ScanState::Code;

    for (index, line) in text.lines().enumerate() {
        if state == ScanState::Code && delimiter.matches_line(line) {
            pending.flush_into(&mut statements);
            continue;
        }

        state = scan_line(state, line);
        if !line.trim().is_empty() {
            pending.mark_start(index + 1);
        }
        pending.push_line(line);
    }

    pending.flush_into(&mut statements);
    statements
}

fn scan_line(mut state: ScanState, line: &str) -> ScanState {
    let mut chars = line.chars().chain(std::iter::once('\n')).peekable();

    while let Some(ch) = chars.next() {
        let (after, paired) = state.advance(ch, chars.peek().copied());
        if paired {
            chars.next();
        }
        state = after;
    }

    state
}

fn split_inline(text: &str, delimiter: &Delimiter) -> Vec<SqlStatement> {
    let token = delimiter.token();
    let mut statements = Vec::new();
    let mut pending = PendingStatement::default();
    let mut state = ScanState::Code;
    let mut line = 1;
    let mut chars = text.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if state == ScanState::Code && starts_with_token(text, offset, token) {
            for _ in 1..token.chars().count() {
                chars.next();
            }
            pending.flush_into(&mut statements);
            continue;
        }

        let (after, paired) = state.advance(ch, chars.peek().map(|(_, next)| *next));
        state = after;

        if !ch.is_whitespace() {
            pending.mark_start(line);
        }
        pending.push_char(ch);
        if ch == '\n' {
            line += 1;
        }
        if paired && let Some((_, marker)) = chars.next() {
            pending.push_char(marker);
        }
    }

    pending.flush_into(&mut statements);
    statements
}

fn starts_with_token(text: &str, offset: usize, token: &str) -> bool {
    !token.is_empty()
        && text
            .get(offset..offset + token.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(token))
}

/// Removes `--` and `/* */` comments outside of quoted text.
#[must_use]
pub fn strip_comments(sql: &str) -> String {
    scrub(sql, true)
}

/// Removes comments and replaces every quoted literal or identifier with a
/// single space, leaving only the SQL words themselves.
#[must_use]
pub fn strip_literals(sql: &str) -> String {
    scrub(sql, false)
}

fn scrub(sql: &str, keep_quoted: bool) -> String {
    let mut scrubbed = String::with_capacity(sql.len());
    let mut state = ScanState::Code;
    let mut chars = sql.chars().peekable();

    while let Some(ch) = chars.next() {
        let before = state;
        let (after, paired) = state.advance(ch, chars.peek().copied());
        let marker = if paired { chars.next() } else { None };
        state = after;

        match (before, after) {
            (ScanState::LineComment, ScanState::Code) => scrubbed.push('\n'),
            (ScanState::BlockComment, ScanState::Code) => scrubbed.push(' '),
            _ if before.is_comment() || after.is_comment() => {}
            (ScanState::Code, ScanState::Code) => scrubbed.push(ch),
            _ if keep_quoted => {
                scrubbed.push(ch);
                scrubbed.extend(marker);
            }
            (ScanState::Code, quoted) if quoted.is_quoted() => scrubbed.push(' '),
            _ => {}
        }
    }

    scrubbed
}

/// First `count` words of `sql` in upper case, comments ignored.
#[must_use]
pub fn leading_keywords(sql: &str, count: usize) -> Vec<String> {
    strip_comments(sql)
        .split(|ch: char| ch.is_whitespace() || ch == '(' || ch == ';')
        .filter(|word| !word.is_empty())
        .take(count)
        .map(str::to_ascii_uppercase)
        .collect()
}

#[derive(Debug, Default)]
struct PendingStatement {
    line: Option<usize>,
    sql: String,
}

impl PendingStatement {
    fn mark_start(&mut self, line: usize) {
        if self.line.is_none() {
            self.line = Some(line);
        }
    }

    fn push_line(&mut self, line: &str) {
        if self.line.is_some() {
            self.sql.push_str(line);
            self.sql.push('\n');
        }
    }

    fn push_char(&mut self, ch: char) {
        if self.line.is_some() {
            self.sql.push(ch);
        }
    }

    fn flush_into(&mut self, statements: &mut Vec<SqlStatement>) {
        let pending = std::mem::take(self);
        let Some(line) = pending.line else {
            return;
        };

        let sql = pending.sql.trim();
        if strip_comments(sql).trim().is_empty() {
            return;
        }

        statements.push(SqlStatement {
            line,
            sql: sql.to_string(),
            transactional: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{leading_keywords, split_statements, strip_comments, strip_literals};
    use crate::Delimiter;

    fn sqls(text: &str, delimiter: &Delimiter) -> Vec<String> {
        split_statements(text, delimiter)
            .into_iter()
            .map(|statement| statement.sql)
            .collect()
    }

    #[test]
    fn go_batches_only_end_on_their_own_line() {
        let text = "CREATE TABLE t (id INT)\nGO\nSELECT 'GO' AS go_col\n  go  \n";

        assert_eq!(
            sqls(text, &Delimiter::go()),
            vec![
                "CREATE TABLE t (id INT)".to_string(),
                "SELECT 'GO' AS go_col".to_string(),
            ],
        );
    }

    #[test]
    fn go_inside_block_comment_does_not_split() {
        let text = "/*\nGO\n*/\nSELECT 1\nGO\n";

        assert_eq!(sqls(text, &Delimiter::go()), vec!["/*\nGO\n*/\nSELECT 1".to_string()]);
    }

    #[test]
    fn comment_only_batches_are_dropped_and_lines_are_tracked() {
        let text = "-- header\nGO\n\n\nSELECT 1\nGO\n";
        let statements = split_statements(text, &Delimiter::go());

        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].line, 5);
    }

    #[test]
    fn semicolons_in_quotes_and_comments_do_not_split() {
        let text = "INSERT INTO t VALUES ('a;b'); -- trailing; comment\nSELECT \"x;y\" /* ; */ FROM t;";

        assert_eq!(
            sqls(text, &Delimiter::semicolon()),
            vec![
                "INSERT INTO t VALUES ('a;b')".to_string(),
                "-- trailing; comment\nSELECT \"x;y\" /* ; */ FROM t".to_string(),
            ],
        );
    }

    #[test]
    fn inline_statements_record_their_start_line() {
        let text = "SELECT 1;\n\nSELECT 2;";
        let statements = split_statements(text, &Delimiter::semicolon());

        assert_eq!(statements[0].line, 1);
        assert_eq!(statements[1].line, 3);
    }

    #[test]
    fn strips_comments_but_keeps_quoted_text() {
        assert_eq!(
            strip_comments("SELECT '--x' /* c */ -- tail\nFROM t").trim(),
            "SELECT '--x'   \nFROM t",
        );
        assert_eq!(
            leading_keywords("/* c */ create   database foo", 2),
            vec!["CREATE".to_string(), "DATABASE".to_string()],
        );
    }

    #[test]
    fn quoted_comment_opener_does_not_hide_later_batches() {
        let text = "SELECT \"/*\" AS x\nGO\nSELECT [a/*b] FROM t\nGO\nSELECT 2\nGO\n";

        assert_eq!(
            sqls(text, &Delimiter::go()),
            vec![
                "SELECT \"/*\" AS x".to_string(),
                "SELECT [a/*b] FROM t".to_string(),
                "SELECT 2".to_string(),
            ],
        );
    }

    #[test]
    fn go_line_inside_string_literal_does_not_split() {
        let text = "INSERT INTO t VALUES ('a\nGO\nb')\nGO\nSELECT 1\nGO\n";
        let statements = split_statements(text, &Delimiter::go());

        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].sql, "INSERT INTO t VALUES ('a\nGO\nb')");
        assert_eq!(statements[1].sql, "SELECT 1");
        assert_eq!(statements[1].line, 5);
    }

    #[test]
    fn doubled_bracket_stays_inside_identifier() {
        assert_eq!(
            sqls("SELECT [a]];b] FROM t; SELECT 2;", &Delimiter::semicolon()),
            vec!["SELECT [a]];b] FROM t".to_string(), "SELECT 2".to_string()],
        );
    }

    #[test]
    fn strip_literals_blanks_quoted_text() {
        assert_eq!(
            strip_literals("INSERT INTO log VALUES ('END', \"CASE\") -- END\n/* BEGIN */"),
            "INSERT INTO log VALUES ( ,  ) \n ",
        );
    }
}
