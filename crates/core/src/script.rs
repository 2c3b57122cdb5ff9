mod split;

use std::{fmt, sync::Arc};

pub use split::{leading_keywords, split_statements, strip_comments, strip_literals};

use crate::{Delimiter, LoadableResource, PlaceholderReplacer, Result, ScriptError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    /// 1-based line of the resource where the statement starts.
    pub line: usize,
    pub sql: String,
    pub transactional: bool,
}

/// Dialect-specific splitting and classification of raw script text.
pub trait ScriptParser: fmt::Debug + Send + Sync {
    fn parse(&self, text: &str, delimiter: &Delimiter) -> Vec<SqlStatement> {
        self.classify(split_statements(text, delimiter))
    }

    fn classify(&self, statements: Vec<SqlStatement>) -> Vec<SqlStatement> {
        statements
            .into_iter()
            .map(|statement| SqlStatement {
                transactional: self.is_transactional(&statement.sql),
                ..statement
            })
            .collect()
    }

    fn is_transactional(&self, _sql: &str) -> bool {
        true
    }
}

/// Parser that treats every statement as transactional.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultScriptParser;

impl ScriptParser for DefaultScriptParser {}

/// Executable script bound to one dialect's delimiter and parsing rules.
#[derive(Debug, Clone)]
pub struct SqlScript {
    resource: Arc<dyn LoadableResource>,
    placeholder_replacer: Arc<dyn PlaceholderReplacer>,
    parser: Arc<dyn ScriptParser>,
    delimiter: Delimiter,
    mixed: bool,
}

impl SqlScript {
    #[must_use]
    pub fn new(
        resource: Arc<dyn LoadableResource>,
        placeholder_replacer: Arc<dyn PlaceholderReplacer>,
        parser: Arc<dyn ScriptParser>,
        delimiter: Delimiter,
        mixed: bool,
    ) -> Self {
        Self {
            resource,
            placeholder_replacer,
            parser,
            delimiter,
            mixed,
        }
    }

    #[must_use]
    pub fn location(&self) -> &str {
        self.resource.location()
    }

    #[must_use]
    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    #[must_use]
    pub const fn is_mixed(&self) -> bool {
        self.mixed
    }

    /// Same script with a script-level delimiter override.
    #[must_use]
    pub fn with_delimiter(&self, delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            ..self.clone()
        }
    }

    pub fn statements(&self) -> Result<Vec<SqlStatement>> {
        let raw = self.resource.read()?;
        let text = self.placeholder_replacer.replace(&raw);
        let statements = self.parser.parse(&text, &self.delimiter);

        if !self.mixed {
            self.ensure_not_mixed(&statements)?;
        }

        Ok(statements)
    }

    pub fn executes_in_transaction(&self) -> Result<bool> {
        Ok(self
            .statements()?
            .iter()
            .all(|statement| statement.transactional))
    }

    fn ensure_not_mixed(&self, statements: &[SqlStatement]) -> Result<()> {
        let has_transactional = statements.iter().any(|statement| statement.transactional);
        let first_non_transactional = statements.iter().find(|statement| !statement.transactional);

        match first_non_transactional {
            Some(statement) if has_transactional => Err(ScriptError::MixedStatements {
                location: self.location().to_string(),
                line: statement.line,
            }
            .into()),
            _ => Ok(()),
        }
    }
}
