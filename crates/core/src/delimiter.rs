use std::fmt;

/// Statement terminator of a dialect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Delimiter {
    token: String,
    alone_on_line: bool,
}

impl Delimiter {
    #[must_use]
    pub fn new(token: impl Into<String>, alone_on_line: bool) -> Self {
        Self {
            token: token.into(),
            alone_on_line,
        }
    }

    #[must_use]
    pub fn semicolon() -> Self {
        Self::new(";", false)
    }

    #[must_use]
    pub fn go() -> Self {
        Self::new("GO", true)
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether the token only terminates a statement when it is the sole
    /// content of a line.
    #[must_use]
    pub const fn alone_on_line(&self) -> bool {
        self.alone_on_line
    }

    pub(crate) fn matches_line(&self, line: &str) -> bool {
        line.trim().eq_ignore_ascii_case(&self.token)
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)?;
        if self.alone_on_line {
            f.write_str(" (alone on line)")?;
        }
        Ok(())
    }
}
