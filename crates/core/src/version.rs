use std::{fmt, str::FromStr};

use thiserror::Error;

/// Server version as reported by the live connection.
///
/// Ordering is lexicographic: major first, then minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
}

impl Version {
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse server version string: `{raw}`")]
pub struct ParseVersionError {
    raw: String,
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVersionError {
            raw: raw.to_string(),
        };

        let mut parts = raw.split_whitespace().next().ok_or_else(invalid)?.split('.');
        let major = parts
            .next()
            .and_then(parse_u16_component)
            .ok_or_else(invalid)?;
        let minor = parts.next().and_then(parse_u16_component).unwrap_or(0);

        Ok(Self { major, minor })
    }
}

fn parse_u16_component(raw: &str) -> Option<u16> {
    let digits = raw
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect::<String>();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u16>().ok()
}
