use std::{collections::BTreeMap, fmt};

pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "${";
pub const DEFAULT_PLACEHOLDER_SUFFIX: &str = "}";

pub trait PlaceholderReplacer: fmt::Debug + Send + Sync {
    fn replace(&self, text: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPlaceholderReplacer;

impl PlaceholderReplacer for NoopPlaceholderReplacer {
    fn replace(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Replaces `${name}` style placeholders from a fixed map.
///
/// Placeholders without a value are left in the text untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPlaceholderReplacer {
    placeholders: BTreeMap<String, String>,
    prefix: String,
    suffix: String,
}

impl MapPlaceholderReplacer {
    #[must_use]
    pub fn new(placeholders: BTreeMap<String, String>) -> Self {
        Self::with_delimiters(
            placeholders,
            DEFAULT_PLACEHOLDER_PREFIX,
            DEFAULT_PLACEHOLDER_SUFFIX,
        )
    }

    #[must_use]
    pub fn with_delimiters(
        placeholders: BTreeMap<String, String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            placeholders,
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl PlaceholderReplacer for MapPlaceholderReplacer {
    fn replace(&self, text: &str) -> String {
        if self.prefix.is_empty() || self.suffix.is_empty() {
            return text.to_string();
        }

        let mut replaced = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(self.prefix.as_str()) {
            replaced.push_str(&rest[..start]);
            let after_prefix = &rest[start + self.prefix.len()..];

            let Some(end) = after_prefix.find(self.suffix.as_str()) else {
                rest = &rest[start..];
                break;
            };

            let name = &after_prefix[..end];
            match self.placeholders.get(name) {
                Some(value) => replaced.push_str(value),
                None => {
                    replaced.push_str(&self.prefix);
                    replaced.push_str(name);
                    replaced.push_str(&self.suffix);
                }
            }
            rest = &after_prefix[end + self.suffix.len()..];
        }

        replaced.push_str(rest);
        replaced
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{MapPlaceholderReplacer, PlaceholderReplacer};

    fn replacer() -> MapPlaceholderReplacer {
        MapPlaceholderReplacer::new(BTreeMap::from([
            ("schema".to_string(), "dbo".to_string()),
            ("table".to_string(), "users".to_string()),
        ]))
    }

    #[test]
    fn replaces_known_placeholders() {
        assert_eq!(
            replacer().replace("SELECT * FROM ${schema}.${table}"),
            "SELECT * FROM dbo.users",
        );
    }

    #[test]
    fn leaves_unknown_and_unterminated_placeholders_untouched() {
        assert_eq!(
            replacer().replace("${missing} and ${schema} and ${open"),
            "${missing} and dbo and ${open",
        );
    }
}
