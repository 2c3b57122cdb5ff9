use std::sync::Arc;

use crate::{
    Delimiter, DriverVariant, LoadableResource, PlaceholderReplacer, Result, SqlScript,
    UpgradeAdvisory, Version,
};

/// Everything the migration engine may ask of a backend.
///
/// Implementations are built by their adapter crate's `open`/`connect`, which
/// run the version gate before returning, so any value of this trait has
/// already passed it.
pub trait Dialect {
    fn name(&self) -> &str;

    /// Server version captured when the adapter was built.
    fn version(&self) -> Version;

    fn driver_variant(&self) -> DriverVariant;

    fn upgrade_advisory(&self) -> Option<&UpgradeAdvisory>;

    fn default_delimiter(&self) -> Delimiter;

    fn current_user(&mut self) -> Result<String>;

    fn supports_ddl_transactions(&self) -> bool;

    fn supports_changing_current_schema(&self) -> bool;

    fn catalog_is_schema(&self) -> bool;

    fn boolean_true(&self) -> &str;

    fn boolean_false(&self) -> &str;

    /// Quotes a single identifier. Dialects without quoting support return it
    /// unchanged.
    fn quote_identifier(&self, identifier: &str) -> String;

    /// Quotes each part and joins them with `.`.
    fn quote(&self, identifiers: &[&str]) -> String {
        identifiers
            .iter()
            .map(|identifier| self.quote_identifier(identifier))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn create_script(
        &self,
        resource: Arc<dyn LoadableResource>,
        placeholder_replacer: Arc<dyn PlaceholderReplacer>,
        mixed: bool,
    ) -> SqlScript;
}

/// Wraps `identifier` in `open`/`close`, doubling any embedded `close`.
///
/// Identifiers that are already correctly quoted this way come back as-is.
#[must_use]
pub fn quote_delimited(identifier: &str, open: char, close: char) -> String {
    if is_delimited(identifier, open, close) {
        return identifier.to_string();
    }

    let escaped = identifier.replace(close, &format!("{close}{close}"));
    format!("{open}{escaped}{close}")
}

fn is_delimited(identifier: &str, open: char, close: char) -> bool {
    let Some(inner) = identifier
        .strip_prefix(open)
        .and_then(|rest| rest.strip_suffix(close))
    else {
        return false;
    };

    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == close && chars.next() != Some(close) {
            return false;
        }
    }
    true
}
