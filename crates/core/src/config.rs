use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: String,
    /// Dialect-specific settings, keyed as `<dialect>.<setting>`.
    pub extra: BTreeMap<String, String>,
}

impl ConnectionConfig {
    #[must_use]
    pub fn extra_value(&self, key: &str) -> Option<&str> {
        self.extra
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Human-readable connection target for error messages; never includes
    /// credentials.
    #[must_use]
    pub fn target(&self, default_host: &str, default_port: u16) -> String {
        format!(
            "{}:{}/{}",
            self.host.as_deref().unwrap_or(default_host),
            self.port.unwrap_or(default_port),
            self.database
        )
    }
}
