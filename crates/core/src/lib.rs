mod config;
mod connection;
mod delimiter;
mod dialect;
mod error;
mod gate;
mod placeholder;
mod resource;
mod script;
mod session;
mod version;

pub use config::ConnectionConfig;
pub use connection::{Connection, DriverResult, DriverVariant};
pub use delimiter::Delimiter;
pub use dialect::{Dialect, quote_delimited};
pub use error::{
    BoxError, Error, ExecutionError, IncompatibleVersion, ReleaseError, ResourceError, Result,
    ScriptError,
};
pub use gate::{SupportedVersions, UpgradeAdvisory};
pub use placeholder::{
    DEFAULT_PLACEHOLDER_PREFIX, DEFAULT_PLACEHOLDER_SUFFIX, MapPlaceholderReplacer,
    NoopPlaceholderReplacer, PlaceholderReplacer,
};
pub use resource::{FileResource, LoadableResource, StringResource};
pub use script::{
    DefaultScriptParser, ScriptParser, SqlScript, SqlStatement, leading_keywords,
    split_statements, strip_comments, strip_literals,
};
pub use session::{Released, Session};
pub use version::{ParseVersionError, Version};
