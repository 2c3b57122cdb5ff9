use std::{collections::BTreeMap, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use shiftql_core::ConnectionConfig;

#[cfg(not(any(feature = "sybasease", feature = "sqlite", feature = "mssql")))]
compile_error!("enable at least one of the `sybasease`, `sqlite` or `mssql` features");

#[derive(Debug, Parser)]
#[command(
    name = "shiftql",
    version,
    about = "Inspect database dialects and split migration scripts"
)]
pub(crate) struct Cli {
    /// Log filter used when RUST_LOG is not set, e.g. `debug` or `shiftql_core=trace`.
    #[arg(long, global = true, default_value = "warn")]
    pub(crate) log_level: String,

    #[command(subcommand)]
    pub(crate) dialect: DialectCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum DialectCommand {
    /// Sybase Adaptive Server Enterprise over ODBC.
    #[cfg(feature = "sybasease")]
    Sybasease(SybaseAseArgs),
    /// Microsoft SQL Server over TDS.
    #[cfg(feature = "mssql")]
    Sqlserver(SqlServerArgs),
    /// SQLite database file.
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteArgs),
}

#[cfg(any(feature = "sybasease", feature = "mssql"))]
#[derive(Debug, Clone, Args)]
pub(crate) struct NetworkArgs {
    #[arg(long)]
    pub(crate) host: Option<String>,
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[arg(long, short = 'u')]
    pub(crate) user: Option<String>,
    #[arg(long, short = 'p')]
    pub(crate) password: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct ActionArgs {
    /// Split this script with the dialect's delimiter and print its statements
    /// instead of the dialect report.
    #[arg(long, value_name = "FILE")]
    pub(crate) split: Option<PathBuf>,

    /// Allow transactional and non-transactional statements in one script.
    #[arg(long, requires = "split")]
    pub(crate) mixed: bool,

    /// Placeholder substituted as `${KEY}` in the script.
    #[arg(
        long = "placeholder",
        value_name = "KEY=VALUE",
        value_parser = parse_placeholder,
        requires = "split"
    )]
    pub(crate) placeholders: Vec<(String, String)>,
}

#[cfg(feature = "sybasease")]
#[derive(Debug, Clone, Args)]
pub(crate) struct SybaseAseArgs {
    #[command(flatten)]
    pub(crate) network: NetworkArgs,

    /// ODBC driver name, e.g. `FreeTDS`.
    #[arg(long)]
    pub(crate) driver: Option<String>,

    /// ODBC data source name; replaces --driver, --host and --port.
    #[arg(long, conflicts_with_all = ["driver", "host", "port"])]
    pub(crate) dsn: Option<String>,

    pub(crate) database: String,

    #[command(flatten)]
    pub(crate) action: ActionArgs,
}

#[cfg(feature = "mssql")]
#[derive(Debug, Clone, Args)]
pub(crate) struct SqlServerArgs {
    #[command(flatten)]
    pub(crate) network: NetworkArgs,

    /// Validate the server certificate instead of trusting it.
    #[arg(long)]
    pub(crate) no_trust_cert: bool,

    pub(crate) database: String,

    #[command(flatten)]
    pub(crate) action: ActionArgs,
}

#[cfg(feature = "sqlite")]
#[derive(Debug, Clone, Args)]
pub(crate) struct SqliteArgs {
    /// Database file path; `:memory:` for a scratch database.
    pub(crate) database: String,

    #[command(flatten)]
    pub(crate) action: ActionArgs,
}

#[cfg(any(feature = "sybasease", feature = "mssql"))]
impl NetworkArgs {
    fn into_config(self, database: String, extra: BTreeMap<String, String>) -> ConnectionConfig {
        ConnectionConfig {
            host: self.host,
            port: self.port,
            user: self.user,
            password: self.password,
            database,
            extra,
        }
    }
}

#[cfg(feature = "sybasease")]
impl SybaseAseArgs {
    pub(crate) fn connection_config(&self) -> ConnectionConfig {
        let mut extra = BTreeMap::new();
        if let Some(driver) = &self.driver {
            extra.insert("sybasease.driver".to_string(), driver.clone());
        }
        if let Some(dsn) = &self.dsn {
            extra.insert("sybasease.dsn".to_string(), dsn.clone());
        }

        self.network
            .clone()
            .into_config(self.database.clone(), extra)
    }
}

#[cfg(feature = "mssql")]
impl SqlServerArgs {
    pub(crate) fn connection_config(&self) -> ConnectionConfig {
        let mut extra = BTreeMap::new();
        if self.no_trust_cert {
            extra.insert("sqlserver.trust_cert".to_string(), "false".to_string());
        }

        self.network
            .clone()
            .into_config(self.database.clone(), extra)
    }
}

#[cfg(feature = "sqlite")]
impl SqliteArgs {
    pub(crate) fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            database: self.database.clone(),
            ..ConnectionConfig::default()
        }
    }
}

fn parse_placeholder(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("placeholder key is empty in `{raw}`"));
    }

    Ok((key.to_string(), value.to_string()))
}
