use std::io;

use futures_util::TryStreamExt;
use shiftql_core::{
    BoxError, Connection, ConnectionConfig, DriverResult, ExecutionError, Result, Version,
};
use tiberius::{AuthMethod, Client, ColumnData, Config, QueryItem};
use tokio::{
    net::TcpStream,
    runtime::{Builder, Runtime},
};
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::debug;

use crate::{NAME, queries};

type TdsClient = Client<Compat<TcpStream>>;

const DEFAULT_MSSQL_HOST: &str = "127.0.0.1";
const DEFAULT_MSSQL_PORT: u16 = 1433;
const TRUST_CERT_OVERRIDE_KEY: &str = "sqlserver.trust_cert";

/// Live SQL Server connection over TDS.
///
/// The driver is async; every call runs to completion on a private
/// current-thread runtime.
pub struct TdsConnection {
    runtime: Runtime,
    client: TdsClient,
}

impl TdsConnection {
    fn query_rows(&mut self, sql: &str) -> DriverResult<Vec<Vec<String>>> {
        let Self { runtime, client } = self;

        runtime.block_on(async {
            let mut stream = client.simple_query(sql).await?;
            let mut rows = Vec::new();

            while let Some(item) = stream.try_next().await? {
                if let QueryItem::Row(row) = item {
                    let values = row
                        .into_iter()
                        .map(|data| column_text(&data))
                        .collect::<DriverResult<Vec<_>>>()?;
                    rows.push(values);
                }
            }

            Ok::<_, BoxError>(rows)
        })
    }
}

impl Connection for TdsConnection {
    fn query_string(&mut self, sql: &str) -> DriverResult<Option<String>> {
        let rows = self.query_rows(sql)?;

        Ok(rows
            .into_iter()
            .next()
            .and_then(|columns| columns.into_iter().next())
            .map(|value| value.trim().to_string()))
    }

    fn execute(&mut self, sql: &str) -> DriverResult<()> {
        let Self { runtime, client } = self;

        runtime.block_on(async {
            let mut stream = client.simple_query(sql).await?;
            while stream.try_next().await?.is_some() {}
            Ok::<_, BoxError>(())
        })
    }

    fn autocommit(&mut self) -> DriverResult<bool> {
        let implicit = self
            .query_string(queries::IMPLICIT_TRANSACTIONS_QUERY)?
            .ok_or_else(|| io::Error::other("@@OPTIONS returned no rows"))?;
        Ok(implicit == "0")
    }

    fn set_autocommit(&mut self, enabled: bool) -> DriverResult<()> {
        if enabled {
            self.execute(queries::ENABLE_AUTOCOMMIT_SQL)
        } else {
            self.execute(queries::DISABLE_AUTOCOMMIT_SQL)
        }
    }

    fn server_version(&mut self) -> DriverResult<Version> {
        let raw = self
            .query_string(queries::SERVER_VERSION_QUERY)?
            .ok_or_else(|| io::Error::other("SERVERPROPERTY('ProductVersion') returned no rows"))?;
        parse_server_version(&raw).map_err(Into::into)
    }
}

/// Renders a scalar column as text; NULL of any type reads as empty.
fn column_text(data: &ColumnData<'_>) -> DriverResult<String> {
    let text = match data {
        ColumnData::String(Some(value)) => value.to_string(),
        ColumnData::Bit(Some(value)) => u8::from(*value).to_string(),
        ColumnData::U8(Some(value)) => value.to_string(),
        ColumnData::I16(Some(value)) => value.to_string(),
        ColumnData::I32(Some(value)) => value.to_string(),
        ColumnData::I64(Some(value)) => value.to_string(),
        ColumnData::F32(Some(value)) => value.to_string(),
        ColumnData::F64(Some(value)) => value.to_string(),
        ColumnData::Guid(Some(value)) => value.to_string(),
        ColumnData::Numeric(Some(_))
        | ColumnData::Binary(Some(_))
        | ColumnData::Xml(Some(_))
        | ColumnData::DateTime(Some(_))
        | ColumnData::SmallDateTime(Some(_))
        | ColumnData::DateTime2(Some(_))
        | ColumnData::DateTimeOffset(Some(_))
        | ColumnData::Date(Some(_))
        | ColumnData::Time(Some(_)) => {
            return Err(io::Error::other(format!(
                "cannot read {data:?} as text; cast the column to nvarchar"
            ))
            .into());
        }
        _ => String::new(),
    };

    Ok(text)
}

/// Parses `ProductVersion`, e.g. `15.0.2000.5`.
pub fn parse_server_version(raw: &str) -> std::result::Result<Version, io::Error> {
    raw.trim().parse::<Version>().map_err(io::Error::other)
}

/// Whether the server certificate is accepted without validation.
///
/// Defaults to `true`; set `sqlserver.trust_cert=false` to validate against
/// the system roots.
#[must_use]
pub fn trusts_server_certificate(config: &ConnectionConfig) -> bool {
    !config
        .extra_value(TRUST_CERT_OVERRIDE_KEY)
        .is_some_and(|value| value.eq_ignore_ascii_case("false") || value == "0")
}

pub(crate) fn connect_live(config: &ConnectionConfig) -> Result<TdsConnection> {
    let target = config.target(DEFAULT_MSSQL_HOST, DEFAULT_MSSQL_PORT);
    let connect_error =
        |source: BoxError| ExecutionError::connect_failed(NAME, target.clone(), source);
    debug!(backend = NAME, %target, "connecting via tds");

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|source| connect_error(source.into()))?;
    let tds_config = build_tiberius_config(config).map_err(|source| connect_error(source.into()))?;

    let client = runtime
        .block_on(async {
            let tcp = TcpStream::connect(tds_config.get_addr()).await?;
            tcp.set_nodelay(true)?;

            Client::connect(tds_config, tcp.compat_write())
                .await
                .map_err(BoxError::from)
        })
        .map_err(connect_error)?;

    Ok(TdsConnection { runtime, client })
}

fn build_tiberius_config(config: &ConnectionConfig) -> std::result::Result<Config, io::Error> {
    let host = config
        .host
        .as_deref()
        .unwrap_or(DEFAULT_MSSQL_HOST)
        .to_string();
    let port = config.port.unwrap_or(DEFAULT_MSSQL_PORT);
    let user = config
        .user
        .clone()
        .ok_or_else(|| io::Error::other("sqlserver user is required"))?;
    let password = config.password.clone().unwrap_or_default();

    let mut tds_config = Config::new();
    tds_config.host(host.as_str());
    tds_config.port(port);
    if !config.database.is_empty() {
        tds_config.database(config.database.clone());
    }
    tds_config.authentication(AuthMethod::sql_server(user, password));
    if trusts_server_certificate(config) {
        tds_config.trust_cert();
    }

    Ok(tds_config)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use tiberius::ColumnData;

    use super::column_text;

    #[test]
    fn scalar_columns_read_as_text() {
        let cases = [
            (ColumnData::String(Some(Cow::Borrowed("sa"))), "sa"),
            (ColumnData::I32(Some(1)), "1"),
            (ColumnData::I64(Some(-7)), "-7"),
            (ColumnData::Bit(Some(true)), "1"),
            (ColumnData::U8(Some(2)), "2"),
            (ColumnData::I32(None), ""),
            (ColumnData::String(None), ""),
        ];

        for (data, expected) in cases {
            let text = column_text(&data)
                .unwrap_or_else(|error| panic!("{data:?} must read as text: {error}"));
            assert_eq!(text, expected);
        }
    }

    #[test]
    fn binary_column_is_an_error_not_a_panic() {
        let data = ColumnData::Binary(Some(Cow::Borrowed(&[1_u8, 2][..])));

        let Err(error) = column_text(&data) else {
            panic!("binary column must not read as text");
        };
        assert!(error.to_string().contains("nvarchar"), "{error}");
    }
}
