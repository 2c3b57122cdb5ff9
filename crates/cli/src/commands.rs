use std::{collections::BTreeMap, path::Path, sync::Arc};

use shiftql_core::{
    Dialect, FileResource, MapPlaceholderReplacer, NoopPlaceholderReplacer, PlaceholderReplacer,
    Result, SqlStatement,
};
use tracing::warn;

use crate::{
    cli::ActionArgs,
    error_presentation::{CliError, CliResult},
};

/// Runs the requested action, then closes the adapter on every path.
///
/// A close failure after a successful action is only logged.
pub(crate) fn run<D, F>(mut dialect: D, action: &ActionArgs, close: F) -> CliResult<()>
where
    D: Dialect,
    F: FnOnce(D) -> Result<()>,
{
    let outcome = match &action.split {
        Some(path) => split(&dialect, path, action),
        None => info(&mut dialect),
    };
    let backend = dialect.name().to_string();
    let closed = close(dialect);

    match (outcome, closed) {
        (Ok(()), Ok(())) => Ok(()),
        (Ok(()), Err(error)) => {
            warn!(backend, %error, "closing the connection failed");
            Ok(())
        }
        (Err(error), Ok(())) => Err(error),
        (Err(error), Err(close_error)) => {
            warn!(backend, error = %close_error, "closing the connection failed");
            Err(error)
        }
    }
}

fn info<D: Dialect>(dialect: &mut D) -> CliResult<()> {
    let current_user = dialect
        .current_user()
        .map_err(|error| CliError::new("while reading the current user", error))?;
    let delimiter = dialect.default_delimiter();
    let placement = if delimiter.alone_on_line() {
        "alone on line"
    } else {
        "inline"
    };

    println!("dialect: {}", dialect.name());
    println!("version: {}", dialect.version());
    println!("driver: {}", dialect.driver_variant().as_str());
    println!("delimiter: {} ({placement})", delimiter.token());
    println!("current_user: {current_user}");
    println!("ddl_transactions: {}", dialect.supports_ddl_transactions());
    println!(
        "change_current_schema: {}",
        dialect.supports_changing_current_schema()
    );
    println!("catalog_is_schema: {}", dialect.catalog_is_schema());
    println!(
        "booleans: {} / {}",
        dialect.boolean_true(),
        dialect.boolean_false()
    );
    if let Some(advisory) = dialect.upgrade_advisory() {
        println!("advisory: {advisory}");
    }

    Ok(())
}

fn split<D: Dialect>(dialect: &D, path: &Path, action: &ActionArgs) -> CliResult<()> {
    let script = dialect.create_script(
        Arc::new(FileResource::new(path)),
        placeholder_replacer(&action.placeholders),
        action.mixed,
    );
    let statements = script
        .statements()
        .map_err(|error| CliError::new("while splitting script", error))?;

    let delimiter = script.delimiter();
    for (index, statement) in statements.iter().enumerate() {
        println!("{}", statement_header(index, statement));
        if delimiter.alone_on_line() {
            println!("{}\n{}", statement.sql, delimiter.token());
        } else {
            println!("{}{}", statement.sql, delimiter.token());
        }
    }

    Ok(())
}

fn statement_header(index: usize, statement: &SqlStatement) -> String {
    let marker = if statement.transactional {
        ""
    } else {
        " non-transactional"
    };
    format!("-- [{}] line {}{marker}", index + 1, statement.line)
}

fn placeholder_replacer(placeholders: &[(String, String)]) -> Arc<dyn PlaceholderReplacer> {
    if placeholders.is_empty() {
        return Arc::new(NoopPlaceholderReplacer);
    }

    Arc::new(MapPlaceholderReplacer::new(
        placeholders.iter().cloned().collect::<BTreeMap<_, _>>(),
    ))
}
