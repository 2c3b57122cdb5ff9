mod cli;
mod commands;
mod error_presentation;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, DialectCommand},
    error_presentation::{CliError, CliResult, render_runtime_error},
};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(error) = run(cli.dialect) {
        eprintln!("{}", render_runtime_error(error));
        std::process::exit(1);
    }
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: DialectCommand) -> CliResult<()> {
    match command {
        #[cfg(feature = "sybasease")]
        DialectCommand::Sybasease(args) => {
            let dialect = shiftql_dialect_sybase_ase::connect(&args.connection_config())
                .map_err(|error| CliError::new("while opening sybasease", error))?;
            commands::run(dialect, &args.action, |dialect| dialect.close())
        }
        #[cfg(feature = "mssql")]
        DialectCommand::Sqlserver(args) => {
            let dialect = shiftql_dialect_mssql::connect(&args.connection_config())
                .map_err(|error| CliError::new("while opening sqlserver", error))?;
            commands::run(dialect, &args.action, |dialect| dialect.close())
        }
        #[cfg(feature = "sqlite")]
        DialectCommand::Sqlite(args) => {
            let dialect = shiftql_dialect_sqlite::connect(&args.connection_config())
                .map_err(|error| CliError::new("while opening sqlite", error))?;
            commands::run(dialect, &args.action, |dialect| dialect.close())
        }
    }
}
