use anyhow::Context;
use miette::Report;
use shiftql_core::Error;

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

/// Adapter or script failure plus the CLI step it happened in.
#[derive(Debug)]
pub(crate) struct CliError {
    context: String,
    source: Error,
}

impl CliError {
    pub(crate) fn new(context: impl Into<String>, source: Error) -> Self {
        Self {
            context: context.into(),
            source,
        }
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    let category = core_category(&error.source);
    let report = report_with_context(error.source, error.context);
    format!("[{category}] {report}")
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let anyhow_error = anyhow::Error::new(source).context(context.into());
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &Error) -> &'static str {
    match error {
        Error::Incompatible(_) => "incompatible",
        Error::Execute(_) => "execute",
        Error::Release(_) => "release",
        Error::Resource(_) => "resource",
        Error::Script(_) => "script",
    }
}
