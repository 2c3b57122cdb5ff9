use std::{collections::BTreeMap, sync::Arc};

use serde::Deserialize;
use shiftql_core::{
    Dialect, Error, NoopPlaceholderReplacer, Result, StringResource, Version,
};

use crate::FakeConnection;

const TESTCASE_RESOURCE_LOCATION: &str = "yaml testcase";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateExpectation {
    Supported,
    Advisory,
    Incompatible,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConformanceCase {
    pub server_version: String,
    pub expect: Option<GateExpectation>,
    /// Served by the fake connection for any query and expected back from
    /// `current_user`.
    pub current_user: Option<String>,
    pub quote: BTreeMap<String, String>,
    pub script: Option<String>,
    pub statements: Option<Vec<String>>,
    /// Indexes into `statements` that must be classified non-transactional.
    pub non_transactional: Vec<usize>,
    pub mixed: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed(String),
}

pub fn load_test_cases_from_str(
    yaml: &str,
) -> std::result::Result<BTreeMap<String, ConformanceCase>, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Runs one case against the adapter produced by `open`.
pub fn run_conformance_case<D, F>(open: F, case: &ConformanceCase) -> TestResult
where
    D: Dialect,
    F: FnOnce(FakeConnection) -> Result<D>,
{
    let version = match case.server_version.parse::<Version>() {
        Ok(version) => version,
        Err(error) => return TestResult::Failed(error.to_string()),
    };

    let connection = FakeConnection::new(version);
    if let Some(user) = &case.current_user {
        connection.set_fallback_scalar(user.as_str());
    }

    match check_case(open(connection), case) {
        Ok(()) => TestResult::Passed,
        Err(message) => TestResult::Failed(message),
    }
}

/// Runs every case in `yaml` and panics with a summary of the failures.
pub fn assert_conformance<D, F>(yaml: &str, open: F)
where
    D: Dialect,
    F: Fn(FakeConnection) -> Result<D>,
{
    let cases = load_test_cases_from_str(yaml)
        .unwrap_or_else(|error| panic!("conformance yaml must parse: {error}"));
    let failures = cases
        .iter()
        .filter_map(|(name, case)| match run_conformance_case(&open, case) {
            TestResult::Passed => None,
            TestResult::Failed(message) => Some(format!("{name}: {message}")),
        })
        .collect::<Vec<_>>();

    assert!(
        failures.is_empty(),
        "conformance failures:\n{}",
        failures.join("\n")
    );
}

fn check_case<D: Dialect>(
    opened: Result<D>,
    case: &ConformanceCase,
) -> std::result::Result<(), String> {
    let mut dialect = match (opened, case.expect) {
        (Err(Error::Incompatible(_)), Some(GateExpectation::Incompatible)) => return Ok(()),
        (Err(error), _) => return Err(format!("adapter construction failed: {error}")),
        (Ok(_), Some(GateExpectation::Incompatible)) => {
            return Err("expected construction to fail on version gate".to_string());
        }
        (Ok(dialect), _) => dialect,
    };

    check_gate(&dialect, case.expect)?;
    check_current_user(&mut dialect, case.current_user.as_deref())?;
    check_quoting(&dialect, &case.quote)?;
    check_script(&dialect, case)
}

fn check_gate<D: Dialect>(
    dialect: &D,
    expect: Option<GateExpectation>,
) -> std::result::Result<(), String> {
    let advised = dialect.upgrade_advisory().is_some();
    match expect {
        Some(GateExpectation::Advisory) if !advised => {
            Err("expected an upgrade advisory".to_string())
        }
        Some(GateExpectation::Supported) if advised => {
            Err("expected no upgrade advisory".to_string())
        }
        _ => Ok(()),
    }
}

fn check_current_user<D: Dialect>(
    dialect: &mut D,
    expected: Option<&str>,
) -> std::result::Result<(), String> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let actual = dialect.current_user().map_err(|error| error.to_string())?;
    if actual == expected {
        Ok(())
    } else {
        Err(format!("current_user: expected {expected:?}, got {actual:?}"))
    }
}

fn check_quoting<D: Dialect>(
    dialect: &D,
    expectations: &BTreeMap<String, String>,
) -> std::result::Result<(), String> {
    for (raw, expected) in expectations {
        let quoted = dialect.quote_identifier(raw);
        if &quoted != expected {
            return Err(format!("quote({raw:?}): expected {expected:?}, got {quoted:?}"));
        }

        let requoted = dialect.quote_identifier(&quoted);
        if requoted != quoted {
            return Err(format!(
                "quote is not idempotent for {raw:?}: {quoted:?} became {requoted:?}"
            ));
        }
    }

    Ok(())
}

fn check_script<D: Dialect>(
    dialect: &D,
    case: &ConformanceCase,
) -> std::result::Result<(), String> {
    let Some(text) = &case.script else {
        return Ok(());
    };

    let script = dialect.create_script(
        Arc::new(StringResource::new(TESTCASE_RESOURCE_LOCATION, text.as_str())),
        Arc::new(NoopPlaceholderReplacer),
        case.mixed,
    );

    let statements = match (script.statements(), case.error.as_deref()) {
        (Err(error), Some(expected)) => {
            let message = error.to_string();
            return if message.contains(expected) {
                Ok(())
            } else {
                Err(format!("expected error containing {expected:?}, got {message:?}"))
            };
        }
        (Err(error), None) => return Err(format!("script failed: {error}")),
        (Ok(_), Some(expected)) => {
            return Err(format!("expected script error containing {expected:?}"));
        }
        (Ok(statements), None) => statements,
    };

    if let Some(expected) = &case.statements {
        let actual = statements
            .iter()
            .map(|statement| statement.sql.clone())
            .collect::<Vec<_>>();
        if &actual != expected {
            return Err(format!("statements: expected {expected:?}, got {actual:?}"));
        }
    }

    for (index, statement) in statements.iter().enumerate() {
        let expected_transactional = !case.non_transactional.contains(&index);
        if statement.transactional != expected_transactional {
            return Err(format!(
                "statement[{index}] transactional: expected {expected_transactional}, got {}",
                statement.transactional
            ));
        }
    }

    Ok(())
}
