use std::process::Command;

fn run_shiftql(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_shiftql"))
        .args(args)
        .output()
        .unwrap_or_else(|err| panic!("failed to run shiftql: {err}"))
}

#[test]
fn usage_lists_enabled_dialects() {
    let output = run_shiftql(&[]);

    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage: shiftql [OPTIONS] <COMMAND>"), "{stderr}");
    #[cfg(feature = "sybasease")]
    assert!(stderr.contains("sybasease"));
    #[cfg(feature = "sqlite")]
    assert!(stderr.contains("sqlite"));
    #[cfg(not(feature = "mssql"))]
    assert!(!stderr.contains("sqlserver"));
}

#[cfg(not(feature = "mssql"))]
#[test]
fn rejects_disabled_sqlserver_subcommand() {
    let output = run_shiftql(&["sqlserver", "master"]);

    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized subcommand 'sqlserver'"), "{stderr}");
}

#[cfg(feature = "sqlite")]
#[test]
fn placeholder_requires_split() {
    let output = run_shiftql(&["sqlite", ":memory:", "--placeholder", "schema=app"]);

    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--split"), "{stderr}");
}

#[cfg(feature = "sqlite")]
#[test]
fn malformed_placeholder_is_a_usage_error() {
    let output = run_shiftql(&["sqlite", ":memory:", "--split", "x.sql", "--placeholder", "app"]);

    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected KEY=VALUE"), "{stderr}");
}
