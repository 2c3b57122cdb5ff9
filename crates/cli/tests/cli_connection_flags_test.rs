use std::process::Command;

fn run_shiftql(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_shiftql"))
        .args(args)
        .output()
        .unwrap_or_else(|error| panic!("failed to run shiftql: {error}"))
}

#[cfg(feature = "sybasease")]
#[test]
fn sybasease_help_lists_network_and_odbc_flags() {
    let output = run_shiftql(&["sybasease", "--help"]);

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--host", "--port", "--user", "--password", "--driver", "--dsn", "--split"] {
        assert!(stdout.contains(flag), "missing {flag} in: {stdout}");
    }
    assert!(stdout.contains("<DATABASE>"));
}

#[cfg(feature = "sybasease")]
#[test]
fn sybasease_dsn_conflicts_with_host() {
    let output = run_shiftql(&["sybasease", "--dsn", "prod", "--host", "ase1", "app_db"]);

    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--dsn"), "{stderr}");
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_help_uses_database_path_and_excludes_network_flags() {
    let output = run_shiftql(&["sqlite", "--help"]);

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("<DATABASE>"));
    assert!(!stdout.contains("--host"));
    assert!(!stdout.contains("--port"));
    assert!(!stdout.contains("--user"));
    assert!(!stdout.contains("--password"));
    assert!(!stdout.contains("--driver"));
}
