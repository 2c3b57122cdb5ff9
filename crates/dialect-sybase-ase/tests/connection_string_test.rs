use std::collections::BTreeMap;

use shiftql_core::{ConnectionConfig, DriverVariant, Version};
use shiftql_dialect_sybase_ase::{connection_string, driver_variant, parse_server_version};

fn config(extra: &[(&str, &str)]) -> ConnectionConfig {
    ConnectionConfig {
        host: Some("ase.internal".to_string()),
        port: Some(5001),
        user: Some("migrator".to_string()),
        password: Some("s3cret".to_string()),
        database: "app_db".to_string(),
        extra: extra
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[test]
fn vendor_driver_is_the_default() {
    let config = config(&[]);

    assert_eq!(driver_variant(&config), DriverVariant::Vendor);
    assert_eq!(
        connection_string(&config, DriverVariant::Vendor),
        "Driver={Adaptive Server Enterprise};Server=ase.internal;Port=5001;Database=app_db;\
         UID=migrator;PWD=s3cret",
    );
}

#[test]
fn freetds_driver_selects_tds_5() {
    let config = config(&[("sybasease.driver", "FreeTDS")]);
    let driver = driver_variant(&config);

    assert_eq!(driver, DriverVariant::OpenSource);
    assert_eq!(
        connection_string(&config, driver),
        "Driver={FreeTDS};Server=ase.internal;Port=5001;Database=app_db;UID=migrator;\
         PWD=s3cret;TDS_Version=5.0",
    );
}

#[test]
fn dsn_replaces_driver_and_server() {
    let config = config(&[("sybasease.dsn", "ase_prod")]);

    assert_eq!(
        connection_string(&config, DriverVariant::Vendor),
        "DSN=ase_prod;Database=app_db;UID=migrator;PWD=s3cret",
    );
}

#[test]
fn values_with_separators_are_braced() {
    let mut config = config(&[]);
    config.password = Some("p;w}d".to_string());

    let rendered = connection_string(&config, DriverVariant::Vendor);

    assert!(rendered.ends_with("PWD={p;w}}d}"), "{rendered}");
}

#[test]
fn missing_host_and_port_use_defaults() {
    let config = ConnectionConfig {
        database: "app_db".to_string(),
        ..ConnectionConfig::default()
    };

    assert_eq!(
        connection_string(&config, DriverVariant::Vendor),
        "Driver={Adaptive Server Enterprise};Server=127.0.0.1;Port=5000;Database=app_db",
    );
}

#[test]
fn server_version_is_read_from_version_banner() {
    let version = parse_server_version(
        "Adaptive Server Enterprise/16.0 SP03 PL07/EBF 28971 SMP/P/x86_64/SLES 12.4/ase160sp03pl07x/3457/64-bit/FBO/Thu Jul 11 2019",
    )
    .expect("banner parses");

    assert_eq!(version, Version::new(16, 0));
    assert_eq!(
        parse_server_version("15.7.0.132").expect("bare version"),
        Version::new(15, 7)
    );
    assert!(parse_server_version("Adaptive Server Enterprise/").is_err());
}
