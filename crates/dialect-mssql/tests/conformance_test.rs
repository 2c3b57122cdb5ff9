use shiftql_core::DriverVariant;
use shiftql_dialect_mssql::MssqlDialect;
use shiftql_testkit::assert_conformance;

#[test]
fn sql_server_conformance() {
    assert_conformance(include_str!("testdata/conformance.yml"), |connection| {
        MssqlDialect::open(connection, DriverVariant::OpenSource)
    });
}
