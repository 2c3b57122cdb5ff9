use shiftql_core::DriverVariant;
use shiftql_dialect_sqlite::SqliteDialect;
use shiftql_testkit::assert_conformance;

#[test]
fn sqlite_conformance() {
    assert_conformance(include_str!("testdata/conformance.yml"), |connection| {
        SqliteDialect::open(connection, DriverVariant::Vendor)
    });
}
