use shiftql_core::DriverVariant;
use shiftql_dialect_sybase_ase::SybaseAseDialect;
use shiftql_testkit::assert_conformance;

#[test]
fn sybase_ase_conformance() {
    assert_conformance(include_str!("testdata/conformance.yml"), |connection| {
        SybaseAseDialect::open(connection, DriverVariant::Vendor)
    });
}
