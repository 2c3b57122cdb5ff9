mod fake_connection;
mod yaml_runner;

pub use fake_connection::FakeConnection;
pub use yaml_runner::{
    ConformanceCase, GateExpectation, TestResult, assert_conformance, load_test_cases_from_str,
    run_conformance_case,
};
