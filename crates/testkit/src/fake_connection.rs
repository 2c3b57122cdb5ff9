use std::{cell::RefCell, collections::BTreeMap, io, rc::Rc};

use shiftql_core::{Connection, DriverResult, Version};

/// In-memory [`Connection`] whose answers are scripted by the test.
///
/// Clones share state, so a test can keep a handle while the adapter owns
/// the connection.
#[derive(Debug, Clone)]
pub struct FakeConnection {
    state: Rc<RefCell<FakeConnectionState>>,
}

#[derive(Debug)]
struct FakeConnectionState {
    server_version: Version,
    autocommit: bool,
    scalars: BTreeMap<String, String>,
    fallback_scalar: Option<String>,
    executed_sql: Vec<String>,
    autocommit_writes: Vec<bool>,
    fail_on_sql: Option<(String, String)>,
    fail_autocommit_writes: bool,
    fail_server_version: bool,
}

impl FakeConnection {
    #[must_use]
    pub fn new(server_version: Version) -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeConnectionState {
                server_version,
                autocommit: true,
                scalars: BTreeMap::new(),
                fallback_scalar: None,
                executed_sql: Vec::new(),
                autocommit_writes: Vec::new(),
                fail_on_sql: None,
                fail_autocommit_writes: false,
                fail_server_version: false,
            })),
        }
    }

    pub fn set_autocommit_value(&self, enabled: bool) {
        self.state.borrow_mut().autocommit = enabled;
    }

    pub fn set_scalar(&self, sql: impl Into<String>, value: impl Into<String>) {
        self.state
            .borrow_mut()
            .scalars
            .insert(sql.into(), value.into());
    }

    /// Answer for any query without a specific scalar.
    pub fn set_fallback_scalar(&self, value: impl Into<String>) {
        self.state.borrow_mut().fallback_scalar = Some(value.into());
    }

    pub fn set_fail_on_sql(&self, sql: impl Into<String>, message: impl Into<String>) {
        self.state.borrow_mut().fail_on_sql = Some((sql.into(), message.into()));
    }

    pub fn set_fail_autocommit_writes(&self, fail: bool) {
        self.state.borrow_mut().fail_autocommit_writes = fail;
    }

    pub fn set_fail_server_version(&self, fail: bool) {
        self.state.borrow_mut().fail_server_version = fail;
    }

    #[must_use]
    pub fn autocommit_value(&self) -> bool {
        self.state.borrow().autocommit
    }

    #[must_use]
    pub fn autocommit_writes(&self) -> Vec<bool> {
        self.state.borrow().autocommit_writes.clone()
    }

    #[must_use]
    pub fn executed_sql(&self) -> Vec<String> {
        self.state.borrow().executed_sql.clone()
    }

    fn check_failure(&self, sql: &str) -> DriverResult<()> {
        match &self.state.borrow().fail_on_sql {
            Some((failing_sql, message)) if failing_sql == sql => {
                Err(io::Error::other(message.clone()).into())
            }
            _ => Ok(()),
        }
    }
}

impl Connection for FakeConnection {
    fn query_string(&mut self, sql: &str) -> DriverResult<Option<String>> {
        self.check_failure(sql)?;
        let mut state = self.state.borrow_mut();
        state.executed_sql.push(sql.to_string());
        Ok(state
            .scalars
            .get(sql)
            .or(state.fallback_scalar.as_ref())
            .cloned())
    }

    fn execute(&mut self, sql: &str) -> DriverResult<()> {
        self.check_failure(sql)?;
        self.state.borrow_mut().executed_sql.push(sql.to_string());
        Ok(())
    }

    fn autocommit(&mut self) -> DriverResult<bool> {
        Ok(self.state.borrow().autocommit)
    }

    fn set_autocommit(&mut self, enabled: bool) -> DriverResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_autocommit_writes {
            return Err(io::Error::other("connection reset while changing autocommit").into());
        }
        state.autocommit = enabled;
        state.autocommit_writes.push(enabled);
        Ok(())
    }

    fn server_version(&mut self) -> DriverResult<Version> {
        let state = self.state.borrow();
        if state.fail_server_version {
            return Err(io::Error::other("metadata unavailable").into());
        }
        Ok(state.server_version)
    }
}
