pub(crate) const CURRENT_USER_QUERY: &str = "SELECT user_name()";
pub(crate) const SERVER_VERSION_QUERY: &str = "SELECT @@version";

/// Prefix of `@@version` on Adaptive Server, e.g.
/// `Adaptive Server Enterprise/16.0 SP02 PL05/EBF 25812 SMP/P/x86_64/...`.
pub(crate) const SERVER_VERSION_PREFIX: &str = "Adaptive Server Enterprise/";
