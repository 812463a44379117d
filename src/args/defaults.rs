pub(crate) const DEFAULT_USER_AGENT: &str = concat!("apibench/", env!("CARGO_PKG_VERSION"));

/// Server the suite targets when neither CLI nor config names one.
pub(crate) const DEFAULT_URL: &str = "http://localhost:8443";
/// Concurrent connections for the standard test level.
pub(crate) const DEFAULT_CONNECTIONS: usize = 20;
/// Total timed requests for the standard test level.
pub(crate) const DEFAULT_REQUESTS: usize = 2000;
