use std::net::SocketAddr;

/// Application-level constants
pub const APP_NAME: &str = "Consulta";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default analysis context attached to queries that do not set one.
pub const DEFAULT_CONTEXT: &str = "respiratory_diseases";

/// Environment variable holding a path to a JSON knowledge registry
/// that replaces the built-in respiratory registry.
pub const KNOWLEDGE_ENV: &str = "CONSULTA_KNOWLEDGE";

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info,consulta=debug"
}

/// Default bind address for the local API server.
pub fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8700))
}
