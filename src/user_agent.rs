//! User-Agent header sent by the HTTP transport.

use std::sync::OnceLock;

/// Crate name used in the User-Agent string.
const CRATE_NAME: &str = "influxdb-transport";

/// Crate version from Cargo.toml.
const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the User-Agent string for HTTP requests.
///
/// Format: `influxdb-transport/0.1.0 (rust/1.92; linux/x86_64)`
///
/// Computed once and cached.
pub(crate) fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        format!(
            "{}/{} (rust/{}; {}/{})",
            CRATE_NAME,
            CRATE_VERSION,
            env!("CARGO_PKG_RUST_VERSION"),
            os_name(),
            std::env::consts::ARCH,
        )
    })
}

fn os_name() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}
