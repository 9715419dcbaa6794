//! Runtime settings for the greeter service
//!
//! The service listens on a fixed port. Everything here has a fixed
//! production value; tests construct their own `ServerConfig` with an
//! ephemeral port and short periods.

use std::net::SocketAddr;
use std::time::Duration;

/// Port the greeter listens on
pub const GREETER_PORT: u16 = 9090;

/// Upper bound on waiting for in-flight requests during shutdown
pub const DRAIN_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// Interval between synthetic log lines
pub const LOG_EMIT_INTERVAL: Duration = Duration::from_secs(30);

/// Settings for one greeter process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// How long shutdown waits for in-flight requests before giving up
    pub drain_grace: Duration,
    /// Period of the synthetic log emitter
    pub log_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], GREETER_PORT)),
            drain_grace: DRAIN_GRACE_PERIOD,
            log_interval: LOG_EMIT_INTERVAL,
        }
    }
}
