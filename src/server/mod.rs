//! HTTP side of the greeter
//!
//! - `/greeter/greet` - plaintext greeting endpoint
//!
//! Also owns the listener lifecycle and graceful shutdown on SIGTERM/SIGINT.

mod greet;
mod lifecycle;
pub mod shutdown;

pub use greet::{build_router, greeting, resolve_name, DEFAULT_NAME, GREET_PATH};
pub use lifecycle::{GreeterServer, Lifecycle, LifecycleState, RunningServer, ServerError};
pub use shutdown::{
    shutdown_channel, wait_for_signal, ShutdownController, ShutdownSignal, TerminationSignal,
};

#[cfg(test)]
#[path = "greet_test.rs"]
mod greet_tests;

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
