//! Demonstration greeting service
//!
//! One HTTP endpoint, a bounded graceful shutdown, and a background task
//! that writes synthetic log lines.

pub mod config;
pub mod emitter;
pub mod server;
