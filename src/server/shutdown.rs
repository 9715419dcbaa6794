//! Graceful shutdown handling for the greeter
//!
//! Handles SIGTERM and SIGINT signals for clean shutdown:
//! - Stops accepting new connections
//! - Waits (bounded) for in-flight requests to complete
//! - Stops the synthetic log emitter

use std::fmt;
use tokio::sync::watch;
use tracing::info;

/// Shutdown notification handed to every task that must stop with the process
///
/// Cheap to clone; all clones observe the same notification.
#[derive(Clone)]
pub struct ShutdownSignal {
    receiver: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Wait for shutdown signal
    pub async fn wait(&mut self) {
        while !*self.receiver.borrow() {
            if self.receiver.changed().await.is_err() {
                // Sender dropped, treat as shutdown
                break;
            }
        }
    }

    /// Check if shutdown was signaled (non-blocking)
    pub fn is_shutdown(&self) -> bool {
        *self.receiver.borrow()
    }
}

/// Controller for triggering shutdown
pub struct ShutdownController {
    sender: watch::Sender<bool>,
}

impl ShutdownController {
    /// Trigger shutdown. Calling it more than once is harmless.
    pub fn shutdown(&self) {
        if self.sender.send_if_modified(|fired| !std::mem::replace(fired, true)) {
            info!("Shutdown signal sent");
        }
    }
}

/// Create a new shutdown pair
///
/// Returns (controller, signal) where:
/// - controller: used once, by whoever decides the process is stopping
/// - signal: cloned into the server and the log emitter
pub fn shutdown_channel() -> (ShutdownController, ShutdownSignal) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownController { sender }, ShutdownSignal { receiver })
}

/// OS notification that ended the serving phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationSignal::Interrupt => f.write_str("SIGINT"),
            TerminationSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Wait for SIGTERM or SIGINT
///
/// Blocks until a termination signal is received. Fails only if the
/// signal handlers cannot be registered.
#[cfg(unix)]
pub async fn wait_for_signal() -> std::io::Result<TerminationSignal> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let received = tokio::select! {
        _ = sigterm.recv() => TerminationSignal::Terminate,
        _ = sigint.recv() => TerminationSignal::Interrupt,
    };
    info!(signal = %received, "Received termination signal");
    Ok(received)
}

/// Wait for Ctrl+C (non-unix targets)
#[cfg(not(unix))]
pub async fn wait_for_signal() -> std::io::Result<TerminationSignal> {
    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl+C");
    Ok(TerminationSignal::Interrupt)
}
