//! Start/stop sequence for the HTTP listener
//!
//! The server moves through `idle → serving → draining → stopped`:
//! - `bind` claims the port (idle)
//! - `start` spawns the accept loop (serving)
//! - `drain` stops accepting, waits a bounded time for in-flight
//!   requests, then reports how the wait ended (draining → stopped)

use super::shutdown::{ShutdownController, ShutdownSignal};
use axum::Router;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("HTTP listener failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("HTTP server did not drain within {0:?}")]
    DrainTimeout(Duration),
}

/// Phase of the server's lifetime
///
/// Ordered: a server only ever moves to a later phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    Idle,
    Serving,
    Draining,
    Stopped,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Serving => "serving",
            LifecycleState::Draining => "draining",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Shared view of the server's current phase
///
/// Clones observe the same state. Use `subscribe` to await transitions.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: Arc<watch::Sender<LifecycleState>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(LifecycleState::Idle);
        Self {
            state: Arc::new(sender),
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Move to `next` if it is later than the current phase
    ///
    /// Returns false (and changes nothing) for backwards or repeated moves.
    pub fn advance(&self, next: LifecycleState) -> bool {
        let moved = self.state.send_if_modified(|current| {
            if next > *current {
                *current = next;
                true
            } else {
                false
            }
        });
        if moved {
            info!(state = %next, "Server lifecycle transition");
        }
        moved
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound listener that has not started accepting yet
pub struct GreeterServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    lifecycle: Lifecycle,
}

impl GreeterServer {
    /// Bind the listener
    ///
    /// Port in use or permission denied come back as `ServerError::Bind`.
    pub async fn bind(addr: SocketAddr) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;
        info!(port = local_addr.port(), "Starting HTTP Greeter");

        Ok(Self {
            listener,
            local_addr,
            lifecycle: Lifecycle::new(),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Spawn the accept loop and return immediately
    ///
    /// Each connection is served on its own task. The loop stops accepting
    /// as soon as `shutdown` fires.
    pub fn start(self, router: Router, mut shutdown: ShutdownSignal) -> RunningServer {
        let GreeterServer {
            listener,
            local_addr,
            lifecycle,
        } = self;

        let service = router.into_make_service_with_connect_info::<SocketAddr>();
        let handle = tokio::spawn(async move {
            axum::serve(listener, service)
                .with_graceful_shutdown(async move { shutdown.wait().await })
                .await
        });
        lifecycle.advance(LifecycleState::Serving);

        RunningServer {
            handle,
            local_addr,
            lifecycle,
        }
    }
}

/// Handle to a server whose accept loop is running
pub struct RunningServer {
    handle: JoinHandle<std::io::Result<()>>,
    local_addr: SocketAddr,
    lifecycle: Lifecycle,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Stop accepting and wait at most `grace` for in-flight requests
    ///
    /// Fires `controller`, which also stops every other task holding a
    /// clone of its signal. If `grace` elapses first, the serve task is
    /// aborted and `ServerError::DrainTimeout` is returned; connections
    /// still open at that point go away when the process exits. The server
    /// ends `Stopped` on every path.
    pub async fn drain(
        self,
        controller: &ShutdownController,
        grace: Duration,
    ) -> Result<(), ServerError> {
        let RunningServer {
            mut handle,
            lifecycle,
            ..
        } = self;

        lifecycle.advance(LifecycleState::Draining);
        controller.shutdown();

        let outcome = match tokio::time::timeout(grace, &mut handle).await {
            Ok(Ok(Ok(()))) => {
                info!("HTTP server stopped serving new requests.");
                Ok(())
            }
            Ok(Ok(Err(e))) => Err(ServerError::Serve(e)),
            Ok(Err(join_error)) => Err(ServerError::Serve(std::io::Error::other(join_error))),
            Err(_) => {
                warn!(
                    grace_ms = grace.as_millis() as u64,
                    "Drain deadline elapsed, closing remaining connections"
                );
                handle.abort();
                Err(ServerError::DrainTimeout(grace))
            }
        };

        lifecycle.advance(LifecycleState::Stopped);
        outcome
    }
}
