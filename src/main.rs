use greeter::config::ServerConfig;
use greeter::emitter::LogEmitter;
use greeter::server::{build_router, shutdown_channel, wait_for_signal, GreeterServer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::default();

    // One notification stops both the listener and the log emitter
    let (shutdown_controller, shutdown_signal) = shutdown_channel();

    let emitter = LogEmitter::new(config.log_interval, StdRng::from_entropy());
    let emitter_handle = tokio::spawn(emitter.run(shutdown_signal.clone()));

    let server = match GreeterServer::bind(config.bind_addr).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "HTTP listener failed to start");
            return Err(e.into());
        }
    };
    let running = server.start(build_router(), shutdown_signal);

    match wait_for_signal().await {
        Ok(signal) => info!(signal = %signal, "Shutting down the server..."),
        Err(e) => {
            error!(error = %e, "Failed to register termination signal handlers");
            return Err(e.into());
        }
    }

    if let Err(e) = running.drain(&shutdown_controller, config.drain_grace).await {
        error!(error = %e, "HTTP shutdown error");
        return Err(e.into());
    }

    if let Err(e) = emitter_handle.await {
        warn!(error = %e, "Synthetic log emitter ended abnormally");
    }

    info!("Shutdown complete.");
    Ok(())
}
