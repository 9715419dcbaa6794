//! Synthetic log traffic
//!
//! Emits one made-up log line per tick, rotating through four categories
//! (metrics, performance alert, system issue, health check). Nothing here
//! reflects real traffic; it only exists to give log pipelines something
//! to look at.

use crate::server::ShutdownSignal;
use rand::Rng;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn, Level};

/// Fault descriptions used for the simulated error line
pub const SYSTEM_FAULTS: [&str; 5] = [
    "database connection timeout",
    "memory usage high",
    "disk space low",
    "network latency spike",
    "cache miss rate elevated",
];

/// One generated log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticLog {
    pub level: Level,
    pub message: String,
}

/// Periodic generator of [`SyntheticLog`] lines
pub struct LogEmitter<R> {
    period: Duration,
    ticks: u64,
    rng: R,
}

impl<R: Rng> LogEmitter<R> {
    pub fn new(period: Duration, rng: R) -> Self {
        Self {
            period,
            ticks: 0,
            rng,
        }
    }

    /// Number of lines produced so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one tick and build that tick's line
    pub fn next_log(&mut self) -> SyntheticLog {
        self.ticks += 1;
        let n = self.ticks;

        match n % 4 {
            1 => {
                let processed = n * self.rng.gen_range(0..100u64) + 50;
                let memory = self.rng.gen_range(60..90u32);
                SyntheticLog {
                    level: Level::INFO,
                    message: format!(
                        "System metrics - requests processed: {}, memory usage: {}%",
                        processed, memory
                    ),
                }
            }
            2 => SyntheticLog {
                level: Level::WARN,
                message: format!(
                    "Performance alert - response time: {}ms (threshold: 500ms)",
                    self.rng.gen_range(600..1000u32)
                ),
            },
            3 => {
                let fault = SYSTEM_FAULTS[self.rng.gen_range(0..SYSTEM_FAULTS.len())];
                let correlation_id = self.rng.gen_range(1000..11000u32);
                SyntheticLog {
                    level: Level::ERROR,
                    message: format!(
                        "System issue detected - {} (correlation_id: {})",
                        fault, correlation_id
                    ),
                }
            }
            _ => {
                let uptime = self
                    .period
                    .saturating_mul(u32::try_from(n).unwrap_or(u32::MAX));
                SyntheticLog {
                    level: Level::DEBUG,
                    message: format!(
                        "Periodic health check - uptime: {:?}, workers: {}",
                        uptime,
                        self.rng.gen_range(10..60u32)
                    ),
                }
            }
        }
    }

    /// Emit a line every period until `shutdown` fires
    ///
    /// The first line is written one full period after the call.
    pub async fn run(mut self, mut shutdown: ShutdownSignal) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => emit(&self.next_log()),
                _ = shutdown.wait() => {
                    debug!(ticks = self.ticks, "Synthetic log emitter stopped");
                    return;
                }
            }
        }
    }
}

fn emit(log: &SyntheticLog) {
    if log.level == Level::ERROR {
        error!("{}", log.message);
    } else if log.level == Level::WARN {
        warn!("{}", log.message);
    } else if log.level == Level::INFO {
        info!("{}", log.message);
    } else {
        debug!("{}", log.message);
    }
}

#[cfg(test)]
#[path = "emitter_test.rs"]
mod tests;
