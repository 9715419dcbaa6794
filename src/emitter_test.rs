//! Tests for the synthetic log emitter

#![allow(clippy::expect_used)] // Tests can use expect for better error messages

use super::*;
use crate::server::shutdown_channel;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded(period: Duration) -> LogEmitter<StdRng> {
    LogEmitter::new(period, StdRng::seed_from_u64(7))
}

/// Extract the integer that directly follows `prefix` in `message`
fn number_after(message: &str, prefix: &str) -> u64 {
    let start = message.find(prefix).expect("prefix present") + prefix.len();
    message[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .expect("number after prefix")
}

#[test]
fn test_categories_cycle_in_fixed_order() {
    let mut emitter = seeded(Duration::from_secs(30));

    let levels: Vec<Level> = (0..8).map(|_| emitter.next_log().level).collect();

    assert_eq!(
        levels,
        vec![
            Level::INFO,
            Level::WARN,
            Level::ERROR,
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR,
            Level::DEBUG,
        ]
    );
    assert_eq!(emitter.ticks(), 8);
}

#[test]
fn test_metrics_line_values_in_range() {
    let mut emitter = seeded(Duration::from_secs(30));

    for _ in 0..50 {
        let log = emitter.next_log();
        if log.level != Level::INFO {
            continue;
        }
        assert!(log.message.starts_with("System metrics - requests processed: "));
        assert!(number_after(&log.message, "requests processed: ") >= 50);
        let memory = number_after(&log.message, "memory usage: ");
        assert!((60..90).contains(&memory), "memory {} out of range", memory);
        assert!(log.message.ends_with('%'));
    }
}

#[test]
fn test_performance_alert_above_threshold() {
    let mut emitter = seeded(Duration::from_secs(30));

    for _ in 0..50 {
        let log = emitter.next_log();
        if log.level != Level::WARN {
            continue;
        }
        let response_ms = number_after(&log.message, "response time: ");
        assert!((600..1000).contains(&response_ms));
        assert!(log.message.ends_with("(threshold: 500ms)"));
    }
}

#[test]
fn test_error_line_names_known_fault_and_correlation_id() {
    let mut emitter = seeded(Duration::from_secs(30));

    for _ in 0..50 {
        let log = emitter.next_log();
        if log.level != Level::ERROR {
            continue;
        }
        assert!(
            SYSTEM_FAULTS
                .iter()
                .any(|fault| log.message.contains(fault)),
            "unexpected fault in {:?}",
            log.message
        );
        let correlation_id = number_after(&log.message, "correlation_id: ");
        assert!((1000..11000).contains(&correlation_id));
    }
}

#[test]
fn test_health_check_reports_elapsed_periods() {
    let mut emitter = seeded(Duration::from_secs(30));

    let health: Vec<String> = (0..8)
        .map(|_| emitter.next_log())
        .filter(|log| log.level == Level::DEBUG)
        .map(|log| log.message)
        .collect();

    assert_eq!(health.len(), 2);
    assert!(health[0].starts_with("Periodic health check - uptime: 120s, workers: "));
    assert!(health[1].starts_with("Periodic health check - uptime: 240s, workers: "));
    let workers = number_after(&health[0], "workers: ");
    assert!((10..60).contains(&workers));
}

#[test]
fn test_same_seed_same_output() {
    let mut a = seeded(Duration::from_secs(30));
    let mut b = seeded(Duration::from_secs(30));

    for _ in 0..12 {
        assert_eq!(a.next_log(), b.next_log());
    }
}

#[tokio::test]
async fn test_run_ticks_until_shutdown() {
    let (controller, signal) = shutdown_channel();
    let emitter = seeded(Duration::from_millis(10));

    let handle = tokio::spawn(emitter.run(signal));
    tokio::time::sleep(Duration::from_millis(60)).await;
    controller.shutdown();

    let result = tokio::time::timeout(Duration::from_secs(1), handle).await;
    assert!(result.is_ok(), "emitter should stop after shutdown");
}

#[tokio::test]
async fn test_run_returns_immediately_if_already_shut_down() {
    let (controller, signal) = shutdown_channel();
    controller.shutdown();

    let emitter = seeded(Duration::from_secs(30));
    let result = tokio::time::timeout(Duration::from_secs(1), emitter.run(signal)).await;

    assert!(result.is_ok());
}
