//! Prometheus Metrics Module
//!
//! Application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - Room join counts
//! - Relayed message counts and per-recipient fan-out outcomes
//! - Long-poll receive outcomes (delivered, timeout, closed)
//! - Active client and room gauges (set at scrape time)

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Total number of successful room joins
pub static ROOM_JOINS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("room_joins_total", "Total number of successful room joins")
            .namespace("chat_relay"),
    )
    .expect("Failed to create ROOM_JOINS_TOTAL metric")
});

/// Total number of messages accepted for fan-out
pub static MESSAGES_SENT_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "messages_sent_total",
            "Total number of messages accepted for fan-out",
        )
        .namespace("chat_relay"),
    )
    .expect("Failed to create MESSAGES_SENT_TOTAL metric")
});

/// Per-recipient delivery attempts by outcome ("delivered", "departed")
pub static FANOUT_DELIVERIES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "fanout_deliveries_total",
            "Per-recipient delivery attempts by outcome",
        )
        .namespace("chat_relay"),
        &["outcome"],
    )
    .expect("Failed to create FANOUT_DELIVERIES_TOTAL metric")
});

/// Long-poll receive outcomes ("delivered", "timeout", "closed")
pub static RECEIVE_OUTCOMES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "receive_outcomes_total",
            "Long-poll receive outcomes by kind",
        )
        .namespace("chat_relay"),
        &["outcome"],
    )
    .expect("Failed to create RECEIVE_OUTCOMES_TOTAL metric")
});

/// Number of clients with a live session
pub static ACTIVE_CLIENTS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("active_clients", "Number of clients with a live session")
            .namespace("chat_relay"),
    )
    .expect("Failed to create ACTIVE_CLIENTS metric")
});

/// Number of rooms ever created (rooms are never destroyed)
pub static ACTIVE_ROOMS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("active_rooms", "Number of rooms created so far").namespace("chat_relay"),
    )
    .expect("Failed to create ACTIVE_ROOMS metric")
});

/// Register all metrics with the given registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(ROOM_JOINS_TOTAL.clone()))
        .expect("Failed to register ROOM_JOINS_TOTAL");
    registry
        .register(Box::new(MESSAGES_SENT_TOTAL.clone()))
        .expect("Failed to register MESSAGES_SENT_TOTAL");
    registry
        .register(Box::new(FANOUT_DELIVERIES_TOTAL.clone()))
        .expect("Failed to register FANOUT_DELIVERIES_TOTAL");
    registry
        .register(Box::new(RECEIVE_OUTCOMES_TOTAL.clone()))
        .expect("Failed to register RECEIVE_OUTCOMES_TOTAL");
    registry
        .register(Box::new(ACTIVE_CLIENTS.clone()))
        .expect("Failed to register ACTIVE_CLIENTS");
    registry
        .register(Box::new(ACTIVE_ROOMS.clone()))
        .expect("Failed to register ACTIVE_ROOMS");
}

/// Encode all registered metrics in the Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
