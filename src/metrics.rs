//! Prometheus metrics for table operations
//!
//! Counters live in a crate-wide registry. `init_metrics` registers them
//! (safe to call more than once) and `export_metrics` renders the text
//! exposition format.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use tracing::{debug, error};

lazy_static::lazy_static! {
    /// Global metrics registry
    pub static ref METRICS_REGISTRY: Registry = Registry::new();

    pub static ref OPERATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("rollcall_operations_total", "Table operations by outcome"),
        &["op", "outcome"]
    ).unwrap();

    pub static ref PROBE_ATTEMPTS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "rollcall_probe_attempts",
            "Probe attempts spent per operation"
        ).buckets(vec![1.0, 2.0, 3.0, 5.0, 8.0, 15.0])
    ).unwrap();

    pub static ref OCCUPIED_SLOTS: IntGauge = IntGauge::new(
        "rollcall_occupied_slots",
        "Slots currently holding a live record"
    ).unwrap();
}

/// Register all metrics with the global registry
pub fn init_metrics() {
    // Re-registration fails with AlreadyReg; ignoring it keeps this idempotent
    METRICS_REGISTRY.register(Box::new(OPERATIONS_TOTAL.clone())).ok();
    METRICS_REGISTRY.register(Box::new(PROBE_ATTEMPTS.clone())).ok();
    METRICS_REGISTRY.register(Box::new(OCCUPIED_SLOTS.clone())).ok();
    debug!("Metrics registered");
}

/// Record the outcome of one table operation
pub(crate) fn record_operation(op: &str, outcome: &str, attempts: usize) {
    OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
    PROBE_ATTEMPTS.observe(attempts as f64);
}

/// Publish the live record count of the table a session owns
pub(crate) fn set_occupied(count: usize) {
    OCCUPIED_SLOTS.set(count as i64);
}

/// Export all metrics in Prometheus text format
pub fn export_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|_| String::from("# Error converting metrics\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_registered_metrics() {
        init_metrics();
        init_metrics();
        record_operation("insert", "ok", 1);

        let text = export_metrics();
        assert!(text.contains("rollcall_operations_total"));
        assert!(text.contains("rollcall_probe_attempts"));
    }
}
