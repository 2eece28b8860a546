use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub bookings_total: IntCounterVec,
    pub status_transitions_total: IntCounterVec,
    pub settlements_total: IntCounter,
    pub settlement_amount: Histogram,
    pub simulated_failures_total: IntCounterVec,
    pub active_jobs: IntGauge,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let bookings_total = IntCounterVec::new(
            Opts::new("bookings_total", "Booking decisions by outcome"),
            &["outcome"],
        )
        .expect("valid bookings_total metric");

        let status_transitions_total = IntCounterVec::new(
            Opts::new("status_transitions_total", "Job status changes by target status"),
            &["status"],
        )
        .expect("valid status_transitions_total metric");

        let settlements_total = IntCounter::new("settlements_total", "Jobs settled")
            .expect("valid settlements_total metric");

        let settlement_amount = Histogram::with_opts(
            HistogramOpts::new("settlement_amount", "Payable amount of settled jobs").buckets(
                vec![50.0, 100.0, 250.0, 500.0, 1_000.0, 2_500.0, 5_000.0, 10_000.0],
            ),
        )
        .expect("valid settlement_amount metric");

        let simulated_failures_total = IntCounterVec::new(
            Opts::new(
                "simulated_failures_total",
                "Injected network failures by operation",
            ),
            &["operation"],
        )
        .expect("valid simulated_failures_total metric");

        let active_jobs = IntGauge::new("active_jobs", "Jobs currently being fulfilled or settled")
            .expect("valid active_jobs metric");

        registry
            .register(Box::new(bookings_total.clone()))
            .expect("register bookings_total");
        registry
            .register(Box::new(status_transitions_total.clone()))
            .expect("register status_transitions_total");
        registry
            .register(Box::new(settlements_total.clone()))
            .expect("register settlements_total");
        registry
            .register(Box::new(settlement_amount.clone()))
            .expect("register settlement_amount");
        registry
            .register(Box::new(simulated_failures_total.clone()))
            .expect("register simulated_failures_total");
        registry
            .register(Box::new(active_jobs.clone()))
            .expect("register active_jobs");

        Self {
            registry,
            bookings_total,
            status_transitions_total,
            settlements_total,
            settlement_amount,
            simulated_failures_total,
            active_jobs,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
