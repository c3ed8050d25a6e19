//! Performance metrics collection for the simulation.
//!
//! Tracks tick throughput and emits periodic structured logs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Tick counters shared between the runner and whoever reports on it.
pub struct Metrics {
    ticks: AtomicU64,
    paused_ticks: AtomicU64,
    perturbations: AtomicU64,
    busy_nanos: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    /// Creates a collector that logs every `log_interval` advanced ticks.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            ticks: AtomicU64::new(0),
            paused_ticks: AtomicU64::new(0),
            perturbations: AtomicU64::new(0),
            busy_nanos: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records an advanced tick with its duration.
    pub fn record_tick(&self, duration: Duration, perturbed: bool) {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        self.busy_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if perturbed {
            self.perturbations.fetch_add(1, Ordering::Relaxed);
        }

        if tick.is_multiple_of(self.log_interval) {
            tracing::info!(
                tick,
                duration_us = duration.as_micros() as u64,
                mean_us = self.mean_tick_time().as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn record_pause(&self) {
        self.paused_ticks.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn paused_count(&self) -> u64 {
        self.paused_ticks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn perturbation_count(&self) -> u64 {
        self.perturbations.load(Ordering::Relaxed)
    }

    /// Average wall time spent inside advanced ticks.
    #[must_use]
    pub fn mean_tick_time(&self) -> Duration {
        let ticks = self.tick_count();
        if ticks == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(self.busy_nanos.load(Ordering::Relaxed) / ticks)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
