use rand_core::{OsRng, RngCore};
use tokio::time::{sleep, Duration};
use tracing::warn;

use crate::error::AppError;

/// Artificial latency and failure injected in front of actions that a real backend would
/// serve over the network. `delay_ms = 0, failure_rate = 0` makes it a no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkSimulator {
    pub delay_ms: u64,
    pub failure_rate: f64,
}

impl NetworkSimulator {
    pub fn new(delay_ms: u64, failure_rate: f64) -> Self {
        Self {
            delay_ms,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    pub fn disabled() -> Self {
        Self::new(0, 0.0)
    }

    pub async fn run(&self, operation: &str) -> Result<(), AppError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }

        if self.should_fail() {
            warn!(operation, failure_rate = self.failure_rate, "simulated network failure");
            return Err(AppError::SimulatedNetwork {
                operation: operation.to_string(),
            });
        }

        Ok(())
    }

    fn should_fail(&self) -> bool {
        if self.failure_rate <= 0.0 {
            return false;
        }
        self.fails_on(unit_draw())
    }

    /// `draw` is uniform in `[0, 1)`; the call fails when it lands below the rate.
    fn fails_on(&self, draw: f64) -> bool {
        draw < self.failure_rate
    }
}

/// Uniform sample in `[0, 1)` built from the top 53 bits of an OS random word.
fn unit_draw() -> f64 {
    (OsRng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

impl Default for NetworkSimulator {
    fn default() -> Self {
        Self::disabled()
    }
}
