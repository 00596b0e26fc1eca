//! Per-step wall-clock timings for one request.
//!
//! A disabled timer runs the closure and records nothing, so the request
//! path is the same with and without `--profile`.

use std::time::{Duration, Instant};

/// One measured pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTiming {
    pub step: &'static str,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineTimer {
    /// `None` while disabled
    steps: Option<Vec<StepTiming>>,
}

impl PipelineTimer {
    pub fn new(enabled: bool) -> Self {
        Self {
            steps: enabled.then(Vec::new),
        }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.steps.is_some()
    }

    pub fn measure<R>(&mut self, step: &'static str, f: impl FnOnce() -> R) -> R {
        let Some(steps) = self.steps.as_mut() else {
            return f();
        };

        let started = Instant::now();
        let result = f();
        let elapsed = started.elapsed();
        tracing::debug!(step, elapsed_us = elapsed.as_micros() as u64, "pipeline step");
        steps.push(StepTiming { step, elapsed });
        result
    }

    pub fn steps(&self) -> &[StepTiming] {
        self.steps.as_deref().unwrap_or(&[])
    }

    pub fn total(&self) -> Duration {
        self.steps().iter().map(|t| t.elapsed).sum()
    }

    /// Share of the total spent in `timing`, 0.0 to 100.0.
    pub fn percent_of_total(&self, timing: &StepTiming) -> f64 {
        let total = self.total().as_secs_f64();
        if total == 0.0 {
            0.0
        } else {
            timing.elapsed.as_secs_f64() / total * 100.0
        }
    }
}
