//! Simulated inference.
//!
//! There is no model behind this service: each prediction waits for a random
//! delay inside the configured latency window and then returns a random label.

use crate::config::LatencyConfig;
use crate::models::{Label, PredictionResult};
use rand::Rng;
use service_core::error::AppError;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct SimulatedModel {
    latency: LatencyConfig,
}

impl SimulatedModel {
    /// Fails unless `0 <= min_secs <= max_secs`.
    pub fn new(latency: LatencyConfig) -> Result<Self, AppError> {
        latency.validate()?;
        Ok(Self { latency })
    }

    pub fn latency(&self) -> LatencyConfig {
        self.latency
    }

    /// Run one simulated inference.
    ///
    /// The wait yields to the runtime, so concurrent requests overlap instead
    /// of queueing behind each other.
    pub async fn predict(&self) -> PredictionResult {
        let start = Instant::now();

        tokio::time::sleep(self.sample_delay()).await;

        let prediction = Label::random();
        let response_time = round_to(start.elapsed().as_secs_f64(), 4);

        PredictionResult {
            prediction,
            response_time,
        }
    }

    fn sample_delay(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.latency.min_secs..=self.latency.max_secs);
        Duration::from_secs_f64(secs)
    }
}

/// Round `value` to `decimals` places, halves away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_model() -> SimulatedModel {
        SimulatedModel::new(LatencyConfig {
            min_secs: 0.01,
            max_secs: 0.02,
        })
        .unwrap()
    }

    #[test]
    fn new_rejects_inverted_window() {
        let result = SimulatedModel::new(LatencyConfig {
            min_secs: 0.5,
            max_secs: 0.1,
        });
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn new_rejects_negative_bound() {
        let result = SimulatedModel::new(LatencyConfig {
            min_secs: -0.2,
            max_secs: 0.1,
        });
        assert!(result.is_err());
    }

    #[test]
    fn round_to_four_decimals() {
        assert_eq!(round_to(0.324_149, 4), 0.3241);
        assert_eq!(round_to(0.324_16, 4), 0.3242);
        assert_eq!(round_to(0.1, 4), 0.1);
    }

    #[test]
    fn sampled_delay_stays_in_window() {
        let model = fast_model();
        for _ in 0..1_000 {
            let delay = model.sample_delay().as_secs_f64();
            assert!((0.01..=0.02).contains(&delay), "delay {delay} out of range");
        }
    }

    #[tokio::test]
    async fn predict_reports_elapsed_time_at_least_the_minimum() {
        let result = fast_model().predict().await;

        assert!(result.response_time >= 0.01);
        assert!(result.response_time < 1.0);
        assert_eq!(round_to(result.response_time, 4), result.response_time);
    }

    #[tokio::test]
    async fn concurrent_predictions_overlap() {
        let model = SimulatedModel::new(LatencyConfig {
            min_secs: 0.2,
            max_secs: 0.2,
        })
        .unwrap();

        let start = Instant::now();
        let results = tokio::join!(model.predict(), model.predict(), model.predict());
        let elapsed = start.elapsed().as_secs_f64();

        for result in [results.0, results.1, results.2] {
            assert!(result.response_time >= 0.2);
        }
        assert!(elapsed < 0.55, "predictions ran sequentially: {elapsed}s");
    }
}
