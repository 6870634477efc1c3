//! Drift detection over a sliding window of recent predictions.

use crate::config::DriftConfig;
use crate::models::DriftMetrics;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct DriftDetector {
    config: DriftConfig,
    window: VecDeque<String>,
    metrics: DriftMetrics,
}

impl DriftDetector {
    pub fn new(config: DriftConfig) -> Self {
        Self {
            window: VecDeque::with_capacity(config.window_size),
            config,
            metrics: DriftMetrics::default(),
        }
    }

    /// Latest computed metrics.
    pub fn metrics(&self) -> DriftMetrics {
        self.metrics
    }

    /// Number of label flips needed within the window to flag drift.
    pub fn flip_threshold(&self) -> usize {
        (self.config.window_size as f64 * self.config.drift_threshold).floor() as usize
    }

    /// Feed one observation. Returns the metrics when drift is detected.
    ///
    /// `confidence` is only checked when the model reported one.
    pub fn observe(
        &mut self,
        prediction: &str,
        confidence: Option<f64>,
        response_time: f64,
    ) -> Option<DriftMetrics> {
        self.window.push_back(prediction.to_string());
        while self.window.len() > self.config.window_size {
            self.window.pop_front();
        }

        let flips = self
            .window
            .iter()
            .zip(self.window.iter().skip(1))
            .filter(|(prev, next)| prev != next)
            .count();

        let confidence_drop = match confidence {
            Some(c) if c < self.config.confidence_threshold => {
                self.config.confidence_threshold - c
            }
            _ => 0.0,
        };

        let response_time_spike = if response_time > self.config.max_response_time_secs {
            response_time - self.config.max_response_time_secs
        } else {
            0.0
        };

        self.metrics = DriftMetrics {
            prediction_changes: flips,
            confidence_drop,
            response_time_spike,
        };

        let drifted = flips >= self.flip_threshold()
            || confidence_drop > 0.0
            || response_time_spike > 0.0;

        drifted.then_some(self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> DriftDetector {
        DriftDetector::new(DriftConfig::default())
    }

    #[test]
    fn stable_predictions_do_not_drift() {
        let mut detector = detector();
        for _ in 0..20 {
            assert!(detector.observe("positive", None, 0.3).is_none());
        }
        assert_eq!(detector.metrics().prediction_changes, 0);
    }

    #[test]
    fn alternating_predictions_drift_once_threshold_reached() {
        let mut detector = detector();
        assert_eq!(detector.flip_threshold(), 5);

        let labels = ["positive", "negative"];
        let mut first_drift = None;
        for i in 0..10 {
            if detector.observe(labels[i % 2], None, 0.3).is_some() && first_drift.is_none() {
                first_drift = Some(i);
            }
        }

        // Five flips need six observations.
        assert_eq!(first_drift, Some(5));
        assert_eq!(detector.metrics().prediction_changes, 9);
    }

    #[test]
    fn window_only_counts_recent_flips() {
        let mut detector = detector();
        for label in ["positive", "negative", "positive", "negative"] {
            detector.observe(label, None, 0.3);
        }
        for _ in 0..10 {
            detector.observe("negative", None, 0.3);
        }
        assert_eq!(detector.metrics().prediction_changes, 0);
    }

    #[test]
    fn low_confidence_is_reported() {
        let mut detector = detector();
        let report = detector.observe("positive", Some(0.6), 0.3).unwrap();
        assert!((report.confidence_drop - 0.2).abs() < 1e-9);
        assert_eq!(report.response_time_spike, 0.0);
    }

    #[test]
    fn missing_confidence_is_not_a_drop() {
        let mut detector = detector();
        assert!(detector.observe("positive", None, 0.3).is_none());
        assert_eq!(detector.metrics().confidence_drop, 0.0);
    }

    #[test]
    fn slow_response_is_reported_and_clears_afterwards() {
        let mut detector = detector();
        let report = detector.observe("positive", None, 1.5).unwrap();
        assert!((report.response_time_spike - 0.5).abs() < 1e-9);

        assert!(detector.observe("positive", None, 0.2).is_none());
        assert_eq!(detector.metrics().response_time_spike, 0.0);
    }
}
