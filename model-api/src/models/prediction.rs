use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label returned by the simulated model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Negative => "negative",
        }
    }

    /// Pick either label with equal probability.
    pub fn random() -> Self {
        if rand::thread_rng().gen_bool(0.5) {
            Label::Positive
        } else {
            Label::Negative
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a `POST /predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Label,
    /// Seconds spent handling the request, rounded to 4 decimals.
    pub response_time: f64,
}
