pub mod prediction;

pub use prediction::{Label, PredictionResult};
