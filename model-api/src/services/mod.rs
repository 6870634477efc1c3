pub mod metrics;
pub mod predictor;

pub use predictor::{round_to, SimulatedModel};
