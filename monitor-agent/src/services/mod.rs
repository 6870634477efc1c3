pub mod cloudwatch;
pub mod drift;
pub mod log_store;
pub mod poller;
pub mod sink;
pub mod system;

pub use cloudwatch::CloudWatchSink;
pub use drift::DriftDetector;
pub use log_store::LogStore;
pub use poller::{ModelClient, Monitor};
pub use sink::{EventLevel, EventSink, TracingSink};
pub use system::SystemSampler;
