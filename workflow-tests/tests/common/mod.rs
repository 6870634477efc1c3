//! Common test utilities for workflow integration tests.

use std::time::Duration;
use workflow_tests::ServiceStack;

/// Poll often so tests see several rounds quickly.
pub const POLLING_INTERVAL: Duration = Duration::from_millis(100);

pub async fn setup() -> ServiceStack {
    ServiceStack::spawn(POLLING_INTERVAL)
        .await
        .expect("Failed to start services")
}
