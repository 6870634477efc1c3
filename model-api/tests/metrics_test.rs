mod common;

use common::TestApp;
use reqwest::Client;

#[tokio::test]
async fn unknown_paths_share_one_metrics_series() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    for i in 0..20 {
        let response = client
            .get(&format!("{}/junk-{}", app.address, i))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    let metrics = client
        .get(&format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .unwrap();

    assert!(!metrics.contains("junk-"), "raw paths leaked into labels");

    let not_found_series: Vec<&str> = metrics
        .lines()
        .filter(|line| line.starts_with("http_requests_total{"))
        .filter(|line| line.contains("status=\"404\""))
        .collect();
    assert_eq!(not_found_series.len(), 1, "{not_found_series:?}");
    assert!(not_found_series[0].ends_with(" 20"), "{}", not_found_series[0]);
}

#[tokio::test]
async fn matched_routes_are_labelled_by_template() {
    let app = TestApp::spawn().await;
    let client = Client::new();

    client
        .get(&format!("{}/health?verbose=1", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    let metrics = client
        .get(&format!("{}/metrics", app.address))
        .send()
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .unwrap();

    assert!(metrics
        .lines()
        .any(|line| line.starts_with("http_requests_total{") && line.contains("path=\"/health\"")));
}
