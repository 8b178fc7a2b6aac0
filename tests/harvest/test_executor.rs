// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use fabstir_harvest::harvest::config::DEFAULT_CONCURRENCY_CAP;
use fabstir_harvest::harvest::{FailureKind, FetchExecutor, HarvestConfig};

use super::fixture::FixtureServer;

fn executor(timeout_ms: u64) -> FetchExecutor {
    FetchExecutor::new(HarvestConfig {
        request_timeout_ms: timeout_ms,
        ..HarvestConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_timeout_isolated_from_siblings() {
    let server = FixtureServer::start().await;
    let urls = vec![server.url("/untitled"), server.url("/slow")];

    let results = executor(300).fetch_all(&urls).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].url(), urls[0]);
    assert_eq!(results[1].url(), urls[1]);

    let first = results[0].page().expect("first URL should succeed");
    assert_eq!(results[0].status_code(), Some(200));
    assert!(first.text.starts_with("# No Title\n\n"));
    assert!(first.text.contains("Untitled page body"));
    assert_eq!(first.images, vec![server.url("/static/only.png")]);

    assert_eq!(results[1].failure_kind(), Some(FailureKind::Timeout));
    assert_eq!(results.iter().filter(|r| r.is_success()).count(), 1);
}

#[tokio::test]
async fn test_results_keep_input_order() {
    let server = FixtureServer::start().await;
    let urls: Vec<String> = (1..=5).map(|n| server.url(&format!("/numbered/{}", n))).collect();

    let results = executor(5_000).fetch_all(&urls).await;

    assert_eq!(results.len(), urls.len());
    for (n, (result, url)) in results.iter().zip(&urls).enumerate() {
        assert_eq!(result.url(), url);
        let page = result.page().expect("numbered page should succeed");
        assert_eq!(page.title, format!("Page {}", n + 1));
    }
}

#[tokio::test]
async fn test_http_error_status() {
    let server = FixtureServer::start().await;
    let results = executor(5_000).fetch_all(&[server.url("/missing")]).await;

    assert_eq!(results[0].failure_kind(), Some(FailureKind::HttpError));
    assert_eq!(results[0].failure_message(), Some("HTTP 404"));
    assert!(results[0].status_code().is_none());
}

#[tokio::test]
async fn test_non_markup_and_empty_bodies_are_transport_errors() {
    let server = FixtureServer::start().await;
    let urls = vec![server.url("/binary"), server.url("/empty")];
    let results = executor(5_000).fetch_all(&urls).await;

    for result in &results {
        assert_eq!(result.failure_kind(), Some(FailureKind::TransportError));
    }
    assert!(results[0]
        .failure_message()
        .unwrap()
        .contains("image/png"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let results = executor(2_000)
        .fetch_all(&[format!("http://{}/", addr)])
        .await;
    assert_eq!(results[0].failure_kind(), Some(FailureKind::TransportError));
}

#[tokio::test]
async fn test_redirect_target_is_image_base() {
    let server = FixtureServer::start().await;
    let results = executor(5_000).fetch_all(&[server.url("/moved")]).await;

    assert_eq!(results[0].url(), server.url("/moved"));
    let page = results[0].page().expect("redirected page should succeed");
    assert_eq!(page.title, "Nested");
    assert_eq!(page.images, vec![server.url("/nested/pic.png")]);
}

#[tokio::test]
async fn test_timeout_starts_after_permit() {
    let server = FixtureServer::start().await;
    // Serially these take longer than the timeout, individually they do not
    let urls: Vec<String> = (1..=3).map(|n| server.url(&format!("/numbered/{}", n))).collect();
    let executor = FetchExecutor::new(HarvestConfig {
        request_timeout_ms: 300,
        max_concurrency: Some(1),
        ..HarvestConfig::default()
    })
    .unwrap();

    let results = executor.fetch_all(&urls).await;
    assert!(results.iter().all(|r| r.is_success()));
}

fn held_urls(server: &FixtureServer, count: usize) -> Vec<String> {
    (1..=count).map(|n| server.url(&format!("/held/{}", n))).collect()
}

#[tokio::test]
async fn test_explicit_cap_bounds_in_flight_requests() {
    let server = FixtureServer::start().await;
    let executor = FetchExecutor::new(HarvestConfig {
        request_timeout_ms: 5_000,
        max_concurrency: Some(2),
        ..HarvestConfig::default()
    })
    .unwrap();

    let results = executor.fetch_all(&held_urls(&server, 6)).await;

    assert!(results.iter().all(|r| r.is_success()));
    assert!(server.peak_in_flight() >= 1);
    assert!(server.peak_in_flight() <= 2, "peak {}", server.peak_in_flight());
}

#[tokio::test]
async fn test_large_batch_uses_default_cap() {
    let server = FixtureServer::start().await;
    let urls = held_urls(&server, 12);

    let results = executor(5_000).fetch_all(&urls).await;

    assert_eq!(results.len(), 12);
    assert!(results.iter().all(|r| r.is_success()));
    assert!(
        server.peak_in_flight() <= DEFAULT_CONCURRENCY_CAP,
        "peak {}",
        server.peak_in_flight()
    );
}

#[tokio::test]
async fn test_small_batch_runs_concurrently() {
    let server = FixtureServer::start().await;
    let results = executor(5_000).fetch_all(&held_urls(&server, 4)).await;

    assert!(results.iter().all(|r| r.is_success()));
    assert!(server.peak_in_flight() >= 2, "peak {}", server.peak_in_flight());
}
