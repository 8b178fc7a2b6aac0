// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use fabstir_harvest::harvest::{FetchExecutor, HarvestConfig};

use super::fixture::FixtureServer;

async fn fetch_page(server: &FixtureServer, path: &str) -> fabstir_harvest::ExtractedPage {
    let executor = FetchExecutor::new(HarvestConfig::default()).unwrap();
    let mut results = executor.fetch_all(&[server.url(path)]).await;
    let result = results.remove(0);
    result.page().cloned().expect("page should be extracted")
}

#[tokio::test]
async fn test_relative_duplicates_collapse() {
    let server = FixtureServer::start().await;
    let page = fetch_page(&server, "/dupes/page").await;

    assert_eq!(page.images, vec![server.url("/dupes/img/a.png")]);
}

#[tokio::test]
async fn test_article_extraction() {
    let server = FixtureServer::start().await;
    let page = fetch_page(&server, "/article").await;

    assert_eq!(page.title, "Fixture Article");
    assert_eq!(page.description, "A fixture page");
    assert!(page
        .text
        .starts_with("# Fixture Article\n\n**Description**: A fixture page\n\n"));
    assert!(page.text.contains("First paragraph of the article."));
    assert!(page.text.contains("Section heading"));
    assert!(!page.text.contains("tracking"));
    assert!(!page.text.contains("color: red"));
    // <main> wins over the rest of <body>
    assert!(!page.text.contains("Navigation links"));
}

#[tokio::test]
async fn test_article_images_with_primary_image_once() {
    let server = FixtureServer::start().await;
    let page = fetch_page(&server, "/article").await;

    assert_eq!(
        page.images,
        vec![
            server.url("/images/cover.jpg"),
            server.url("/images/lazy.png"),
            "https://cdn.example.com/lazy2.png".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_meta_declared_charset_is_decoded() {
    let server = FixtureServer::start().await;
    let page = fetch_page(&server, "/shift-jis").await;

    assert_eq!(page.title, "日本語");
    assert!(page.text.starts_with("# 日本語\n\n"));
    assert!(page.text.contains("日本語"));
    assert!(!page.text.contains('\u{FFFD}'));
}
