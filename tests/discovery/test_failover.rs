// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use async_trait::async_trait;
use fabstir_harvest::discovery::{DiscoveryError, DiscoveryService, StaticDiscovery, UrlDiscovery};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Provider that records calls and answers with a canned outcome
struct ScriptedDiscovery {
    name: &'static str,
    priority: u8,
    urls: Option<Vec<String>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedDiscovery {
    fn failing(name: &'static str, priority: u8, calls: Arc<AtomicUsize>) -> Self {
        Self {
            name,
            priority,
            urls: None,
            calls,
        }
    }

    fn returning(name: &'static str, priority: u8, urls: &[&str], calls: Arc<AtomicUsize>) -> Self {
        Self {
            name,
            priority,
            urls: Some(urls.iter().map(|u| u.to_string()).collect()),
            calls,
        }
    }
}

#[async_trait]
impl UrlDiscovery for ScriptedDiscovery {
    async fn discover(&self, _query: &str, limit: usize) -> Result<Vec<String>, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.urls {
            Some(urls) => Ok(urls.iter().take(limit).cloned().collect()),
            None => Err(DiscoveryError::Timeout {
                provider: self.name.to_string(),
                timeout_ms: 10,
            }),
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

#[tokio::test]
async fn test_first_non_empty_provider_wins() {
    let primary_calls = Arc::new(AtomicUsize::new(0));
    let secondary_calls = Arc::new(AtomicUsize::new(0));

    let service = DiscoveryService::new(vec![
        Box::new(ScriptedDiscovery::returning(
            "secondary",
            90,
            &["https://secondary.test/"],
            secondary_calls.clone(),
        )),
        Box::new(ScriptedDiscovery::returning(
            "primary",
            10,
            &["https://primary.test/a", "https://primary.test/b"],
            primary_calls.clone(),
        )),
    ]);

    let urls = service.discover("topic", 5).await.unwrap();
    assert_eq!(urls, vec!["https://primary.test/a", "https://primary.test/b"]);
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failover_after_error_and_empty() {
    let calls = Arc::new(AtomicUsize::new(0));

    let service = DiscoveryService::new(vec![
        Box::new(ScriptedDiscovery::failing("broken", 10, calls.clone())),
        Box::new(ScriptedDiscovery::returning("empty", 20, &[], calls.clone())),
        Box::new(ScriptedDiscovery::returning(
            "working",
            30,
            &["https://working.test/"],
            calls.clone(),
        )),
    ]);

    let urls = service.discover("topic", 5).await.unwrap();
    assert_eq!(urls, vec!["https://working.test/"]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_all_errors_surface_as_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = DiscoveryService::new(vec![
        Box::new(ScriptedDiscovery::failing("a", 10, calls.clone())),
        Box::new(ScriptedDiscovery::failing("b", 20, calls.clone())),
    ]);

    let result = service.discover("topic", 5).await;
    assert!(matches!(result, Err(DiscoveryError::AllProvidersFailed)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_static_fallback_in_service() {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = DiscoveryService::new(vec![
        Box::new(ScriptedDiscovery::failing("remote", 10, calls)),
        Box::new(StaticDiscovery::samples()),
    ]);

    assert_eq!(service.available_providers(), vec!["remote", "static"]);
    let urls = service.discover("anything", 2).await.unwrap();
    assert_eq!(urls.len(), 2);
}
