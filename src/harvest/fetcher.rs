//! Concurrent page fetching with per-request timeouts
//!
//! Every URL gets its own task. Failures of any kind are turned into
//! [`FetchResult`] values so one bad site never affects its siblings.

use encoding_rs::{Encoding, UTF_8};
use futures::stream::{FuturesUnordered, StreamExt};
use regex::bytes::Regex;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, DNT, UPGRADE_INSECURE_REQUESTS,
};
use reqwest::Client;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

use super::config::HarvestConfig;
use super::extractor::PageExtractor;
use super::types::{FailureKind, FetchOutcome, FetchResult, HarvestError};

const ACCEPT_MARKUP: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// How far into a body to look for a `<meta>` charset declaration
const META_SNIFF_BYTES: usize = 1024;

/// Fetches a batch of URLs concurrently and extracts each page
pub struct FetchExecutor {
    client: Client,
    extractor: Arc<PageExtractor>,
    config: HarvestConfig,
}

impl FetchExecutor {
    /// Create a new executor
    ///
    /// The HTTP client and its connection pool are built once here and
    /// shared by every task of every batch.
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        config.validate().map_err(HarvestError::InvalidConfig)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MARKUP));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .map_err(|e| HarvestError::InvalidConfig(format!("accept_language: {}", e)))?,
        );
        headers.insert(DNT, HeaderValue::from_static("1"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .pool_max_idle_per_host(config.effective_concurrency(usize::MAX))
            .build()
            .map_err(|e| HarvestError::Client(e.to_string()))?;

        Ok(Self {
            client,
            extractor: Arc::new(PageExtractor::new()),
            config,
        })
    }

    /// Fetch and extract every URL in `urls`
    ///
    /// Resolves once every task has finished. The returned vector has one
    /// entry per input URL, in input order, whatever order tasks complete in.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<FetchResult> {
        if urls.is_empty() {
            return Vec::new();
        }

        let concurrency = self.config.effective_concurrency(urls.len());
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let timeout = Duration::from_millis(self.config.request_timeout_ms);

        info!(
            "Fetching {} URLs (concurrency {}, timeout {}ms)",
            urls.len(),
            concurrency,
            self.config.request_timeout_ms
        );

        let mut tasks = FuturesUnordered::new();
        for (index, url) in urls.iter().enumerate() {
            let client = self.client.clone();
            let extractor = Arc::clone(&self.extractor);
            let semaphore = Arc::clone(&semaphore);
            let url = url.clone();

            let handle = tokio::spawn(async move {
                // The timeout starts after the permit so queued tasks are not penalised
                let _permit = semaphore.acquire().await.ok();
                fetch_one(&client, &extractor, &url, timeout).await
            });
            tasks.push(async move { (index, handle.await) });
        }

        let mut slots: Vec<Option<FetchResult>> = (0..urls.len()).map(|_| None).collect();
        while let Some((index, joined)) = tasks.next().await {
            let result = joined.unwrap_or_else(|e| {
                warn!("Fetch task for {} aborted: {}", urls[index], e);
                FetchResult::failed(
                    urls[index].as_str(),
                    FailureKind::TransportError,
                    format!("fetch task aborted: {}", e),
                )
            });
            slots[index] = Some(result);
        }

        slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| {
                slot.unwrap_or_else(|| {
                    FetchResult::failed(
                        url.as_str(),
                        FailureKind::TransportError,
                        "fetch task produced no result",
                    )
                })
            })
            .collect()
    }

    /// Get the configuration
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }
}

/// Fetch one URL and turn the response into a result
async fn fetch_one(
    client: &Client,
    extractor: &PageExtractor,
    url: &str,
    timeout: Duration,
) -> FetchResult {
    debug!("Fetching content from: {}", url);

    let (outcome, final_url) = match tokio::time::timeout(timeout, retrieve(client, url)).await {
        Ok(retrieved) => retrieved,
        Err(_) => (
            FetchOutcome::failure(
                FailureKind::Timeout,
                format!("no response within {}ms", timeout.as_millis()),
            ),
            None,
        ),
    };

    match outcome {
        FetchOutcome::Success {
            status_code,
            raw_body,
        } => {
            let base = match final_url.or_else(|| Url::parse(url).ok()) {
                Some(base) => base,
                None => {
                    return FetchResult::failed(url, FailureKind::TransportError, "invalid URL")
                }
            };
            match extractor.extract(&raw_body, &base) {
                Ok(page) => {
                    info!(
                        "Extracted {} chars and {} images from: {}",
                        page.text.chars().count(),
                        page.images.len(),
                        url
                    );
                    FetchResult::extracted(url, status_code, page)
                }
                Err(e) => {
                    warn!("Extraction failed for {}: {}", url, e);
                    FetchResult::failed(url, FailureKind::TransportError, e.to_string())
                }
            }
        }
        FetchOutcome::Failure { kind, message } => {
            warn!("Fetch failed for {}: {} ({})", url, kind, message);
            FetchResult::failed(url, kind, message)
        }
    }
}

/// Network part of a fetch: request, status check, body read
///
/// Also returns the final URL after redirects, which is the base for
/// relative references on the page.
async fn retrieve(client: &Client, url: &str) -> (FetchOutcome, Option<Url>) {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return (classify(&e), None),
    };

    let status = response.status();
    if !status.is_success() {
        return (
            FetchOutcome::failure(FailureKind::HttpError, format!("HTTP {}", status.as_u16())),
            None,
        );
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if let Some(content_type) = content_type.as_deref() {
        if !is_markup_content_type(content_type) {
            return (
                FetchOutcome::failure(
                    FailureKind::TransportError,
                    format!("Unsupported content type: {}", content_type),
                ),
                None,
            );
        }
    }

    let final_url = response.url().clone();
    match response.bytes().await {
        Ok(bytes) => (
            FetchOutcome::Success {
                status_code: status.as_u16(),
                raw_body: decode_body(&bytes, content_type.as_deref()),
            },
            Some(final_url),
        ),
        Err(e) => (classify(&e), None),
    }
}

/// Decode a response body to text
///
/// Charset precedence: byte order mark, `Content-Type` header, then a
/// `<meta>` declaration near the start of the document. Falls back to UTF-8.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(header_charset)
        .or_else(|| sniff_meta_charset(bytes))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        debug!("Lossy decode of response body as {}", used.name());
    }
    text.into_owned()
}

fn header_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string())
        } else {
            None
        }
    })
}

fn meta_charset_pattern() -> &'static Regex {
    static META_CHARSET: OnceLock<Regex> = OnceLock::new();
    META_CHARSET.get_or_init(|| {
        Regex::new(r#"(?i-u)<meta[^>]*?charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
            .expect("valid pattern")
    })
}

/// Charset label declared by `<meta charset>` or `http-equiv` in the first 1 KiB
pub fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_BYTES)];
    meta_charset_pattern()
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|label| String::from_utf8_lossy(label.as_bytes()).into_owned())
}

fn classify(error: &reqwest::Error) -> FetchOutcome {
    if error.is_timeout() {
        FetchOutcome::failure(FailureKind::Timeout, error.to_string())
    } else {
        FetchOutcome::failure(FailureKind::TransportError, error.to_string())
    }
}

/// True for content types the extractor can read as markup
pub fn is_markup_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();
    essence.starts_with("text/") || essence.contains("html") || essence.contains("xml")
}
