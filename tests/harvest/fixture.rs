// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local HTTP server standing in for remote sites

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware,
    response::{Html, IntoResponse, Redirect},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How long `/slow` waits before answering
pub const SLOW_DELAY: Duration = Duration::from_secs(3);

/// How long `/held/:n` keeps each request open
pub const HOLD_DELAY: Duration = Duration::from_millis(150);

/// Tracks requests in flight on `/held/:n` and the highest count seen
#[derive(Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

pub struct FixtureServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    in_flight: Arc<InFlight>,
}

impl FixtureServer {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let in_flight = Arc::new(InFlight::default());

        let app = Router::new()
            .route("/untitled", get(untitled))
            .route("/article", get(article))
            .route("/dupes/page", get(dupes))
            .route("/slow", get(slow))
            .route("/missing", get(missing))
            .route("/binary", get(binary))
            .route("/empty", get(empty))
            .route("/moved", get(moved))
            .route("/nested/page", get(nested))
            .route("/numbered/:n", get(numbered))
            .route("/shift-jis", get(shift_jis))
            .route("/held/:n", get(held))
            .layer(middleware::map_request_with_state(hits.clone(), count_hit))
            .with_state(in_flight.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            hits,
            in_flight,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Most `/held/:n` requests that were open at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.in_flight.peak.load(Ordering::SeqCst)
    }
}

async fn count_hit(State(hits): State<Arc<AtomicUsize>>, request: Request) -> Request {
    hits.fetch_add(1, Ordering::SeqCst);
    request
}

async fn untitled() -> Html<&'static str> {
    Html(
        r#"<html><body>
            <p>Untitled page body</p>
            <img src="/static/only.png" alt="only">
        </body></html>"#,
    )
}

async fn article() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
        <html>
        <head>
            <title>Fixture Article</title>
            <meta name="description" content="A fixture page">
            <meta property="og:image" content="/images/cover.jpg">
            <style>body { color: red; }</style>
            <script>var tracking = "should not appear";</script>
        </head>
        <body>
            <nav>Navigation links</nav>
            <main>
                <h2>Section heading</h2>
                <p>First paragraph of the article.</p>
                <img src="/images/cover.jpg">
                <img data-src="/images/lazy.png">
                <img data-lazy-src="https://cdn.example.com/lazy2.png">
                <img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=">
            </main>
        </body>
        </html>"#,
    )
}

async fn dupes() -> Html<&'static str> {
    Html(
        r#"<html><head><title>Dupes</title></head><body>
            <img src="img/a.png">
            <img src="./img/a.png">
            <img src="/dupes/img/a.png">
        </body></html>"#,
    )
}

async fn slow() -> Html<&'static str> {
    tokio::time::sleep(SLOW_DELAY).await;
    Html("<html><head><title>Too late</title></head><body>late</body></html>")
}

async fn missing() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html("<html><body>not here</body></html>"))
}

async fn binary() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/png")],
        vec![0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a],
    )
}

async fn empty() -> Html<&'static str> {
    Html("")
}

async fn moved() -> Redirect {
    Redirect::temporary("/nested/page")
}

async fn nested() -> Html<&'static str> {
    Html(
        r#"<html><head><title>Nested</title></head><body>
            <p>Moved content</p>
            <img src="pic.png">
        </body></html>"#,
    )
}

async fn numbered(axum::extract::Path(n): axum::extract::Path<u32>) -> Html<String> {
    // Later pages answer sooner so completion order differs from input order
    let delay = 200u64.saturating_sub(u64::from(n) * 40);
    tokio::time::sleep(Duration::from_millis(delay)).await;
    Html(format!(
        "<html><head><title>Page {}</title></head><body><p>number {}</p></body></html>",
        n, n
    ))
}

/// "日本語" encoded as Shift_JIS
pub const SHIFT_JIS_NIHONGO: [u8; 6] = [0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA];

/// Shift_JIS page whose charset is only declared in a meta tag
async fn shift_jis() -> impl IntoResponse {
    let mut body = b"<html><head><meta charset=\"shift_jis\"><title>".to_vec();
    body.extend_from_slice(&SHIFT_JIS_NIHONGO);
    body.extend_from_slice(b"</title></head><body><p>");
    body.extend_from_slice(&SHIFT_JIS_NIHONGO);
    body.extend_from_slice(b"</p></body></html>");
    ([(header::CONTENT_TYPE, "text/html")], body)
}

async fn held(State(in_flight): State<Arc<InFlight>>) -> Html<&'static str> {
    let now = in_flight.current.fetch_add(1, Ordering::SeqCst) + 1;
    in_flight.peak.fetch_max(now, Ordering::SeqCst);
    tokio::time::sleep(HOLD_DELAY).await;
    in_flight.current.fetch_sub(1, Ordering::SeqCst);
    Html("<html><head><title>Held</title></head><body><p>held</p></body></html>")
}
