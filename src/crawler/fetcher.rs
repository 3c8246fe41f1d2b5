//! HTTP transport for topic listing pages.
//!
//! One GET per (date, page) pair against the top-picks endpoint, with the
//! outcome classified for the pagination loop: page markup, a 404 marking
//! the end of the page range, or a fatal transport failure.
//!
//! The browser-like header set is part of the contract with the upstream:
//! without it Yahoo! serves degraded markup that doesn't carry the embedded
//! state blob. The values are fixed and sent on every request.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Production endpoint for the top-picks topic listing.
pub const TOPICS_ENDPOINT: &str = "https://news.yahoo.co.jp/topics/top-picks";

/// `accept` header value sent with every page request.
pub const ACCEPT_VALUE: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*";

/// `accept-language` header value sent with every page request.
pub const ACCEPT_LANGUAGE_VALUE: &str = "ja,en;q=0.9";

/// `user-agent` header value sent with every page request.
pub const USER_AGENT_VALUE: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/114.0.0.0 Safari/537.36";

/// Outcome of fetching a single listing page.
///
/// Exactly one variant per call. Only [`FetchOutcome::TransportError`] is
/// fatal to a run; the other two drive normal pagination.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A 2xx response; carries the page markup.
    Success(String),
    /// The upstream answered 404: the requested page is past the end of the
    /// date's range.
    NotFound,
    /// Connect/timeout/body failures, and any status that is neither 2xx
    /// nor 404.
    TransportError(Box<dyn Error + Send + Sync>),
}

/// Trait for fetching listing pages.
///
/// The pagination loop is written against this seam, so tests can drive it
/// with a scripted fetcher instead of the live endpoint.
pub trait FetchPage {
    /// Fetch one page of one date's listing.
    async fn fetch_page(&self, date: &str, page: u32) -> FetchOutcome;
}

/// HTTP client for the topic listing.
///
/// Carries a [`reqwest::Client`] configured with the fixed header set and a
/// per-request timeout, plus the endpoint requests are issued against.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: reqwest::Client,
    endpoint: Url,
}

impl PageFetcher {
    /// Create a fetcher against the production endpoint.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Per-request deadline covering connect through body read
    pub fn new(timeout: Duration) -> Result<Self, Box<dyn Error>> {
        Self::with_endpoint(TOPICS_ENDPOINT, timeout)
    }

    /// Create a fetcher against an arbitrary endpoint serving the same page
    /// shape.
    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: Url::parse(endpoint)?,
        })
    }

    /// Build the URL for one page of one date's listing.
    fn page_url(&self, date: &str, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("date", date)
            .append_pair("page", &page.to_string());
        url
    }
}

impl FetchPage for PageFetcher {
    #[instrument(level = "debug", skip_all, fields(date = %date, page = page))]
    async fn fetch_page(&self, date: &str, page: u32) -> FetchOutcome {
        let url = self.page_url(date, page);
        debug!(%url, "Requesting listing page");

        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::TransportError(Box::new(e)),
        };

        match response.status() {
            StatusCode::NOT_FOUND => FetchOutcome::NotFound,
            status if status.is_success() => match response.text().await {
                Ok(body) => FetchOutcome::Success(body),
                Err(e) => FetchOutcome::TransportError(Box::new(e)),
            },
            status => {
                FetchOutcome::TransportError(format!("unexpected status {status} for {url}").into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_page_url_query_pairs() {
        let fetcher =
            PageFetcher::with_endpoint("https://example.test/topics", Duration::from_secs(5))
                .unwrap();
        let url = fetcher.page_url("20240101", 2);

        assert_eq!(url.as_str(), "https://example.test/topics?date=20240101&page=2");
    }

    #[tokio::test]
    async fn test_page_url_against_production_endpoint() {
        let fetcher = PageFetcher::new(Duration::from_secs(5)).unwrap();
        let url = fetcher.page_url("20240315", 1);

        assert!(url.as_str().starts_with(TOPICS_ENDPOINT));
        assert_eq!(url.query(), Some("date=20240315&page=1"));
    }

    #[tokio::test]
    async fn test_rejects_unparseable_endpoint() {
        assert!(PageFetcher::with_endpoint("not a url", Duration::from_secs(5)).is_err());
    }

    /// Serve one canned HTTP response on a local port and return the
    /// endpoint to aim a fetcher at.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            // Drain the request headers before answering.
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/topics")
    }

    #[tokio::test]
    async fn test_fetch_page_maps_404_to_not_found() {
        let endpoint =
            serve_once("HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .await;
        let fetcher = PageFetcher::with_endpoint(&endpoint, Duration::from_secs(5)).unwrap();

        let outcome = fetcher.fetch_page("20240101", 99).await;

        assert!(matches!(outcome, FetchOutcome::NotFound));
    }

    #[tokio::test]
    async fn test_fetch_page_maps_other_statuses_to_transport_error() {
        let endpoint = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let fetcher = PageFetcher::with_endpoint(&endpoint, Duration::from_secs(5)).unwrap();

        match fetcher.fetch_page("20240101", 1).await {
            FetchOutcome::TransportError(e) => assert!(e.to_string().contains("500")),
            other => panic!("expected a transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_returns_body_on_success() {
        let endpoint = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-length: 19\r\nconnection: close\r\n\r\n<html>topics</html>",
        )
        .await;
        let fetcher = PageFetcher::with_endpoint(&endpoint, Duration::from_secs(5)).unwrap();

        match fetcher.fetch_page("20240101", 1).await {
            FetchOutcome::Success(body) => assert_eq!(body, "<html>topics</html>"),
            other => panic!("expected page markup, got {other:?}"),
        }
    }
}
