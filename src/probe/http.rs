// src/probe/http.rs
// =============================================================================
// The request executor: fetches one profile page over HTTP.
//
// Key functionality:
// - One GET per site, redirects followed, 30 second total timeout
// - A fixed User-Agent header on every request
// - Every network failure (timeout, DNS, TLS, refused connection...) is turned
//   into a FetchError value; nothing is raised past this module
//
// The executor sits behind the `Fetcher` trait so the coordinator can be
// driven by an in-memory fetcher in tests.
//
// Rust concepts:
// - Traits: a shared interface for the real and the test fetcher
// - async-trait: lets trait methods be async
// - thiserror: derive Display/Error for our error enum
// =============================================================================

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::ProbeConfig;

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// A completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Page text. Only downloaded for 200 responses, empty otherwise.
    pub body: String,
}

/// Why a fetch did not complete.
///
/// The Display text ends up as the `error_type` of the probe outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,
    #[error("Too many redirects")]
    TooManyRedirects,
    #[error("Could not resolve hostname")]
    Dns,
    #[error("SSL certificate error: {0}")]
    Tls(String),
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Other(String),
}

/// Something that can GET a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// The real fetcher, backed by a reqwest connection pool.
///
/// One HttpFetcher is created per investigation and dropped at the end of it.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(config.max_connections_per_host)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let response = self.client.get(url).send().await.map_err(categorize_error)?;
        let status = response.status();

        let body = if status == StatusCode::OK {
            response.text().await.map_err(categorize_error)?
        } else {
            String::new()
        };

        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}

// Sorts a reqwest error into one of our failure kinds
//
// reqwest's own message is often just "error sending request", the useful
// part (DNS, certificate...) lives further down the source chain. The URL is
// stripped first: it carries the username, which must not affect the kind.
fn categorize_error(error: reqwest::Error) -> FetchError {
    let error = error.without_url();
    let chain = error_chain(&error);
    let lower = chain.to_lowercase();
    let mentions_tls =
        lower.contains("certificate") || lower.contains("tls") || lower.contains("ssl");

    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_redirect() {
        FetchError::TooManyRedirects
    } else if error.is_builder() {
        FetchError::InvalidUrl(chain)
    } else if lower.contains("dns error") || lower.contains("failed to lookup address") {
        FetchError::Dns
    } else if mentions_tls {
        FetchError::Tls(chain)
    } else if error.is_connect() {
        FetchError::Connect(chain)
    } else {
        FetchError::Other(chain)
    }
}

// Joins an error and its sources: "outer: inner: innermost".
// hyper's messages already embed their cause, so a source whose text is part
// of the previous message is skipped.
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.last().is_some_and(|last| last.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[async_trait]?
//    - Rust traits cannot easily hold async fns that are used generically
//    - The macro rewrites them to return a boxed future
//
// 2. What does `?` do with map_err?
//    - map_err turns reqwest::Error into our FetchError
//    - `?` returns early with that error if there was one
//
// 3. What is error.source()?
//    - Errors can wrap other errors; source() gives the wrapped one
//    - Walking the chain finds messages like "dns error" hidden underneath
// -----------------------------------------------------------------------------
