//! Product catalog client
//!
//! Fetches products and categories from a Fake Store style REST API. Every
//! call is bounded by a deadline measured from the start of the call.

use crate::error::{CatalogResource, FetchError};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

/// Catalog origin used when no other base URL is configured
pub const API_BASE_URL: &str = "https://fakestoreapi.com";

/// Per-request deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

// ==================== Data Model ====================

/// Catalog product as returned by the API
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    /// Image URL
    pub image: String,
    pub rating: Rating,
}

/// Aggregate customer rating
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Rating {
    /// Average score, 0 to 5
    pub rate: f64,
    /// Number of ratings
    pub count: u64,
}

/// One glyph of a five-star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Star {
    Full,
    Half,
    Empty,
}

impl Star {
    pub fn glyph(&self) -> char {
        match self {
            Star::Full => '★',
            Star::Half | Star::Empty => '☆',
        }
    }
}

/// Five stars for a rating: full stars for the whole part, one half star for
/// any fractional part, empty stars for the rest
pub fn star_rating(rate: f64) -> [Star; 5] {
    let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 5.0) };
    let full = rate.floor() as usize;
    let half = rate.fract() > 0.0;

    let mut stars = [Star::Empty; 5];
    for (i, star) in stars.iter_mut().enumerate() {
        if i < full {
            *star = Star::Full;
        } else if i == full && half {
            *star = Star::Half;
        }
    }
    stars
}

/// Format a price in US dollars with thousands separators
pub fn format_price(price: f64) -> String {
    let cents = (price.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if price < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Truncate to at most `max` characters, marking the cut with an ellipsis
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

impl Product {
    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }

    pub fn stars(&self) -> [Star; 5] {
        star_rating(self.rating.rate)
    }

    /// Star glyphs as a string
    pub fn star_glyphs(&self) -> String {
        self.stars().iter().map(Star::glyph).collect()
    }

    /// Description clipped for a card
    pub fn short_description(&self, max: usize) -> String {
        truncate_chars(&self.description, max)
    }
}

// ==================== HTTP ====================

/// HTTP response abstraction for testing
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP headers type
pub type Headers = Vec<(String, String)>;

/// Trait for HTTP operations (allows mocking)
#[cfg_attr(test, automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request
    ///
    /// Non-success statuses are returned as responses, not errors.
    fn get(&self, url: &str, headers: Headers, timeout: Duration) -> Result<HttpResponse>;
}

/// Real HTTP client using ureq
#[derive(Default)]
pub struct UreqHttpClient;

impl HttpClient for UreqHttpClient {
    fn get(&self, url: &str, headers: Headers, timeout: Duration) -> Result<HttpResponse> {
        let mut request = ureq::get(url).timeout(timeout);
        for (key, value) in &headers {
            request = request.set(key, value);
        }
        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(e.into()),
        };
        let status = response.status();
        let body = response.into_string().context("Failed to read response body")?;
        Ok(HttpResponse { status, body })
    }
}

// ==================== Catalog Client ====================

/// Catalog API client
pub struct CatalogClient<H: HttpClient = UreqHttpClient> {
    /// Origin all endpoints are resolved against
    base_url: String,

    /// Deadline for each call
    timeout: Duration,

    /// HTTP client, shared with request workers
    http: Arc<H>,
}

impl CatalogClient<UreqHttpClient> {
    /// Create a client for the default catalog origin
    pub fn new() -> Self {
        Self::with_http_client(UreqHttpClient)
    }
}

impl Default for CatalogClient<UreqHttpClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: HttpClient + 'static> CatalogClient<H> {
    /// Create client with custom HTTP client (for testing)
    pub fn with_http_client(http: H) -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            http: Arc::new(http),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build common headers for requests
    fn build_headers(&self) -> Headers {
        vec![("Content-Type".to_string(), "application/json".to_string())]
    }

    /// URL of the product list, with `?limit=N` only for a non-zero limit
    pub fn products_url(&self, limit: Option<u32>) -> String {
        match limit {
            Some(n) if n > 0 => format!("{}/products?limit={n}", self.base_url),
            _ => format!("{}/products", self.base_url),
        }
    }

    /// Fetch products, optionally limited to the first `limit`
    pub fn fetch_products(&self, limit: Option<u32>) -> Result<Vec<Product>, FetchError> {
        let url = self.products_url(limit);
        self.get_json(&url, CatalogResource::Products)
    }

    /// Fetch a single product by id
    pub fn fetch_product(&self, id: u64) -> Result<Product, FetchError> {
        let url = format!("{}/products/{id}", self.base_url);
        self.get_json(&url, CatalogResource::Product)
    }

    /// Fetch all category names
    pub fn fetch_categories(&self) -> Result<Vec<String>, FetchError> {
        let url = format!("{}/products/categories", self.base_url);
        self.get_json(&url, CatalogResource::Categories)
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        resource: CatalogResource,
    ) -> Result<T, FetchError> {
        debug!("GET {url}");
        let response = self.get_with_deadline(url, resource)?;

        if !response.is_success() {
            return Err(FetchError::Http {
                resource,
                status: response.status,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|source| FetchError::Decode { resource, source })
    }

    /// Run the request on a worker and give up once the deadline elapses
    ///
    /// The worker is not interrupted; its late result is dropped.
    fn get_with_deadline(
        &self,
        url: &str,
        resource: CatalogResource,
    ) -> Result<HttpResponse, FetchError> {
        let (tx, rx) = mpsc::channel();
        let http = Arc::clone(&self.http);
        let request_url = url.to_string();
        let headers = self.build_headers();
        let timeout = self.timeout;

        thread::spawn(move || {
            let _ = tx.send(http.get(&request_url, headers, timeout));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) if is_timed_out(&e) => Err(FetchError::Timeout { resource }),
            Ok(Err(e)) => Err(FetchError::Transport {
                resource,
                message: format!("{e:#}"),
                source: e.into(),
            }),
            Err(RecvTimeoutError::Timeout) => {
                debug!("GET {url} exceeded {:?}", self.timeout);
                Err(FetchError::Timeout { resource })
            }
            Err(RecvTimeoutError::Disconnected) => Err(FetchError::Transport {
                resource,
                message: "request worker exited without a response".to_string(),
                source: "request worker exited without a response".into(),
            }),
        }
    }
}

/// Whether a transport error was caused by an I/O timeout
fn is_timed_out(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::TimedOut)
    })
}
