//! Loading/error/data state around product fetches
//!
//! Fetches run on background threads and report back over a channel. The
//! owner drains completions with [`ProductFeed::poll`] once per frame. Every
//! trigger takes a sequence number and only the latest one may update state.

use crate::catalog::{CatalogClient, HttpClient, Product};
use crate::error::FetchError;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Anything that can produce a product list
pub trait ProductSource: Send + Sync + 'static {
    fn fetch_products(&self, limit: Option<u32>) -> Result<Vec<Product>, FetchError>;
}

impl<H: HttpClient + 'static> ProductSource for CatalogClient<H> {
    fn fetch_products(&self, limit: Option<u32>) -> Result<Vec<Product>, FetchError> {
        CatalogClient::fetch_products(self, limit)
    }
}

impl<S: ProductSource + ?Sized> ProductSource for Box<S> {
    fn fetch_products(&self, limit: Option<u32>) -> Result<Vec<Product>, FetchError> {
        (**self).fetch_products(limit)
    }
}

/// Read-only snapshot of feed state for rendering
#[derive(Debug, Clone, Copy)]
pub struct FeedView<'a> {
    pub products: &'a [Product],
    pub loading: bool,
    pub error: Option<&'a str>,
}

/// Result of one fetch, tagged with its trigger
struct Completion {
    seq: u64,
    result: Result<Vec<Product>, FetchError>,
}

/// Product list state driven by background fetches
pub struct ProductFeed<S: ProductSource> {
    source: Arc<S>,
    limit: Option<u32>,
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
    /// Sequence number of the most recent trigger
    latest_seq: u64,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl<S: ProductSource> ProductFeed<S> {
    /// Create the feed and start the initial fetch
    pub fn new(source: S, limit: Option<u32>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut feed = Self {
            source: Arc::new(source),
            limit,
            products: Vec::new(),
            loading: false,
            error: None,
            latest_seq: 0,
            tx,
            rx,
        };
        feed.refetch();
        feed
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// User-facing message of the last failed fetch
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> FeedView<'_> {
        FeedView {
            products: &self.products,
            loading: self.loading,
            error: self.error.as_deref(),
        }
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Change the limit, starting a fetch if it differs
    ///
    /// Returns the sequence number of the started fetch.
    pub fn set_limit(&mut self, limit: Option<u32>) -> Option<u64> {
        if limit == self.limit {
            return None;
        }
        self.limit = limit;
        Some(self.refetch())
    }

    /// Start a fetch now and return its sequence number
    pub fn refetch(&mut self) -> u64 {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.loading = true;
        self.error = None;

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let limit = self.limit;
        debug!("Starting product fetch #{seq} (limit {limit:?})");

        thread::spawn(move || {
            let result = source.fetch_products(limit);
            let _ = tx.send(Completion { seq, result });
        });

        seq
    }

    /// Apply any finished fetches without blocking
    ///
    /// Returns `true` if the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// Block until the latest fetch has been applied or `timeout` elapses
    ///
    /// Returns `true` if the feed is no longer loading.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.loading {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return false;
                }
            }
        }
        true
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.seq != self.latest_seq {
            debug!(
                "Discarding stale product fetch #{} (latest #{})",
                completion.seq, self.latest_seq
            );
            return false;
        }

        self.loading = false;
        match completion.result {
            Ok(products) => {
                debug!("Loaded {} products", products.len());
                self.products = products;
                self.error = None;
            }
            Err(e) => {
                warn!("Product fetch failed: {e}");
                self.products.clear();
                self.error = Some(e.user_message());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rating;
    use crate::error::CatalogResource;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn products(n: u64) -> Vec<Product> {
        (1..=n)
            .map(|id| Product {
                id,
                title: format!("Product {id}"),
                price: 10.0,
                description: String::new(),
                category: "electronics".to_string(),
                image: String::new(),
                rating: Rating { rate: 4.0, count: 1 },
            })
            .collect()
    }

    /// Returns `limit` products after a per-limit delay
    struct DelayedSource {
        slow_limit: Option<u32>,
        delay: Duration,
    }

    impl ProductSource for DelayedSource {
        fn fetch_products(&self, limit: Option<u32>) -> Result<Vec<Product>, FetchError> {
            if limit == self.slow_limit {
                thread::sleep(self.delay);
            }
            Ok(products(limit.unwrap_or(20) as u64))
        }
    }

    /// Fails the first call, succeeds afterwards
    #[derive(Default)]
    struct FlakySource {
        calls: AtomicUsize,
    }

    impl ProductSource for FlakySource {
        fn fetch_products(&self, limit: Option<u32>) -> Result<Vec<Product>, FetchError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(FetchError::Http {
                    resource: CatalogResource::Products,
                    status: 500,
                })
            } else {
                Ok(products(limit.unwrap_or(1) as u64))
            }
        }
    }

    #[test]
    fn test_initial_fetch_starts_loading() {
        let mut feed = ProductFeed::new(
            DelayedSource {
                slow_limit: None,
                delay: Duration::ZERO,
            },
            Some(6),
        );
        assert!(feed.is_loading());
        assert!(feed.error().is_none());

        assert!(feed.wait(Duration::from_secs(5)));
        assert!(!feed.is_loading());
        assert_eq!(feed.products().len(), 6);
    }

    #[test]
    fn test_error_then_refetch() {
        let mut feed = ProductFeed::new(FlakySource::default(), Some(6));
        assert!(feed.wait(Duration::from_secs(5)));

        let message = feed.error().unwrap();
        assert!(message.contains("500"));
        assert!(feed.products().is_empty());

        feed.refetch();
        assert!(feed.is_loading());
        assert!(feed.error().is_none());

        assert!(feed.wait(Duration::from_secs(5)));
        assert!(feed.error().is_none());
        assert_eq!(feed.products().len(), 6);
        assert_eq!(feed.source().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut feed = ProductFeed::new(
            DelayedSource {
                slow_limit: Some(3),
                delay: Duration::from_millis(200),
            },
            Some(3),
        );

        // Second trigger completes first
        assert_eq!(feed.set_limit(Some(6)), Some(2));
        assert!(feed.wait(Duration::from_secs(5)));
        assert_eq!(feed.products().len(), 6);

        // Let the slow first fetch finish, then drain it
        thread::sleep(Duration::from_millis(400));
        assert!(!feed.poll());
        assert_eq!(feed.products().len(), 6);
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_set_same_limit_is_noop() {
        let mut feed = ProductFeed::new(
            DelayedSource {
                slow_limit: None,
                delay: Duration::ZERO,
            },
            Some(6),
        );
        assert_eq!(feed.set_limit(Some(6)), None);
        assert_eq!(feed.set_limit(None), Some(2));
        assert!(feed.wait(Duration::from_secs(5)));
        assert_eq!(feed.products().len(), 20);
    }

    #[test]
    fn test_poll_until_done() {
        let mut feed = ProductFeed::new(
            DelayedSource {
                slow_limit: Some(2),
                delay: Duration::from_millis(20),
            },
            Some(2),
        );
        let deadline = Instant::now() + Duration::from_secs(5);
        while feed.is_loading() && Instant::now() < deadline {
            feed.poll();
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(feed.products().len(), 2);
    }

    #[test]
    fn test_wait_times_out_while_loading() {
        let mut feed = ProductFeed::new(
            DelayedSource {
                slow_limit: Some(1),
                delay: Duration::from_millis(300),
            },
            Some(1),
        );
        assert!(!feed.wait(Duration::from_millis(10)));
        assert!(feed.is_loading());
    }
}
