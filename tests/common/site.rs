//! In-memory stand-in for the ratings site.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;

use aoty_overlay::aoty::{FetchedPage, PageSource};

/// Page source backed by a URL table.
///
/// Requests for unknown URLs fail like a refused connection. An optional
/// per-request delay lets tests keep a scrape in flight while they mutate
/// the host page.
pub struct CannedSite {
    pages: Mutex<HashMap<String, FetchedPage>>,
    requests: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

impl CannedSite {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            requests: AtomicUsize::new(0),
            delay: Mutex::new(None),
        }
    }

    pub fn insert(&self, url: &str, status: u16, body: &str) {
        self.pages.lock().unwrap().insert(
            url.to_string(),
            FetchedPage {
                status,
                body: body.to_string(),
            },
        );
    }

    /// Delay applied to every subsequent request.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Number of requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for CannedSite {
    async fn get_html(&self, url: &str) -> anyhow::Result<FetchedPage> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("connection refused for {}", url))
    }
}
