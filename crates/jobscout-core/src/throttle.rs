//! Per-host request pacing.
//!
//! Wraps any [`Fetcher`] with a minimum delay between consecutive
//! requests to the same host, so following many links on one site never
//! hammers it. Hosts are independent: a slow wait on one host does not
//! block fetches to another.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use url::Url;

use crate::error::AppError;
use crate::traits::Fetcher;

/// A [`Fetcher`] wrapper enforcing a fixed per-host delay.
#[derive(Clone)]
pub struct PoliteFetcher<F> {
    inner: F,
    delay: Duration,
    last_request: Arc<Mutex<HashMap<String, Instant>>>,
}

impl<F: Fetcher> PoliteFetcher<F> {
    pub fn new(inner: F, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            last_request: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn host_key(url: &str) -> Option<String> {
        Url::parse(url).ok()?.host_str().map(str::to_string)
    }

    async fn wait_for_host(&self, host: &str) {
        let sleep_for = {
            let mut map = self.last_request.lock().await;
            let now = Instant::now();
            let sleep_for = map
                .get(host)
                .map(|last| self.delay.saturating_sub(now.duration_since(*last)))
                .unwrap_or(Duration::ZERO);
            if sleep_for.is_zero() {
                map.insert(host.to_string(), now);
            }
            sleep_for
        };

        if !sleep_for.is_zero() {
            tracing::debug!(%host, sleep_ms = sleep_for.as_millis() as u64, "pacing request");
            tokio::time::sleep(sleep_for).await;
            let mut map = self.last_request.lock().await;
            map.insert(host.to_string(), Instant::now());
        }
    }
}

impl<F: Fetcher> Fetcher for PoliteFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        if let Some(host) = Self::host_key(url) {
            self.wait_for_host(&host).await;
        }
        self.inner.fetch(url).await
    }
}
