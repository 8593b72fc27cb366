//! Test utilities: a mock [`Fetcher`] for exercising the crawl without
//! real HTTP.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::traits::Fetcher;

/// Mock fetcher that serves queued responses in order and records every
/// requested URL.
#[derive(Clone)]
pub struct MockFetcher {
    responses: Arc<Mutex<Vec<Result<String, AppError>>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    /// Serve a single body.
    pub fn new(body: &str) -> Self {
        Self::with_responses(vec![Ok(body.to_string())])
    }

    /// Serve the given responses in order; once the queue is drained,
    /// further fetches fail with a network error.
    pub fn with_responses(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URLs fetched so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.requested.lock().unwrap().push(url.to_string());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err(AppError::Network(format!("no response queued for {url}")))
        } else {
            responses.remove(0)
        }
    }
}
