use std::future::Future;

use crate::error::AppError;

/// Downloads the raw body of a URL.
///
/// The single seam between the crawl logic and the network; mocked in
/// tests, implemented over reqwest in `jobscout-client`, and wrapped by
/// [`crate::throttle::PoliteFetcher`] for per-host pacing.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}
