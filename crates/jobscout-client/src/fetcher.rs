use std::time::Duration;

use jobscout_core::error::AppError;
use jobscout_core::traits::Fetcher;
use reqwest::Client;
use url::Url;

/// Fixed browser-like identity sent with every request. Job boards
/// routinely refuse obvious bot user agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP fetcher using reqwest.
///
/// Immutable client configuration (user agent, timeout) fixed at
/// construction; no retry on failure. Only `http`/`https` URLs are
/// fetched.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Http(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        check_scheme(url)?;
        tracing::debug!(%url, "fetching");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::Network(format!("connection failed: {e}"))
            } else {
                AppError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Http(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Http(format!("failed to read response body: {e}")))
    }
}

/// Site lists are operator-supplied text files; anything that is not a
/// web URL is refused before it reaches the network stack.
fn check_scheme(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::Http(format!("invalid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::Http(format!(
            "URL scheme '{scheme}' is not allowed (only http/https)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_and_https_schemes_pass() {
        assert!(check_scheme("http://example.com").is_ok());
        assert!(check_scheme("https://example.com/careers?dept=eng").is_ok());
    }

    #[test]
    fn other_schemes_are_refused() {
        let err = check_scheme("file:///etc/passwd").unwrap_err();
        assert!(err.to_string().contains("not allowed"));
        assert!(check_scheme("ftp://example.com").is_err());
    }

    #[test]
    fn invalid_urls_are_refused() {
        assert!(check_scheme("not a url").is_err());
    }

    #[tokio::test]
    async fn fetch_refuses_bad_scheme_without_network() {
        let fetcher = ReqwestFetcher::new().unwrap();
        let err = fetcher.fetch("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
    }
}
