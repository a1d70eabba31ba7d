use std::time::Duration;

use crate::{API_KEY_VAR, PAGE_DELAY_MS, PROXY_ENDPOINT, USER_AGENT};

/// Everything the fetcher and the page loop need that doesn't come from the user.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Scraping proxy credential. `None` makes every fetch fail with `Error::MissingApiKey`.
    pub api_key: Option<String>,
    pub proxy_endpoint: String,
    pub user_agent: String,
    pub page_delay: Duration,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            proxy_endpoint: PROXY_ENDPOINT.to_string(),
            user_agent: USER_AGENT.to_string(),
            page_delay: Duration::from_millis(PAGE_DELAY_MS),
            timeout: None,
        }
    }
}

impl ScrapeConfig {
    /// Reads the API key from `SCRAPER_API_KEY`. An empty value counts as missing.
    pub fn from_env() -> Self {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self {
            api_key,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_proxy_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.proxy_endpoint = endpoint.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_proxy_without_key() {
        let config = ScrapeConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.proxy_endpoint, "http://api.scraperapi.com");
        assert_eq!(config.page_delay, Duration::from_secs(1));
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn builders_override_defaults() {
        let config = ScrapeConfig::default()
            .with_api_key("secret")
            .with_proxy_endpoint("http://127.0.0.1:3000")
            .with_page_delay(Duration::ZERO)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.proxy_endpoint, "http://127.0.0.1:3000");
        assert_eq!(config.page_delay, Duration::ZERO);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }
}
