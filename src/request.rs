use async_trait::async_trait;
use reqwest::{header, Client};

use crate::{info_time, Error, Result, ScrapeConfig};

/// Anything that can hand the page loop the HTML of one results page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, base_url: &str, page_index: usize) -> Result<String>;
}

/// Appends the page parameter, respecting an existing query string.
pub fn page_url(base_url: &str, page_index: usize) -> String {
    if base_url.contains('?') {
        format!("{base_url}&page={page_index}")
    } else {
        format!("{base_url}?page={page_index}")
    }
}

/// Fetches pages through the scraping proxy: the target URL and the API key go to the proxy
/// endpoint as `url` and `api_key` query parameters.
#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    // Client uses Arc so we can clone cheaply
    client: Client,
    api_key: Option<String>,
    proxy_endpoint: String,
}

impl ProxyFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_key: config.api_key.clone(),
            proxy_endpoint: config.proxy_endpoint.clone(),
        })
    }
}

#[async_trait]
impl PageFetcher for ProxyFetcher {
    /// Requests a page and returns a `Result<String>` containing the HTML.
    /// Any non-success status counts as a failure for this page.
    async fn fetch(&self, base_url: &str, page_index: usize) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;
        let url = page_url(base_url, page_index);
        info_time!("Requesting page {page_index}: {url}");

        let res = self
            .client
            .get(&self.proxy_endpoint)
            .query(&[("api_key", api_key), ("url", url.as_str())])
            .header(header::ACCEPT, "text/html")
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { status, url });
        }
        let html = res.text().await?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const TARGET: &str = "https://www.flipkart.com/search?q=t+shirts";

    #[test]
    fn page_param_uses_the_right_separator() {
        assert_eq!(page_url(TARGET, 2), "https://www.flipkart.com/search?q=t+shirts&page=2");
        assert_eq!(
            page_url("https://www.flipkart.com/clothing", 1),
            "https://www.flipkart.com/clothing?page=1"
        );
    }

    #[tokio::test]
    async fn fetch_goes_through_proxy() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("api_key".into(), "secret".into()),
                Matcher::UrlEncoded("url".into(), format!("{TARGET}&page=3")),
            ]))
            .match_header("user-agent", Matcher::Regex("^Mozilla/5.0".into()))
            .with_status(200)
            .with_body("<html>page three</html>")
            .create_async()
            .await;

        let config = ScrapeConfig::default()
            .with_api_key("secret")
            .with_proxy_endpoint(server.url());
        let html = ProxyFetcher::new(&config).unwrap().fetch(TARGET, 3).await.unwrap();

        assert_eq!(html, "<html>page three</html>");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_fails_the_page() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(403)
            .create_async()
            .await;

        let config = ScrapeConfig::default()
            .with_api_key("bad")
            .with_proxy_endpoint(server.url());
        let res = ProxyFetcher::new(&config).unwrap().fetch(TARGET, 1).await;

        match res {
            Err(Error::HttpStatus { status, url }) => {
                assert_eq!(status.as_u16(), 403);
                assert_eq!(url, format!("{TARGET}&page=1"));
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let config = ScrapeConfig::default().with_proxy_endpoint(server.url());
        let res = ProxyFetcher::new(&config).unwrap().fetch(TARGET, 1).await;

        assert!(matches!(res, Err(Error::MissingApiKey)));
        mock.assert_async().await;
    }
}
