use std::time::Duration;

use reqwest::{
    Client,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER, USER_AGENT},
};
use serde::de::DeserializeOwned;

use crate::scraper::{Result, ScraperError};

/// Browser-like header set sent with every request. The sites behind this
/// API serve different markup (or block outright) for non-browser agents.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// HTTP client wrapper for sources
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::build(base_url, None)
    }

    /// Create a client that sends a fixed `Referer` with every request
    pub fn with_referer(base_url: impl Into<String>, referer: &str) -> Self {
        Self::build(base_url, Some(referer))
    }

    fn build(base_url: impl Into<String>, referer: Option<&str>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
        );

        if let Some(referer) = referer
            && let Ok(value) = HeaderValue::from_str(referer)
        {
            headers.insert(REFERER, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Build full URL from endpoint
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!("{}{}", self.base_url, endpoint)
        }
    }

    /// Execute GET request and return the response body as text
    pub async fn get_text(&self, endpoint: &str) -> Result<String> {
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(ScraperError::Network)?;

        Self::text_response(response).await
    }

    /// GET with extra request headers
    pub async fn get_text_with_headers(
        &self,
        endpoint: &str,
        headers: &[(&str, &str)],
    ) -> Result<String> {
        let mut request = self.client.get(self.url(endpoint));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(ScraperError::Network)?;

        Self::text_response(response).await
    }

    /// Execute GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(endpoint))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ScraperError::Network)?;

        Self::json_response(response).await
    }

    /// Execute a form-encoded POST and return the response body as text
    pub async fn post_form(&self, endpoint: &str, params: &[(String, String)]) -> Result<String> {
        let response = self
            .client
            .post(self.url(endpoint))
            .form(params)
            .send()
            .await
            .map_err(ScraperError::Network)?;

        Self::text_response(response).await
    }

    async fn text_response(response: reqwest::Response) -> Result<String> {
        let response = Self::check_status(response).await?;
        response.text().await.map_err(ScraperError::Network)
    }

    async fn json_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ScraperError::Parse(format!("JSON parse error: {e}")))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let status_code = status.as_u16();
            let message = response.text().await.unwrap_or_default();

            return Err(ScraperError::Api {
                status: status_code,
                message,
            });
        }

        Ok(response)
    }
}
