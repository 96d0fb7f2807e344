//! Kemono/Coomer API HTTP client.

use reqwest::{Client, Proxy, Response};

use crate::api::types::PostsPage;
use crate::config::Config;
use crate::error::{Error, Result};

/// Number of posts per `posts-legacy` page.
pub const PAGE_SIZE: u64 = 50;

/// Browser user agent sent with every request.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36";

/// API client for listing pages and downloading files.
#[derive(Debug, Clone)]
pub struct KemonoApi {
    client: Client,
}

impl KemonoApi {
    /// Create a new API client honouring the proxy and TLS settings.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(!config.options.verify_ssl);

        if let Some(endpoint) = config.proxy.endpoint() {
            let mut proxy = Proxy::all(&endpoint)?;
            if let Some((username, password)) = config.proxy.credentials() {
                proxy = proxy.basic_auth(username, password);
            }
            tracing::debug!("Using proxy {}", endpoint);
            builder = builder.proxy(proxy);
        }

        if !config.options.verify_ssl {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch one page of a profile's posts.
    ///
    /// Not retried: a failure here aborts the listing.
    pub async fn fetch_page(
        &self,
        server: &str,
        service: &str,
        user_id: &str,
        offset: u64,
    ) -> Result<PostsPage> {
        let url = format!(
            "{}/api/v1/{}/user/{}/posts-legacy",
            server.trim_end_matches('/'),
            service,
            user_id
        );

        tracing::debug!("GET {}?o={}", url, offset);

        let response = self
            .client
            .get(&url)
            .query(&[("o", offset)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: format!("{}?o={}", url, offset),
            });
        }

        let text = response.text().await?;

        serde_json::from_str(&text).map_err(|e| {
            Error::Decode(format!(
                "Failed to parse posts page at offset {}: {} - Response: {}",
                offset,
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// Open a streaming download of a file.
    ///
    /// The caller reads `content_length()` and `bytes_stream()` from the response.
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(Error::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}
