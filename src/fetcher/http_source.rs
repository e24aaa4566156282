use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::config::HttpConfig;
use crate::domain::PostCollection;
use crate::fetcher::{decode_posts, ContentSource, FetchError};

/// Fetches `posts.json` with a plain `GET`.
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url, config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str());

        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    fn map_transport_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::network_timeout(self.url.as_str())
        } else {
            FetchError::failed_to_fetch(self.url.as_str(), e)
        }
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self) -> std::result::Result<PostCollection, FetchError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        decode_posts(&body)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
