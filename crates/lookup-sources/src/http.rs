//! HTTP dataset source.
//!
//! One GET per load. Any non-2xx status is a [`LoadError::Status`]; transport
//! failures are [`LoadError::Http`]. No timeout is applied.

use crate::DatasetSource;
use lookup_core::LoadError;

#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl HttpSource {
    pub fn new(url: reqwest::Url) -> Self {
        Self { client: reqwest::Client::new(), url }
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }
}

impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        tracing::debug!(url = %self.url, "GET dataset");
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| LoadError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status { status: status.as_u16() });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| LoadError::Http(e.to_string()))?;
        Ok(body.to_vec())
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
