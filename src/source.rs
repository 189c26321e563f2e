//! TheCatAPI クライアント（reqwest）
//!
//! `CandidateSource` を実装し、ディスカバリーループから1件ずつ呼ばれる。

use crate::config::Config;
use crate::error::{CatDiscoveryError, Result};
use cat_discovery_common::{
    API_KEY_HEADER, Candidate, CandidateSource, FetchError, parse_search_response, search_url,
};
use std::time::Duration;

pub struct CatApiClient {
    client: reqwest::Client,
    search_url: String,
    api_key: Option<String>,
}

impl CatApiClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatDiscoveryError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            search_url: search_url(base_url),
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            config.api_key(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

impl CandidateSource for CatApiClient {
    async fn fetch_candidate(&self) -> std::result::Result<Candidate, FetchError> {
        let mut request = self.client.get(&self.search_url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        tracing::debug!(url = %self.search_url, "Requesting candidate");
        let resp = request
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Image API returned an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        parse_search_response(&body)
    }
}
