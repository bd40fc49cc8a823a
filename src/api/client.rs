//! reqwest-backed `DropletApi`.
//!
//! The CLI is synchronous, so the client owns a Tokio runtime and blocks on
//! each request. One request per call: no retries, one page per listing.

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::debug;
use url::Url;

use super::types::{Droplet, DropletCreateRequest, DropletEnvelope, DropletsEnvelope};
use super::{ApiError, DropletApi};

pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com/";

/// Largest page the provider serves; listings beyond it are truncated.
const PER_PAGE: &str = "200";

const USER_AGENT: &str = concat!("tempdroplet/", env!("CARGO_PKG_VERSION"));

pub struct DigitalOceanClient {
    http: Client,
    runtime: tokio::runtime::Runtime,
    droplets_url: Url,
    token: String,
}

impl DigitalOceanClient {
    /// `base` must end with `/` (see `config::parse_api_url`).
    pub fn new(
        token: impl Into<String>,
        base: &Url,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder.build()?;
        let runtime = tokio::runtime::Runtime::new().map_err(ApiError::Runtime)?;

        Ok(Self {
            http,
            runtime,
            droplets_url: base.join("v2/droplets")?,
            token: token.into(),
        })
    }

    async fn create_async(&self, request: &DropletCreateRequest) -> Result<Droplet, ApiError> {
        debug!(url = %self.droplets_url, name = %request.name, "POST droplet");
        let resp = self
            .http
            .post(self.droplets_url.clone())
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;
        let envelope: DropletEnvelope = check(resp).await?.json().await?;
        Ok(envelope.droplet)
    }

    async fn list_async(&self, key: &str, value: &str) -> Result<Vec<Droplet>, ApiError> {
        debug!(url = %self.droplets_url, key, value, "GET droplets");
        let resp = self
            .http
            .get(self.droplets_url.clone())
            .bearer_auth(&self.token)
            .query(&[(key, value), ("page", "1"), ("per_page", PER_PAGE)])
            .send()
            .await?;
        let envelope: DropletsEnvelope = check(resp).await?.json().await?;
        debug!(count = envelope.droplets.len(), "droplets listed");
        Ok(envelope.droplets)
    }

    async fn delete_by_tag_async(&self, tag: &str) -> Result<(), ApiError> {
        debug!(url = %self.droplets_url, tag, "DELETE droplets by tag");
        let resp = self
            .http
            .delete(self.droplets_url.clone())
            .bearer_auth(&self.token)
            .query(&[("tag_name", tag)])
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

impl DropletApi for DigitalOceanClient {
    fn create(&self, request: &DropletCreateRequest) -> Result<Droplet, ApiError> {
        self.runtime.block_on(self.create_async(request))
    }

    fn list_by_name(&self, name: &str) -> Result<Vec<Droplet>, ApiError> {
        self.runtime.block_on(self.list_async("name", name))
    }

    fn list_by_tag(&self, tag: &str) -> Result<Vec<Droplet>, ApiError> {
        self.runtime.block_on(self.list_async("tag_name", tag))
    }

    fn delete_by_tag(&self, tag: &str) -> Result<(), ApiError> {
        self.runtime.block_on(self.delete_by_tag_async(tag))
    }
}

/// Pass 2xx responses through; turn anything else into `ApiError::Status`.
async fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn droplets_url_joins_under_base_path() {
        let base = Url::parse("http://127.0.0.1:9999/proxy/").unwrap();
        let client = DigitalOceanClient::new("t", &base, None).unwrap();
        assert_eq!(
            client.droplets_url.as_str(),
            "http://127.0.0.1:9999/proxy/v2/droplets"
        );
    }

    #[test]
    fn default_url_targets_v2_droplets() {
        let base = Url::parse(DEFAULT_API_URL).unwrap();
        let client = DigitalOceanClient::new("t", &base, Some(Duration::from_secs(5))).unwrap();
        assert_eq!(
            client.droplets_url.as_str(),
            "https://api.digitalocean.com/v2/droplets"
        );
    }
}
