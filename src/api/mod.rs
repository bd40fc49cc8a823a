//! Remote droplet API.
//!
//! `DropletApi` is the seam between the command handlers and the provider:
//!   create / list_by_name / list_by_tag / delete_by_tag
//!
//! `DigitalOceanClient` (client.rs) is the real implementation; tests plug
//! in a recording fake instead.

pub mod client;
pub mod types;

use reqwest::StatusCode;
use thiserror::Error;

pub use client::{DEFAULT_API_URL, DigitalOceanClient};
pub use types::{Droplet, DropletCreateRequest, NetworkV4, NetworkV6, Networks};

/// The four droplet calls the CLI makes. Each is a single blocking request.
pub trait DropletApi {
    fn create(&self, request: &DropletCreateRequest) -> Result<Droplet, ApiError>;

    /// Droplets whose name matches exactly. Zero matches is not an error.
    fn list_by_name(&self, name: &str) -> Result<Vec<Droplet>, ApiError>;

    fn list_by_tag(&self, tag: &str) -> Result<Vec<Droplet>, ApiError>;

    /// Bulk delete of every droplet carrying `tag`.
    fn delete_by_tag(&self, tag: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The provider answered with a non-success status.
    #[error("{status}: {message}{}", id_suffix(.id))]
    Status {
        status: u16,
        id: Option<String>,
        message: String,
    },

    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("invalid API url")]
    Url(#[from] url::ParseError),

    #[error("cannot start async runtime")]
    Runtime(#[source] std::io::Error),
}

fn id_suffix(id: &Option<String>) -> String {
    id.as_deref().map(|i| format!(" ({i})")).unwrap_or_default()
}

impl ApiError {
    /// Build a status error from a response body, using the provider's
    /// `{"id": .., "message": ..}` shape when present.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            id: Option<String>,
            message: Option<String>,
        }

        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let id = parsed.as_ref().and_then(|b| b.id.clone());
        let message = parsed
            .and_then(|b| b.message)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });

        ApiError::Status {
            status: status.as_u16(),
            id,
            message,
        }
    }
}
