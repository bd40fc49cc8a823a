//! Wire types for the `/v2/droplets` endpoints.
//!
//! Only the fields the CLI reads are typed; everything else the provider
//! sends is kept in `extra` so the long lookup can print it unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcpus: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_slug: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub networks: Networks,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Droplet {
    /// IPv4 addresses of `public` networks, in provider order.
    pub fn public_ipv4(&self) -> impl Iterator<Item = &str> {
        self.networks
            .v4
            .iter()
            .filter(|n| n.is_public())
            .map(|n| n.ip_address.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Networks {
    #[serde(default)]
    pub v4: Vec<NetworkV4>,
    #[serde(default)]
    pub v6: Vec<NetworkV6>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkV4 {
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    /// `public` or `private`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl NetworkV4 {
    pub fn is_public(&self) -> bool {
        self.kind == "public"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkV6 {
    pub ip_address: String,
    /// Prefix length; the provider sends a number here, unlike v4.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netmask: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of `POST /v2/droplets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropletCreateRequest {
    pub name: String,
    pub region: String,
    pub size: String,
    /// Image slug, e.g. `ubuntu-22-04-x64`.
    pub image: String,
    /// SSH key fingerprints (the API also accepts numeric ids).
    pub ssh_keys: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    /// Installs the provider's monitoring agent.
    pub with_droplet_agent: bool,
    pub private_networking: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DropletEnvelope {
    pub droplet: Droplet,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DropletsEnvelope {
    #[serde(default)]
    pub droplets: Vec<Droplet>,
}
