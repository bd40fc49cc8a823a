//! Recording `DropletApi` for handler tests.

use std::cell::RefCell;

use reqwest::StatusCode;

use crate::api::{ApiError, Droplet, DropletApi, DropletCreateRequest, NetworkV4, Networks};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(DropletCreateRequest),
    ListByName(String),
    ListByTag(String),
    DeleteByTag(String),
}

#[derive(Default)]
pub struct FakeApi {
    pub droplets: Vec<Droplet>,
    /// When set, every call fails with this status.
    pub fail_with: Option<StatusCode>,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeApi {
    pub fn with_droplets(droplets: Vec<Droplet>) -> Self {
        Self {
            droplets,
            ..Default::default()
        }
    }

    pub fn failing(status: StatusCode) -> Self {
        Self {
            fail_with: Some(status),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.fail_with {
            Some(status) => Err(ApiError::from_status(
                status,
                r#"{"id":"fake","message":"injected failure"}"#,
            )),
            None => Ok(()),
        }
    }
}

impl DropletApi for FakeApi {
    fn create(&self, request: &DropletCreateRequest) -> Result<Droplet, ApiError> {
        self.record(Call::Create(request.clone()))?;
        Ok(droplet(&request.name, &[]))
    }

    fn list_by_name(&self, name: &str) -> Result<Vec<Droplet>, ApiError> {
        self.record(Call::ListByName(name.to_string()))?;
        Ok(self.droplets.clone())
    }

    fn list_by_tag(&self, tag: &str) -> Result<Vec<Droplet>, ApiError> {
        self.record(Call::ListByTag(tag.to_string()))?;
        Ok(self.droplets.clone())
    }

    fn delete_by_tag(&self, tag: &str) -> Result<(), ApiError> {
        self.record(Call::DeleteByTag(tag.to_string()))
    }
}

/// Build a droplet with `(ip, type)` v4 networks.
pub fn droplet(name: &str, v4: &[(&str, &str)]) -> Droplet {
    Droplet {
        name: name.to_string(),
        networks: Networks {
            v4: v4
                .iter()
                .map(|(ip, kind)| NetworkV4 {
                    ip_address: ip.to_string(),
                    kind: kind.to_string(),
                    ..Default::default()
                })
                .collect(),
            v6: Vec::new(),
        },
        ..Default::default()
    }
}
