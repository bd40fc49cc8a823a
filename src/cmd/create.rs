/*!
`create.rs`

Mode `c`: create one temp droplet.

  1. name = `temp-YYYY-MM-DD--HHMMSS` (local time)
  2. read the SSH key fingerprint file, trailing CR/LF stripped
  3. POST the create request built from the configured preset
  4. print the generated name
*/

use std::io::Write;

use chrono::{DateTime, TimeZone};
use tracing::info;

use super::TEMP_TAG;
use crate::api::{DropletApi, DropletCreateRequest};
use crate::config::{Config, CreatePreset};
use crate::error::DropletError;
use crate::utils::read_trimmed;

/// `temp-YYYY-MM-DD--HHMMSS` for the given instant, in its own timezone.
pub fn droplet_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{TEMP_TAG}-{}", at.format("%Y-%m-%d--%H%M%S"))
}

pub fn build_request(name: &str, fingerprint: &str, preset: &CreatePreset) -> DropletCreateRequest {
    DropletCreateRequest {
        name: name.to_string(),
        region: preset.region.clone(),
        size: preset.size.clone(),
        image: preset.image.clone(),
        ssh_keys: vec![fingerprint.to_string()],
        tags: vec![TEMP_TAG.to_string(), name.to_string()],
        user_data: Some(format!("epoch={name}")),
        with_droplet_agent: true,
        private_networking: false,
    }
}

/// Create a droplet named after `now`; returns the name it printed.
pub fn execute_create<Tz>(
    config: &Config,
    api: &dyn DropletApi,
    now: &DateTime<Tz>,
    out: &mut dyn Write,
) -> Result<String, DropletError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let name = droplet_name(now);

    let fp_path = config.fingerprint_path.as_deref().ok_or_else(|| {
        DropletError::Config("create needs an SSH key fingerprint file (--fingerprint)".into())
    })?;
    let fingerprint = read_trimmed("fingerprint", fp_path)?;

    let request = build_request(&name, &fingerprint, &config.preset);
    info!(
        name = %request.name,
        region = %request.region,
        size = %request.size,
        image = %request.image,
        "creating droplet"
    );

    let created = api
        .create(&request)
        .map_err(|source| DropletError::Api {
            op: "create",
            target: name.clone(),
            source,
        })?;
    info!(id = created.id, name = %created.name, "droplet created");

    writeln!(out, "{name}")?;
    Ok(name)
}
