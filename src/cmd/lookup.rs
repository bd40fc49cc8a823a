/*!
`lookup.rs`

Lookups by droplet name:
  - mode `n`: public IPv4 addresses, one per line
  - mode `l`: the full droplet records (JSON or YAML)

Names are not unique on the provider side, so every match is printed.
Zero matches print nothing and succeed.
*/

use std::io::Write;

use tracing::{debug, warn};

use crate::api::{Droplet, DropletApi};
use crate::config::OutputFormat;
use crate::error::DropletError;

fn list_by_name(api: &dyn DropletApi, name: &str) -> Result<Vec<Droplet>, DropletError> {
    let droplets = api.list_by_name(name).map_err(|source| DropletError::Api {
        op: "ListByName",
        target: name.to_string(),
        source,
    })?;
    debug!(name, count = droplets.len(), "name lookup");
    if droplets.len() > 1 {
        warn!(name, count = droplets.len(), "name matches more than one droplet");
    }
    Ok(droplets)
}

pub fn execute_public_ips(
    api: &dyn DropletApi,
    name: &str,
    out: &mut dyn Write,
) -> Result<(), DropletError> {
    for droplet in list_by_name(api, name)? {
        for ip in droplet.public_ipv4() {
            writeln!(out, "{ip}")?;
        }
    }
    Ok(())
}

pub fn execute_long(
    api: &dyn DropletApi,
    name: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), DropletError> {
    let droplets = list_by_name(api, name)?;
    if droplets.is_empty() {
        return Ok(());
    }
    let rendered = render(&droplets, format)?;
    writeln!(out, "{}", rendered.trim_end())?;
    Ok(())
}

fn render(droplets: &[Droplet], format: OutputFormat) -> Result<String, DropletError> {
    let rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(droplets).map_err(|e| DropletError::Render(e.into()))?
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(droplets).map_err(|e| DropletError::Render(e.into()))?
        }
    };
    Ok(rendered)
}
