/*!
`tag.rs`

Tag-based modes:
  - `t`: print the name of every droplet carrying TAG, in provider order
  - `d`: bulk delete by TAG, then print `OK`

Deletes are limited to tags starting with `temp`. The check happens
before any request is made, and before the token is read.
*/

use std::io::Write;

use tracing::{debug, info};

use super::TEMP_TAG;
use crate::api::DropletApi;
use crate::error::DropletError;

pub fn execute_list_by_tag(
    api: &dyn DropletApi,
    tag: &str,
    out: &mut dyn Write,
) -> Result<(), DropletError> {
    let droplets = api.list_by_tag(tag).map_err(|source| DropletError::Api {
        op: "ListByTag",
        target: tag.to_string(),
        source,
    })?;
    debug!(tag, count = droplets.len(), "tag lookup");
    for d in &droplets {
        writeln!(out, "{}", d.name)?;
    }
    Ok(())
}

/// Reject tags outside the temp namespace.
pub fn check_deletable(tag: &str) -> Result<(), DropletError> {
    if tag.starts_with(TEMP_TAG) {
        Ok(())
    } else {
        Err(DropletError::TagNotAllowed(tag.to_string()))
    }
}

pub fn execute_delete(
    api: &dyn DropletApi,
    tag: &str,
    out: &mut dyn Write,
) -> Result<(), DropletError> {
    check_deletable(tag)?;
    info!(tag, "deleting droplets by tag");
    api.delete_by_tag(tag).map_err(|source| DropletError::Api {
        op: "DeleteByTag",
        target: tag.to_string(),
        source,
    })?;
    writeln!(out, "OK")?;
    Ok(())
}
