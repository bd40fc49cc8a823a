//! Error taxonomy for droplet operations.
//!
//! Every handler returns `DropletError`; `main` prints it (with its source
//! chain) behind a `FATAL:` prefix and picks the exit code from
//! [`DropletError::exit_code`]. Messages never repeat their source.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;
use crate::cmd::Mode;

#[derive(Debug, Error)]
pub enum DropletError {
    /// A local credential / fingerprint / config file could not be read.
    #[error("cannot ReadFile {what} {path:?}")]
    ReadFile {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{what} file {path:?} is empty")]
    EmptyFile { what: &'static str, path: PathBuf },

    /// The remote API call failed (transport or non-success status).
    #[error("cannot {op} droplet {target:?}")]
    Api {
        op: &'static str,
        target: String,
        #[source]
        source: ApiError,
    },

    #[error("Only allowed to delete temp* tags: {0:?}")]
    TagNotAllowed(String),

    #[error("unknown mode {0:?} (expected one of c, l, n, t, d)")]
    UnknownMode(String),

    #[error("mode `{0}` requires a name or tag argument")]
    MissingIdentifier(Mode),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot render droplets")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Writing results to stdout failed (closed pipe etc).
    #[error("cannot write output")]
    Output(#[from] std::io::Error),
}

impl DropletError {
    /// Usage errors get the usage text printed alongside the message.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            DropletError::UnknownMode(_) | DropletError::MissingIdentifier(_)
        )
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_usage() { 2 } else { 1 }
    }
}
