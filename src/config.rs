//! Runtime configuration.
//!
//! A `Config` is resolved once at startup from (highest wins):
//!   1. command-line overrides
//!   2. the YAML config file (`--config`, or `<config dir>/tempdroplet/config.yaml` if present)
//!   3. built-in defaults
//!
//! and then passed by reference to the dispatcher. Nothing is global.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::api::DEFAULT_API_URL;
use crate::error::DropletError;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Token location relative to the home directory.
pub const DEFAULT_TOKEN_PATH: &str = "keys/digitalocean-token";

pub const DEFAULT_USAGE: &str = "\
Modes (-f):
  c   create a temp droplet (needs --fingerprint); prints its name
  n   print public IPv4 addresses of the droplet NAME
  l   print the full droplet record(s) for NAME
  t   print names of droplets tagged TAG
  d   delete all droplets tagged TAG (TAG must start with `temp`)";

/// Output shape for the long lookup.
#[derive(clap::ValueEnum, Deserialize, Clone, Copy, Debug, Default, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// What every created droplet looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePreset {
    pub region: String,
    pub size: String,
    pub image: String,
}

impl Default for CreatePreset {
    fn default() -> Self {
        Self {
            region: "sfo3".into(),
            size: "s-2vcpu-2gb".into(),
            image: "ubuntu-22-04-x64".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token_path: PathBuf,
    pub fingerprint_path: Option<PathBuf>,
    pub api_url: Url,
    pub timeout: Option<Duration>,
    pub preset: CreatePreset,
    pub format: OutputFormat,
    pub usage: String,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<PathBuf>,
    pub fingerprint: Option<PathBuf>,
    pub api_url: Option<String>,
    pub format: Option<OutputFormat>,
}

/// On-disk YAML shape. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub token: Option<PathBuf>,
    pub fingerprint: Option<PathBuf>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub region: Option<String>,
    pub size: Option<String>,
    pub image: Option<String>,
    pub format: Option<OutputFormat>,
    pub usage: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, DropletError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DropletError::ReadFile {
            what: "config",
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|e| DropletError::Config(format!("{}: {e}", path.display())))
    }

    pub fn parse(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }
}

/// `<config dir>/tempdroplet/config.yaml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "tempdroplet")
        .map(|d| d.config_dir().join(CONFIG_FILE_NAME))
}

/// Resolve the effective configuration. An explicit `config_path` must exist;
/// the default one is read only when present.
pub fn load(overrides: Overrides, config_path: Option<&Path>) -> Result<Config, DropletError> {
    let file = match config_path {
        Some(p) => FileConfig::load(p)?,
        None => match default_config_path() {
            Some(p) if p.is_file() => FileConfig::load(&p)?,
            _ => FileConfig::default(),
        },
    };
    let home = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf());
    resolve(overrides, file, home.as_deref())
}

pub fn resolve(
    overrides: Overrides,
    file: FileConfig,
    home: Option<&Path>,
) -> Result<Config, DropletError> {
    let token_path = overrides
        .token
        .or(file.token)
        .unwrap_or_else(|| match home {
            Some(h) => h.join(DEFAULT_TOKEN_PATH),
            None => PathBuf::from(DEFAULT_TOKEN_PATH),
        });

    let raw_url = overrides
        .api_url
        .or(file.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_url = parse_api_url(&raw_url)?;

    let defaults = CreatePreset::default();
    let preset = CreatePreset {
        region: file.region.unwrap_or(defaults.region),
        size: file.size.unwrap_or(defaults.size),
        image: file.image.unwrap_or(defaults.image),
    };

    Ok(Config {
        token_path,
        fingerprint_path: overrides.fingerprint.or(file.fingerprint),
        api_url,
        timeout: file.timeout_secs.map(Duration::from_secs),
        preset,
        format: overrides.format.or(file.format).unwrap_or_default(),
        usage: file.usage.unwrap_or_else(|| DEFAULT_USAGE.to_string()),
    })
}

/// Parse and normalize the API base URL.
///
/// Only http/https are accepted. The path always ends with `/` so that
/// joining `v2/droplets` keeps any proxy prefix.
pub fn parse_api_url(raw: &str) -> Result<Url, DropletError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DropletError::Config("API url is empty".into()));
    }
    let mut url = Url::parse(trimmed)
        .map_err(|e| DropletError::Config(format!("API url {trimmed:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(DropletError::Config(format!(
                "API url {trimmed:?}: unsupported scheme {other:?}"
            )));
        }
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
