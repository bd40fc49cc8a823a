use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;

use tempdroplet::api::DigitalOceanClient;
use tempdroplet::cmd::{self, Invocation};
use tempdroplet::config::{self, OutputFormat, Overrides};
use tempdroplet::utils;
use tempdroplet::DropletError;

/// tempdroplet - throwaway DigitalOcean droplets
///
///   tempdroplet -f c --fingerprint ~/keys/id_rsa.pub.fingerprint
///   tempdroplet -f t temp
///   tempdroplet -f n temp-2024-03-20--011619
///   tempdroplet -f l temp-2024-03-20--011619
///   tempdroplet -f d temp-2024-03-20--011619
///
/// Results go to stdout; errors are printed as `FATAL: ...` on stderr.
#[derive(Parser, Debug)]
#[command(
    name = "tempdroplet",
    version,
    author,
    about = "Create, list and delete temporary DigitalOcean droplets",
    after_help = config::DEFAULT_USAGE
)]
pub struct Cli {
    /// Mode: `c` create, `l` long lookup, `d` delete, `t` by-tag, `n` public IP
    #[arg(short = 'f', value_name = "MODE")]
    mode: Option<String>,

    /// Droplet name (n, l) or tag (t, d)
    #[arg(value_name = "NAME|TAG")]
    identifier: Option<String>,

    /// Trailing arguments after NAME|TAG are accepted and ignored
    #[arg(value_name = "IGNORED", hide = true)]
    ignored: Vec<String>,

    /// File containing the SSH key fingerprint, for droplet creation
    #[arg(long, value_name = "FILE")]
    fingerprint: Option<PathBuf>,

    /// File containing the API token
    #[arg(long, value_name = "FILE")]
    token: Option<PathBuf>,

    /// YAML config file (defaults to <config dir>/tempdroplet/config.yaml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API base URL
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Output format for `-f l`
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            token: self.token.clone(),
            fingerprint: self.fingerprint.clone(),
            api_url: self.api_url.clone(),
            format: self.format,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(utils::derive_level(cli.verbose, cli.quiet));

    if let Err(err) = run(cli) {
        eprintln!("FATAL: {err:#}");
        let code = err
            .downcast_ref::<DropletError>()
            .map(DropletError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

/// Validation order: mode and identifier, delete rule, config, token.
/// A usage error never depends on the config or token being readable.
fn run(cli: Cli) -> Result<()> {
    if !cli.ignored.is_empty() {
        debug!(ignored = ?cli.ignored, "ignoring extra arguments");
    }
    let overrides = cli.overrides();

    let invocation = match Invocation::parse(cli.mode.as_deref().unwrap_or(""), cli.identifier) {
        Ok(inv) => inv,
        Err(err) => {
            let usage = config::load(overrides, cli.config.as_deref())
                .map(|c| c.usage)
                .unwrap_or_else(|_| config::DEFAULT_USAGE.to_string());
            print_usage(&usage);
            return Err(err.into());
        }
    };
    invocation.preflight()?;

    let config = config::load(overrides, cli.config.as_deref())?;
    debug!(api_url = %config.api_url, token = %config.token_path.display(), "config resolved");

    let token = utils::read_credential("token", &config.token_path)?;
    let client = DigitalOceanClient::new(token, &config.api_url, config.timeout)
        .context("cannot build API client")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cmd::dispatch(&invocation, &config, &client, &mut out)?;
    out.flush().map_err(DropletError::Output)?;
    Ok(())
}

fn print_usage(modes: &str) {
    let usage = Cli::command().render_usage();
    eprintln!("{usage}\n\n{modes}\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_mode_and_identifier() {
        let cli = Cli::try_parse_from(["tempdroplet", "-f", "t", "temp"]).unwrap();
        assert_eq!(cli.mode.as_deref(), Some("t"));
        assert_eq!(cli.identifier.as_deref(), Some("temp"));
        let cli = Cli::try_parse_from(["tempdroplet", "-f=c", "--fingerprint", "/tmp/fp"]).unwrap();
        assert_eq!(cli.mode.as_deref(), Some("c"));
        assert_eq!(cli.overrides().fingerprint, Some(PathBuf::from("/tmp/fp")));
    }

    #[test]
    fn extra_positionals_are_collected_not_rejected() {
        let cli = Cli::try_parse_from(["tempdroplet", "-f", "t", "temp", "extra", "more"]).unwrap();
        assert_eq!(cli.identifier.as_deref(), Some("temp"));
        assert_eq!(cli.ignored, vec!["extra", "more"]);
    }

    #[test]
    fn mode_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["tempdroplet"]).unwrap();
        assert!(cli.mode.is_none());
    }
}
