//! Mode -> handler dispatch.

use std::io::Write;

use chrono::Local;

use super::{Mode, create, lookup, tag};
use crate::api::DropletApi;
use crate::config::Config;
use crate::error::DropletError;

/// A parsed `-f MODE [IDENTIFIER]` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub identifier: Option<String>,
}

impl Invocation {
    /// Validate the mode letter and that an identifier is present when the
    /// mode needs one. Neither check touches the network.
    pub fn parse(mode: &str, identifier: Option<String>) -> Result<Self, DropletError> {
        let mode = Mode::from_flag(mode)?;
        if mode.needs_identifier() && identifier.is_none() {
            return Err(DropletError::MissingIdentifier(mode));
        }
        Ok(Self { mode, identifier })
    }

    /// Checks that need neither config nor credentials: a delete outside
    /// the temp namespace fails here, before the token is read.
    pub fn preflight(&self) -> Result<(), DropletError> {
        match self.mode {
            Mode::Delete => tag::check_deletable(self.identifier()?),
            _ => Ok(()),
        }
    }

    fn identifier(&self) -> Result<&str, DropletError> {
        self.identifier
            .as_deref()
            .ok_or(DropletError::MissingIdentifier(self.mode))
    }
}

/// Run one invocation against `api`, writing results to `out`.
pub fn dispatch(
    invocation: &Invocation,
    config: &Config,
    api: &dyn DropletApi,
    out: &mut dyn Write,
) -> Result<(), DropletError> {
    match invocation.mode {
        Mode::Create => {
            create::execute_create(config, api, &Local::now(), out)?;
            Ok(())
        }
        Mode::PublicIp => lookup::execute_public_ips(api, invocation.identifier()?, out),
        Mode::LongLookup => {
            lookup::execute_long(api, invocation.identifier()?, config.format, out)
        }
        Mode::ByTag => tag::execute_list_by_tag(api, invocation.identifier()?, out),
        Mode::Delete => tag::execute_delete(api, invocation.identifier()?, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::fake::{Call, FakeApi, droplet};
    use crate::config::{FileConfig, Overrides, resolve};

    fn config() -> Config {
        resolve(Overrides::default(), FileConfig::default(), None).unwrap()
    }

    fn run(mode: &str, ident: Option<&str>, api: &FakeApi) -> Result<String, DropletError> {
        let inv = Invocation::parse(mode, ident.map(str::to_string))?;
        let mut out = Vec::new();
        dispatch(&inv, &config(), api, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn tag_listing_scenario() {
        let api = FakeApi::with_droplets(vec![
            droplet("temp-2024-03-20--011619", &[]),
            droplet("temp-2024-03-21--090000", &[]),
        ]);
        let out = run("t", Some("temp"), &api).unwrap();
        assert_eq!(out, "temp-2024-03-20--011619\ntemp-2024-03-21--090000\n");
    }

    #[test]
    fn delete_production_rejected_without_call() {
        let api = FakeApi::default();
        let err = run("d", Some("production"), &api).unwrap_err();
        assert!(matches!(err, DropletError::TagNotAllowed(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn config_file_cannot_widen_delete_rule() {
        assert!(FileConfig::parse("tag: production\n").is_err());

        let file = FileConfig::parse("region: nyc1\nsize: s-1vcpu-1gb\nimage: debian-12-x64\n").unwrap();
        let cfg = resolve(Overrides::default(), file, None).unwrap();
        let api = FakeApi::default();
        let inv = Invocation::parse("d", Some("production".into())).unwrap();

        let err = dispatch(&inv, &cfg, &api, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, DropletError::TagNotAllowed(_)));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn preflight_rejects_only_non_temp_deletes() {
        let inv = Invocation::parse("d", Some("production".into())).unwrap();
        assert!(matches!(inv.preflight(), Err(DropletError::TagNotAllowed(_))));
        assert!(Invocation::parse("d", Some("temp-x".into())).unwrap().preflight().is_ok());
        assert!(Invocation::parse("t", Some("production".into())).unwrap().preflight().is_ok());
    }

    #[test]
    fn name_modes_route_to_list_by_name() {
        let api = FakeApi::with_droplets(vec![droplet("temp-a", &[("9.9.9.9", "public")])]);
        assert_eq!(run("n", Some("temp-a"), &api).unwrap(), "9.9.9.9\n");
        assert!(run("l", Some("temp-a"), &api).unwrap().contains("\"temp-a\""));
        assert_eq!(
            api.calls(),
            vec![
                Call::ListByName("temp-a".into()),
                Call::ListByName("temp-a".into())
            ]
        );
    }

    #[test]
    fn create_generates_temp_name() {
        let fp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(fp.path(), "aa:bb\n").unwrap();
        let mut cfg = config();
        cfg.fingerprint_path = Some(fp.path().to_path_buf());
        let api = FakeApi::default();
        let inv = Invocation::parse("c", None).unwrap();
        let mut out = Vec::new();

        dispatch(&inv, &cfg, &api, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        let name = printed.trim_end();
        assert!(name.starts_with("temp-"), "{name}");
        assert_eq!(name.len(), "temp-2024-03-20--011619".len());
        match api.calls().as_slice() {
            [Call::Create(req)] => {
                assert_eq!(req.name, name);
                assert_eq!(req.tags, vec!["temp".to_string(), name.to_string()]);
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[test]
    fn usage_errors() {
        let err = Invocation::parse("x", Some("temp".into())).unwrap_err();
        assert!(err.is_usage());
        let err = Invocation::parse("t", None).unwrap_err();
        assert!(matches!(err, DropletError::MissingIdentifier(Mode::ByTag)));
        assert!(Invocation::parse("c", None).is_ok());
    }
}
