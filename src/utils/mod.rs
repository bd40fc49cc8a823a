//! Utilities: logging setup (verbosity -> tracing level) and small file
//! readers for the credential / fingerprint files.
//!
//! Key items:
//!   init_logging / derive_level
//!   read_trimmed / read_credential

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::error::DropletError;

/// Logging helpers. Everything goes to stderr; stdout carries results only.
pub mod logging {
    use super::*;

    pub fn derive_level(verbose: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::ERROR;
        }
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Our own crate logs at `level`; dependencies (hyper, reqwest) never
    /// go past `warn`.
    pub fn filter_for(level: LevelFilter) -> EnvFilter {
        let deps = level.min(LevelFilter::WARN);
        EnvFilter::new(format!("{deps},{}={level}", env!("CARGO_CRATE_NAME")))
    }

    pub fn init_logging(level: LevelFilter) {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter_for(level))
            .with_target(false)
            .init();
    }
}

pub use logging::{derive_level, init_logging};

/// Read a small text file and strip trailing CR/LF.
pub fn read_trimmed(what: &'static str, path: &Path) -> Result<String, DropletError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DropletError::ReadFile {
        what,
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw.trim_end_matches(['\r', '\n']).to_string())
}

/// Like `read_trimmed`, but an empty result is an error.
pub fn read_credential(what: &'static str, path: &Path) -> Result<String, DropletError> {
    let value = read_trimmed(what, path)?;
    if value.trim().is_empty() {
        return Err(DropletError::EmptyFile {
            what,
            path: path.to_path_buf(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn levels_from_flags() {
        assert_eq!(derive_level(0, false), LevelFilter::WARN);
        assert_eq!(derive_level(1, false), LevelFilter::INFO);
        assert_eq!(derive_level(2, false), LevelFilter::DEBUG);
        assert_eq!(derive_level(7, false), LevelFilter::TRACE);
        assert_eq!(derive_level(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn filter_caps_dependencies_at_warn() {
        let f = logging::filter_for(LevelFilter::TRACE).to_string();
        assert!(f.contains("warn"), "{f}");
        assert!(f.contains("tempdroplet=trace"), "{f}");
    }

    #[test]
    fn read_trimmed_strips_trailing_crlf_only() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "  ab:cd:ef\r\n\n").unwrap();
        let got = read_trimmed("fingerprint", f.path()).unwrap();
        assert_eq!(got, "  ab:cd:ef");
    }

    #[test]
    fn read_trimmed_missing_file_names_path() {
        let err = read_trimmed("fingerprint", Path::new("/nonexistent/fp")).unwrap_err();
        assert!(matches!(err, DropletError::ReadFile { what: "fingerprint", .. }));
        assert_eq!(
            err.to_string(),
            r#"cannot ReadFile fingerprint "/nonexistent/fp""#
        );
    }

    #[test]
    fn empty_credential_rejected() {
        let f = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(f.path(), "\n").unwrap();
        let err = read_credential("token", f.path()).unwrap_err();
        assert!(matches!(err, DropletError::EmptyFile { .. }));
    }
}
