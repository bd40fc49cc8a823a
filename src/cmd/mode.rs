/*!
Mode selector for the `-f` flag.

Variants (flag letter):
  c  create
  n  public IPs by name
  l  full record by name
  t  names by tag
  d  delete by tag

Helpers:
  - from_flag()
  - flag()
  - needs_identifier()
*/

use std::fmt;

use crate::error::DropletError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    Create,
    PublicIp,
    LongLookup,
    ByTag,
    Delete,
}

impl Mode {
    /// All modes, in help order.
    pub const fn variants() -> &'static [Mode] {
        &[
            Mode::Create,
            Mode::PublicIp,
            Mode::LongLookup,
            Mode::ByTag,
            Mode::Delete,
        ]
    }

    /// Exact, case-sensitive match on the single-letter selector.
    pub fn from_flag(s: &str) -> Result<Self, DropletError> {
        match s {
            "c" => Ok(Mode::Create),
            "n" => Ok(Mode::PublicIp),
            "l" => Ok(Mode::LongLookup),
            "t" => Ok(Mode::ByTag),
            "d" => Ok(Mode::Delete),
            other => Err(DropletError::UnknownMode(other.to_string())),
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Mode::Create => "c",
            Mode::PublicIp => "n",
            Mode::LongLookup => "l",
            Mode::ByTag => "t",
            Mode::Delete => "d",
        }
    }

    /// Everything except create takes a name or tag.
    pub fn needs_identifier(&self) -> bool {
        !matches!(self, Mode::Create)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::Mode;
    use crate::error::DropletError;

    #[test]
    fn flags_round_trip() {
        for m in Mode::variants() {
            assert_eq!(Mode::from_flag(m.flag()).unwrap(), *m);
        }
    }

    #[test]
    fn unknown_flags_rejected() {
        for bad in ["", "x", "C", "create", " t"] {
            let err = Mode::from_flag(bad).unwrap_err();
            assert!(matches!(err, DropletError::UnknownMode(ref s) if s == bad));
        }
    }

    #[test]
    fn only_create_runs_without_identifier() {
        assert!(!Mode::Create.needs_identifier());
        assert!(Mode::Delete.needs_identifier());
        assert!(Mode::PublicIp.needs_identifier());
    }
}
