//! The marketing version model and its bump rules.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::Error;

/// A `major.minor.patch` marketing version.
///
/// Parsing is lenient about length: missing trailing components default to
/// zero, so `"2"` is `2.0.0` and `"2.1"` is `2.1.0`. Components past the third
/// are ignored. Surrounding quotes (as Xcode writes them for some values) are
/// stripped first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Returns the version that follows `self` for the given increment.
    ///
    /// Fails with [`Error::Overflow`] when the incremented component would
    /// exceed `u64::MAX`.
    pub fn bump(self, kind: BumpKind) -> Result<Self, Error> {
        let next = |n: u64| {
            n.checked_add(1)
                .ok_or_else(|| Error::Overflow(self.to_string()))
        };
        match kind {
            BumpKind::Major => Ok(Version::new(next(self.major)?, 0, 0)),
            BumpKind::Minor => Ok(Version::new(self.major, next(self.minor)?, 0)),
            BumpKind::Patch => Ok(Version::new(self.major, self.minor, next(self.patch)?)),
        }
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches(|c| c == '"' || c == '\'');
        let mut parts = trimmed.split('.');

        let mut component = || -> Result<u64, Error> {
            match parts.next() {
                Some(part) => part
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidVersion(s.to_string())),
                None => Ok(0),
            }
        };

        let major = component()?;
        let minor = component()?;
        let patch = component()?;

        Ok(Version::new(major, minor, patch))
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Which component of a [`Version`] to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    /// `1.2.3` → `2.0.0`
    Major,
    /// `1.2.3` → `1.3.0`
    Minor,
    /// `1.2.3` → `1.2.4`
    Patch,
}

impl Display for BumpKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BumpKind::Major => write!(f, "major"),
            BumpKind::Minor => write!(f, "minor"),
            BumpKind::Patch => write!(f, "patch"),
        }
    }
}

impl FromStr for BumpKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            _ => Err(Error::UnknownBumpKind(s.to_string())),
        }
    }
}
