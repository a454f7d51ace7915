use crate::domain::SemanticVersion;
use crate::error::ParseError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A publishable version: a [`SemanticVersion`] with no dirty or snapshot marker.
///
/// A pre-release such as `2.0.0-rc1` is still a release.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseVersion(SemanticVersion);

impl ReleaseVersion {
    /// Parse a version and reject it if it carries a dirty or snapshot marker
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let version = SemanticVersion::parse(input)?;
        if version.is_dirty() {
            return Err(ParseError::Dirty {
                input: input.to_string(),
            });
        }
        Ok(ReleaseVersion(version))
    }

    pub fn as_semantic(&self) -> &SemanticVersion {
        &self.0
    }

    pub fn into_semantic(self) -> SemanticVersion {
        self.0
    }
}

impl TryFrom<SemanticVersion> for ReleaseVersion {
    type Error = ParseError;

    fn try_from(version: SemanticVersion) -> Result<Self, Self::Error> {
        if version.is_dirty() {
            Err(ParseError::Dirty {
                input: version.to_string(),
            })
        } else {
            Ok(ReleaseVersion(version))
        }
    }
}

impl From<ReleaseVersion> for SemanticVersion {
    fn from(release: ReleaseVersion) -> Self {
        release.0
    }
}

impl PartialEq<SemanticVersion> for ReleaseVersion {
    fn eq(&self, other: &SemanticVersion) -> bool {
        &self.0 == other
    }
}

impl PartialOrd<SemanticVersion> for ReleaseVersion {
    fn partial_cmp(&self, other: &SemanticVersion) -> Option<Ordering> {
        Some(self.0.cmp(other))
    }
}

impl FromStr for ReleaseVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReleaseVersion::parse(s)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Numeric floor for a computed version (`MAJOR.MINOR.PATCH`, no suffix)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LowerBound {
    major: u64,
    minor: u64,
    patch: u64,
}

impl LowerBound {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        LowerBound {
            major,
            minor,
            patch,
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let version = ReleaseVersion::parse(input)?.into_semantic();
        if version.pre_release().is_some() {
            return Err(ParseError::malformed(input));
        }
        let (major, minor, patch) = version.numeric();
        Ok(LowerBound::new(major, minor, patch))
    }

    pub fn numeric(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl FromStr for LowerBound {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LowerBound::parse(s)
    }
}

impl fmt::Display for LowerBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_version_parse_clean() {
        let release = ReleaseVersion::parse("1.2.3").unwrap();
        assert_eq!(release.to_string(), "1.2.3");
        assert_eq!(release, SemanticVersion::new(1, 2, 3));
    }

    #[test]
    fn test_release_version_rejects_dirt() {
        for input in [
            "1.2.3-dirty-SNAPSHOT",
            "1.2.3-SNAPSHOT",
            "1.2.3-dirty",
            "1.2.3-4-gabc1234-SNAPSHOT",
        ] {
            assert_eq!(
                ReleaseVersion::parse(input),
                Err(ParseError::Dirty {
                    input: input.to_string()
                })
            );
        }
    }

    #[test]
    fn test_release_version_propagates_malformed() {
        assert!(matches!(
            ReleaseVersion::parse("1.2"),
            Err(ParseError::Malformed { .. })
        ));
    }

    #[test]
    fn test_release_version_keeps_pre_release() {
        let release = ReleaseVersion::parse("2.0.0-rc1").unwrap();
        assert_eq!(release.to_string(), "2.0.0-rc1");
        assert!(release < ReleaseVersion::parse("2.0.0").unwrap());
    }

    #[test]
    fn test_release_version_try_from() {
        let clean = SemanticVersion::new(3, 1, 0);
        assert!(ReleaseVersion::try_from(clean).is_ok());

        let snapshot = SemanticVersion::parse("3.1.0-SNAPSHOT").unwrap();
        assert!(ReleaseVersion::try_from(snapshot).is_err());
    }

    #[test]
    fn test_release_version_compares_with_semantic() {
        let release = ReleaseVersion::parse("1.9.0").unwrap();
        assert!(release > SemanticVersion::parse("1.8.5").unwrap());
        assert!(release > SemanticVersion::parse("1.9.0-SNAPSHOT").unwrap());
        assert!(release < SemanticVersion::parse("1.9.1").unwrap());
    }

    #[test]
    fn test_lower_bound_parse() {
        assert_eq!(LowerBound::parse("2.0.0").unwrap().numeric(), (2, 0, 0));
        assert_eq!(LowerBound::parse("2.0.0").unwrap().to_string(), "2.0.0");
        assert!(LowerBound::parse("2.0.0-SNAPSHOT").is_err());
        assert!(LowerBound::parse("2.0.0-rc1").is_err());
        assert!(LowerBound::parse("2.0").is_err());
    }
}
