use crate::error::GitSemverError;
use std::fmt;
use std::str::FromStr;

/// Granularity of an API change, or of a version bump.
///
/// Ordered `Patch < Minor < Major` so that the loosest exception can be picked with a
/// plain comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SemVerReleaseType {
    Patch,
    Minor,
    Major,
}

impl SemVerReleaseType {
    pub const ALL: [SemVerReleaseType; 3] = [
        SemVerReleaseType::Patch,
        SemVerReleaseType::Minor,
        SemVerReleaseType::Major,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemVerReleaseType::Patch => "patch",
            SemVerReleaseType::Minor => "minor",
            SemVerReleaseType::Major => "major",
        }
    }
}

impl FromStr for SemVerReleaseType {
    type Err = GitSemverError;

    /// Case-insensitive match against major, minor, patch
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(SemVerReleaseType::Major),
            "minor" => Ok(SemVerReleaseType::Minor),
            "patch" => Ok(SemVerReleaseType::Patch),
            _ => Err(GitSemverError::UnrecognizedReleaseType(s.to_string())),
        }
    }
}

impl fmt::Display for SemVerReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_type_order() {
        assert!(SemVerReleaseType::Major > SemVerReleaseType::Minor);
        assert!(SemVerReleaseType::Minor > SemVerReleaseType::Patch);
        assert_eq!(
            SemVerReleaseType::ALL.iter().max(),
            Some(&SemVerReleaseType::Major)
        );
    }

    #[test]
    fn test_release_type_parse_case_insensitive() {
        assert_eq!(
            "MAJOR".parse::<SemVerReleaseType>().unwrap(),
            SemVerReleaseType::Major
        );
        assert_eq!(
            "Minor".parse::<SemVerReleaseType>().unwrap(),
            SemVerReleaseType::Minor
        );
        assert_eq!(
            "patch".parse::<SemVerReleaseType>().unwrap(),
            SemVerReleaseType::Patch
        );
    }

    #[test]
    fn test_release_type_parse_unknown() {
        let err = "breaking".parse::<SemVerReleaseType>().unwrap_err();
        assert!(matches!(err, GitSemverError::UnrecognizedReleaseType(ref s) if s == "breaking"));
        assert!("".parse::<SemVerReleaseType>().is_err());
        assert!(" major ".parse::<SemVerReleaseType>().is_err());
    }

    #[test]
    fn test_release_type_display() {
        for kind in SemVerReleaseType::ALL {
            assert_eq!(kind.to_string().parse::<SemVerReleaseType>().unwrap(), kind);
        }
    }
}
