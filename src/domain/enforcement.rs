use crate::domain::{ReleaseVersion, SemVerReleaseType};
use std::fmt;

/// Changes up to and including `release_type` are currently permitted, for the stated reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemVerEnforcementLevel {
    release_type: SemVerReleaseType,
    explanation: String,
}

impl SemVerEnforcementLevel {
    /// Ad-hoc exception with a caller-supplied reason
    pub fn new(release_type: SemVerReleaseType, explanation: impl Into<String>) -> Self {
        SemVerEnforcementLevel {
            release_type,
            explanation: explanation.into(),
        }
    }

    /// Built-in level for `0.y.z` versions
    pub fn initial_development() -> Self {
        SemVerEnforcementLevel::new(
            SemVerReleaseType::Major,
            "Major changes are allowed during initial development (0.y.z), \
             the public API should not be considered stable",
        )
    }

    /// Built-in level for an "allow major until X" escape
    pub fn disabled_enforce_after_version(enforce_after_version: &ReleaseVersion) -> Self {
        SemVerEnforcementLevel::new(
            SemVerReleaseType::Major,
            format!(
                "Strict semantic versioning is disabled until after version {}",
                enforce_after_version
            ),
        )
    }

    pub fn release_type(&self) -> SemVerReleaseType {
        self.release_type
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

impl fmt::Display for SemVerEnforcementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} changes allowed: {}", self.release_type, self.explanation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_development_level() {
        let level = SemVerEnforcementLevel::initial_development();
        assert_eq!(level.release_type(), SemVerReleaseType::Major);
        assert!(level.explanation().contains("initial development"));
    }

    #[test]
    fn test_enforce_after_version_level_names_version() {
        let version = ReleaseVersion::parse("2.0.0").unwrap();
        let level = SemVerEnforcementLevel::disabled_enforce_after_version(&version);
        assert_eq!(level.release_type(), SemVerReleaseType::Major);
        assert!(level.explanation().contains("2.0.0"));
    }

    #[test]
    fn test_ad_hoc_level_display() {
        let level = SemVerEnforcementLevel::new(SemVerReleaseType::Minor, "feature freeze lifted");
        assert_eq!(level.to_string(), "minor changes allowed: feature freeze lifted");
    }
}
