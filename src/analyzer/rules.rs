use crate::domain::{ReleaseVersion, SemVerEnforcementLevel, SemanticVersion};

/// Grants major changes while the version is still `0.y.z`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialDevelopmentRule {
    current: SemanticVersion,
}

impl InitialDevelopmentRule {
    pub fn new(current: SemanticVersion) -> Self {
        InitialDevelopmentRule { current }
    }

    pub fn calc_level(&self) -> Option<SemVerEnforcementLevel> {
        self.current
            .is_initial_dev_version()
            .then(SemVerEnforcementLevel::initial_development)
    }
}

/// Grants major changes until the version passes `enforce_after_version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnforceAfterVersionRule {
    current: SemanticVersion,
    enforce_after_version: Option<ReleaseVersion>,
}

impl EnforceAfterVersionRule {
    pub fn new(current: SemanticVersion, enforce_after_version: Option<ReleaseVersion>) -> Self {
        EnforceAfterVersionRule {
            current,
            enforce_after_version,
        }
    }

    pub fn calc_level(&self) -> Option<SemVerEnforcementLevel> {
        let enforce_after = self.enforce_after_version.as_ref()?;
        (self.current <= *enforce_after.as_semantic())
            .then(|| SemVerEnforcementLevel::disabled_enforce_after_version(enforce_after))
    }
}

/// A configured rule that may excuse changes beyond strict SemVer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemVerLevelRule {
    InitialDevelopment(InitialDevelopmentRule),
    EnforceAfterVersion(EnforceAfterVersionRule),
    /// An always-applicable exception declared by the caller
    Exception(SemVerEnforcementLevel),
}

impl SemVerLevelRule {
    pub fn initial_development(current: SemanticVersion) -> Self {
        SemVerLevelRule::InitialDevelopment(InitialDevelopmentRule::new(current))
    }

    pub fn enforce_after_version(
        current: SemanticVersion,
        enforce_after_version: Option<ReleaseVersion>,
    ) -> Self {
        SemVerLevelRule::EnforceAfterVersion(EnforceAfterVersionRule::new(
            current,
            enforce_after_version,
        ))
    }

    /// The level this rule grants, or `None` when it does not apply
    pub fn calc_level(&self) -> Option<SemVerEnforcementLevel> {
        match self {
            SemVerLevelRule::InitialDevelopment(rule) => rule.calc_level(),
            SemVerLevelRule::EnforceAfterVersion(rule) => rule.calc_level(),
            SemVerLevelRule::Exception(level) => Some(level.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SemVerReleaseType;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    fn release(s: &str) -> Option<ReleaseVersion> {
        Some(ReleaseVersion::parse(s).unwrap())
    }

    #[test]
    fn test_initial_development_applies_below_one() {
        let level = InitialDevelopmentRule::new(v("0.3.1")).calc_level().unwrap();
        assert_eq!(level.release_type(), SemVerReleaseType::Major);
        assert!(level.explanation().contains("initial development"));

        let level = InitialDevelopmentRule::new(v("0.0.0-4-gabcd-dirty-SNAPSHOT")).calc_level();
        assert!(level.is_some());
    }

    #[test]
    fn test_initial_development_skips_stable() {
        assert_eq!(InitialDevelopmentRule::new(v("1.0.0")).calc_level(), None);
        assert_eq!(InitialDevelopmentRule::new(v("1.0.0-SNAPSHOT")).calc_level(), None);
    }

    #[test]
    fn test_enforce_after_version_applies_up_to_version() {
        let rule = EnforceAfterVersionRule::new(v("2.0.0-rc1"), release("2.0.0"));
        let level = rule.calc_level().unwrap();
        assert_eq!(level.release_type(), SemVerReleaseType::Major);
        assert!(level.explanation().contains("2.0.0"));

        let rule = EnforceAfterVersionRule::new(v("2.0.0"), release("2.0.0"));
        assert!(rule.calc_level().is_some());

        let rule = EnforceAfterVersionRule::new(v("1.9.9-3-gabcd-SNAPSHOT"), release("2.0.0"));
        assert!(rule.calc_level().is_some());
    }

    #[test]
    fn test_enforce_after_version_stops_after_version() {
        let rule = EnforceAfterVersionRule::new(v("2.0.1"), release("2.0.0"));
        assert_eq!(rule.calc_level(), None);

        let rule = EnforceAfterVersionRule::new(v("2.0.1-SNAPSHOT"), release("2.0.0"));
        assert_eq!(rule.calc_level(), None);
    }

    #[test]
    fn test_enforce_after_version_absent() {
        let rule = EnforceAfterVersionRule::new(v("0.1.0"), None);
        assert_eq!(rule.calc_level(), None);
    }

    #[test]
    fn test_rule_enum_dispatch() {
        assert!(SemVerLevelRule::initial_development(v("0.1.0"))
            .calc_level()
            .is_some());
        assert!(SemVerLevelRule::enforce_after_version(v("3.0.0"), release("2.0.0"))
            .calc_level()
            .is_none());

        let level = SemVerEnforcementLevel::new(SemVerReleaseType::Minor, "additive window");
        assert_eq!(
            SemVerLevelRule::Exception(level.clone()).calc_level(),
            Some(level)
        );
    }
}
