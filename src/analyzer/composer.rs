use crate::analyzer::SemVerLevelRule;
use crate::domain::{SemVerEnforcementLevel, SemVerReleaseType};
use std::fmt;

/// Effective outcome of evaluating every configured rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnforcementDecision {
    /// No rule applies: strict SemVer
    Strict,
    /// The most permissive applicable exception
    Exception(SemVerEnforcementLevel),
}

impl EnforcementDecision {
    /// Changes allowed without a matching version bump
    pub fn permitted(&self) -> SemVerReleaseType {
        match self {
            EnforcementDecision::Strict => SemVerReleaseType::Patch,
            EnforcementDecision::Exception(level) => level.release_type(),
        }
    }

    pub fn level(&self) -> Option<&SemVerEnforcementLevel> {
        match self {
            EnforcementDecision::Strict => None,
            EnforcementDecision::Exception(level) => Some(level),
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            EnforcementDecision::Strict => {
                "Strict semantic versioning: breaking or additive changes need a matching version bump"
            }
            EnforcementDecision::Exception(level) => level.explanation(),
        }
    }

    /// Whether a declared change fits, given the bump being released (if any)
    pub fn allows(&self, change: SemVerReleaseType, release_type: Option<SemVerReleaseType>) -> bool {
        let bumped = release_type.unwrap_or(SemVerReleaseType::Patch);
        change <= self.permitted().max(bumped)
    }
}

impl fmt::Display for EnforcementDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnforcementDecision::Strict => write!(f, "strict: {}", self.explanation()),
            EnforcementDecision::Exception(level) => level.fmt(f),
        }
    }
}

/// Reduce the configured rules to one decision.
///
/// The greatest granted release type wins; among equals the first rule in configuration
/// order is kept. Explanations are never merged.
pub fn compose(rules: &[SemVerLevelRule]) -> EnforcementDecision {
    rules
        .iter()
        .filter_map(SemVerLevelRule::calc_level)
        .reduce(|best, next| {
            if next.release_type() > best.release_type() {
                next
            } else {
                best
            }
        })
        .map_or(EnforcementDecision::Strict, EnforcementDecision::Exception)
}
