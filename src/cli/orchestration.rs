//! Version computation workflow
//!
//! Composes the pure domain values with a [VersionSource]: read history (or take the
//! override), apply the configured bump and lower bound, then check the result against
//! the previous release and the enforcement rules.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info};

use crate::analyzer::{compose, EnforcementDecision, SemVerLevelRule};
use crate::config::VersionOptions;
use crate::domain::{ReleaseVersion, SemVerReleaseType, SemanticVersion};
use crate::error::{GitSemverError, Result};
use crate::git::{FetchResult, HistoryVersion, VersionSource};

/// Everything that went into a computed version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedVersion {
    /// What history said, `None` when an override was used
    pub history: Option<HistoryVersion>,
    pub version_override: Option<ReleaseVersion>,
    pub release_type: Option<SemVerReleaseType>,
    /// The final version
    pub version: SemanticVersion,
}

impl ComputedVersion {
    pub fn is_clean_release(&self) -> bool {
        !self.version.is_dirty()
    }
}

impl fmt::Display for ComputedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.history {
            Some(history) => {
                let tag = history.tag.as_deref().unwrap_or("(no release tag)");
                writeln!(f, "Version source: git history at {}", tag)?;
                writeln!(f, "History version: {}", history.version)?;
            }
            None => writeln!(f, "Version source: override")?,
        }
        if let Some(version_override) = &self.version_override {
            writeln!(f, "Override: {}", version_override)?;
        }
        if let Some(release_type) = self.release_type {
            writeln!(f, "Release type: {}", release_type)?;
        }
        writeln!(f, "Version: {}", self.version)?;
        write!(f, "Clean release: {}", self.is_clean_release())
    }
}

/// Refresh tags from remotes before history is read.
///
/// Failures are only reported; history is read from whatever tags are local.
pub fn refresh_tags<S: VersionSource>(
    source: &S,
    remotes: &[String],
    timeout: Duration,
) -> Vec<FetchResult> {
    if remotes.is_empty() {
        return Vec::new();
    }
    debug!(?remotes, ?timeout, "fetching remote tags");
    source.fetch_remote_tags(remotes, timeout)
}

/// The computed version when an override is configured; history is not needed then
pub fn override_version(options: &VersionOptions) -> Option<ComputedVersion> {
    let version_override = options.version_override.as_ref()?;
    info!(version = %version_override, "using version override");
    Some(ComputedVersion {
        history: None,
        version_override: Some(version_override.clone()),
        release_type: options.release_type,
        version: version_override.as_semantic().clone(),
    })
}

/// Compute the effective version.
///
/// The override wins outright; otherwise the history version gets the release bump, then
/// the lower bound, in that order.
pub fn compute_version<S: VersionSource>(
    options: &VersionOptions,
    source: &S,
) -> Result<ComputedVersion> {
    if let Some(computed) = override_version(options) {
        return Ok(computed);
    }

    let history = source.current_version_from_history(options.ignore_dirty)?;

    let mut version = history.version.clone();
    if let Some(kind) = options.release_type {
        version = version.release(kind)?;
        debug!(%kind, %version, "applied release type");
    }
    if let Some(bound) = &options.snapshot_lower_bound {
        version = version.lower_bound(bound, &history.branch);
        debug!(%bound, %version, "applied lower bound");
    }

    Ok(ComputedVersion {
        history: Some(history),
        version_override: None,
        release_type: options.release_type,
        version,
    })
}

/// Fail unless `current` is strictly greater than the previous release
pub fn check_downgrade(previous: &ReleaseVersion, current: &SemanticVersion) -> Result<()> {
    if previous.as_semantic() >= current {
        return Err(GitSemverError::VersionDowngrade {
            current: current.clone(),
            previous: previous.clone(),
        });
    }
    Ok(())
}

/// The configured rules, in evaluation order
pub fn enforcement_rules(
    options: &VersionOptions,
    current: &SemanticVersion,
) -> Vec<SemVerLevelRule> {
    vec![
        SemVerLevelRule::initial_development(current.clone()),
        SemVerLevelRule::enforce_after_version(
            current.clone(),
            options.enforce_after_version.clone(),
        ),
    ]
}

pub fn effective_enforcement(
    options: &VersionOptions,
    current: &SemanticVersion,
) -> EnforcementDecision {
    compose(&enforcement_rules(options, current))
}

/// Fail if a declared change exceeds what the decision and release bump allow
pub fn check_change(
    decision: &EnforcementDecision,
    change: SemVerReleaseType,
    release_type: Option<SemVerReleaseType>,
) -> Result<()> {
    if decision.allows(change, release_type) {
        return Ok(());
    }
    Err(GitSemverError::ChangeNotPermitted {
        change,
        permitted: decision.permitted().max(release_type.unwrap_or(SemVerReleaseType::Patch)),
        explanation: decision.explanation().to_string(),
    })
}
