use std::fmt;
use std::time::Duration;

use crate::git::{FetchOutcome, FetchResult};

/// Warnings that occur at the edges of version computation.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Fetching tags from a remote failed; local tags were used
    FetchFailed { remote: String, reason: String },
    /// A remote did not answer before the fetch deadline
    FetchTimedOut { remote: String, timeout: Duration },
    /// No tag matching the pattern is reachable from HEAD
    NoReleaseTag { version: String },
}

impl BoundaryWarning {
    /// Warning for a fetch that did not succeed
    pub fn from_fetch(result: &FetchResult, timeout: Duration) -> Option<Self> {
        match &result.outcome {
            FetchOutcome::Fetched => None,
            FetchOutcome::Failed(reason) => Some(BoundaryWarning::FetchFailed {
                remote: result.remote.clone(),
                reason: reason.clone(),
            }),
            FetchOutcome::TimedOut => Some(BoundaryWarning::FetchTimedOut {
                remote: result.remote.clone(),
                timeout,
            }),
        }
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::FetchFailed { remote, reason } => {
                write!(
                    f,
                    "Could not fetch tags from remote '{}': {}. Using local tags.",
                    remote, reason
                )
            }
            BoundaryWarning::FetchTimedOut { remote, timeout } => {
                write!(
                    f,
                    "Fetching tags from remote '{}' timed out after {}s. Using local tags.",
                    remote,
                    timeout.as_secs()
                )
            }
            BoundaryWarning::NoReleaseTag { version } => {
                write!(f, "No release tag found, starting from {}", version)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_warning_for_successful_fetch() {
        let result = FetchResult {
            remote: "origin".to_string(),
            outcome: FetchOutcome::Fetched,
        };
        assert_eq!(BoundaryWarning::from_fetch(&result, Duration::from_secs(5)), None);
    }

    #[test]
    fn test_timeout_warning() {
        let result = FetchResult {
            remote: "origin".to_string(),
            outcome: FetchOutcome::TimedOut,
        };
        let warning = BoundaryWarning::from_fetch(&result, Duration::from_secs(5)).unwrap();
        assert_eq!(
            warning.to_string(),
            "Fetching tags from remote 'origin' timed out after 5s. Using local tags."
        );
    }
}
