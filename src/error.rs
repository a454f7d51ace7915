use thiserror::Error;

use crate::domain::{ReleaseVersion, SemVerReleaseType, SemanticVersion};

/// Failure to read a version string.
///
/// Every variant carries the offending input so the message can point at it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid version format: '{input}' - expected MAJOR.MINOR.PATCH with an optional -SNAPSHOT/-dirty suffix")]
    Malformed { input: String },

    #[error("Invalid {component} version component in '{input}'")]
    Component {
        input: String,
        component: &'static str,
    },

    #[error("Invalid pre-release identifier '{pre_release}' in '{input}'")]
    PreRelease { input: String, pre_release: String },

    #[error("Version '{input}' carries a dirty or snapshot marker")]
    Dirty { input: String },

    #[error("Cannot bump {component} of '{input}': the component is already at its maximum")]
    Overflow {
        input: String,
        component: &'static str,
    },
}

impl ParseError {
    pub fn malformed(input: impl Into<String>) -> Self {
        ParseError::Malformed {
            input: input.into(),
        }
    }

    /// The input string that failed to parse
    pub fn input(&self) -> &str {
        match self {
            ParseError::Malformed { input }
            | ParseError::Component { input, .. }
            | ParseError::PreRelease { input, .. }
            | ParseError::Dirty { input }
            | ParseError::Overflow { input, .. } => input,
        }
    }
}

/// Unified error type for git-semver operations
#[derive(Error, Debug)]
pub enum GitSemverError {
    #[error("Version parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Version override '{0}' must be a clean release version, not a dirty or snapshot build")]
    DirtyVersionOverride(String),

    #[error("Version downgrade: current version {current} is not greater than previous release {previous}")]
    VersionDowngrade {
        current: SemanticVersion,
        previous: ReleaseVersion,
    },

    #[error("Unrecognized release type '{0}' - expected one of major, minor, patch")]
    UnrecognizedReleaseType(String),

    #[error("A {change} change is not permitted, only {permitted} changes are allowed: {explanation}")]
    ChangeNotPermitted {
        change: SemVerReleaseType,
        permitted: SemVerReleaseType,
        explanation: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in git-semver
pub type Result<T> = std::result::Result<T, GitSemverError>;

impl GitSemverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitSemverError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitSemverError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        GitSemverError::Remote(msg.into())
    }
}
