//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the two things version computation
//! needs from git: the current version as derived from tags and working-tree state, and a
//! best-effort refresh of tags from remotes.
//!
//! # Overview
//!
//! The primary abstraction is the [VersionSource] trait. The concrete implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! Orchestration code depends on the [VersionSource] trait rather than concrete
//! implementations.
//!
//! ```rust
//! # use git_semver::git::{MockRepository, VersionSource};
//! # use git_semver::domain::SemanticVersion;
//! let repo = MockRepository::at_version(SemanticVersion::new(1, 2, 3));
//! let history = repo.current_version_from_history(false)?;
//! assert_eq!(history.version.to_string(), "1.2.3");
//! # Ok::<(), git_semver::GitSemverError>(())
//! ```

pub mod mock;
pub mod remote;
pub mod repository;

pub use mock::MockRepository;
pub use remote::{FetchOutcome, FetchResult};
pub use repository::Git2Repository;

use crate::domain::{BranchState, SemanticVersion};
use crate::error::Result;
use std::time::Duration;

/// Version derived from repository history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryVersion {
    /// The derived version, qualified by the branch state
    pub version: SemanticVersion,
    /// Distance from the tag and working-tree dirtiness
    pub branch: BranchState,
    /// The tag the version was described against, if any
    pub tag: Option<String>,
}

/// Source of the current version
///
/// ## Error Handling
///
/// Reading history returns [crate::error::Result<T>]; implementations map underlying errors
/// (like `git2::Error`) to [crate::error::GitSemverError] variants. Fetching never fails as a
/// whole: each remote reports its own [FetchOutcome].
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation for mocking Git operations
pub trait VersionSource {
    /// Derive the current version from the most recent matching tag.
    ///
    /// HEAD exactly on a tag yields the tag's version; commits past it yield
    /// `X.Y.Z-N-gHASH-SNAPSHOT`. A dirty working tree adds `-dirty` unless `ignore_dirty`.
    ///
    /// # Returns
    /// * `Ok(HistoryVersion)` - Version plus the branch state it was derived from
    /// * `Err` - If history cannot be read or the nearest tag is not a release version
    fn current_version_from_history(&self, ignore_dirty: bool) -> Result<HistoryVersion>;

    /// Fetch tags from each remote, giving up on all of them after `timeout`.
    ///
    /// Results are returned in the order of `remotes`, one per entry. Remotes the
    /// repository does not know are skipped without a result.
    fn fetch_remote_tags(&self, remotes: &[String], timeout: Duration) -> Vec<FetchResult>;
}
