use crate::domain::{BranchState, SemanticVersion, TagPattern};
use crate::error::{GitSemverError, Result};
use crate::git::{FetchOutcome, FetchResult, HistoryVersion, VersionSource};
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    history: Option<HistoryVersion>,
    dirty: bool,
    fetch_outcomes: HashMap<String, FetchOutcome>,
    fetched: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a new mock repository with no history
    pub fn new() -> Self {
        MockRepository {
            history: None,
            dirty: false,
            fetch_outcomes: HashMap::new(),
            fetched: RefCell::new(Vec::new()),
        }
    }

    /// Mock whose history resolves to `version` with a branch state matching its qualifier
    pub fn at_version(version: SemanticVersion) -> Self {
        let branch = match version.qualifier() {
            Some(qualifier) => BranchState::new(qualifier.distance().cloned(), qualifier.is_dirty_tree()),
            None => BranchState::clean(),
        };
        MockRepository::with_history(HistoryVersion {
            tag: Some(TagPattern::default().format(&version.requalified(None).to_string())),
            version,
            branch,
        })
    }

    pub fn with_history(history: HistoryVersion) -> Self {
        let dirty = history.branch.dirty;
        MockRepository {
            history: Some(history),
            dirty,
            ..MockRepository::new()
        }
    }

    /// Set the outcome reported for a remote
    pub fn set_fetch_outcome(&mut self, remote: impl Into<String>, outcome: FetchOutcome) {
        self.fetch_outcomes.insert(remote.into(), outcome);
    }

    /// Remotes fetched so far, in call order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionSource for MockRepository {
    fn current_version_from_history(&self, ignore_dirty: bool) -> Result<HistoryVersion> {
        let mut history = self
            .history
            .clone()
            .ok_or_else(|| GitSemverError::tag("No history in mock repository"))?;

        if ignore_dirty && self.dirty {
            history.branch.dirty = false;
            history.version = match history.branch.distance {
                Some(_) => history
                    .version
                    .requalified(Some(history.branch.snapshot_qualifier(None))),
                None => history.version.requalified(None),
            };
        }
        Ok(history)
    }

    fn fetch_remote_tags(&self, remotes: &[String], _timeout: Duration) -> Vec<FetchResult> {
        remotes
            .iter()
            .map(|remote| {
                self.fetched.borrow_mut().push(remote.clone());
                FetchResult {
                    remote: remote.clone(),
                    outcome: self
                        .fetch_outcomes
                        .get(remote)
                        .cloned()
                        .unwrap_or(FetchOutcome::Fetched),
                }
            })
            .collect()
    }
}
