//! Tag fetching from remotes with a global deadline

use crate::error::{GitSemverError, Result};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

const TAG_REFSPEC: &str = "+refs/tags/*:refs/tags/*";

/// Outcome of fetching tags from one remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched,
    Failed(String),
    TimedOut,
}

/// Per-remote fetch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub remote: String,
    pub outcome: FetchOutcome,
}

impl FetchResult {
    pub fn is_fetched(&self) -> bool {
        self.outcome == FetchOutcome::Fetched
    }
}

/// Fetch tags from every remote in parallel.
///
/// Each remote gets its own thread and its own handle on the repository at `git_dir`.
/// Remotes that have not answered when `timeout` elapses are reported as
/// [FetchOutcome::TimedOut]; their threads are left to finish in the background.
pub fn fetch_remote_tags(git_dir: &Path, remotes: &[String], timeout: Duration) -> Vec<FetchResult> {
    let (tx, rx) = mpsc::channel();

    for (index, remote) in remotes.iter().enumerate() {
        let tx = tx.clone();
        let remote = remote.clone();
        let git_dir: PathBuf = git_dir.to_path_buf();
        thread::spawn(move || {
            let outcome = match fetch_tags(&git_dir, &remote) {
                Ok(()) => FetchOutcome::Fetched,
                Err(e) => FetchOutcome::Failed(e.to_string()),
            };
            // The receiver is gone once the deadline has passed
            let _ = tx.send((index, outcome));
        });
    }
    drop(tx);

    let deadline = Instant::now() + timeout;
    let mut outcomes: Vec<Option<FetchOutcome>> = vec![None; remotes.len()];
    let mut pending = remotes.len();
    while pending > 0 {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok((index, outcome)) => {
                debug!(remote = %remotes[index], ?outcome, "fetch finished");
                outcomes[index] = Some(outcome);
                pending -= 1;
            }
            Err(_) => break,
        }
    }

    remotes
        .iter()
        .zip(outcomes)
        .map(|(remote, outcome)| {
            let outcome = outcome.unwrap_or_else(|| {
                debug!(remote = %remote, ?timeout, "fetch timed out");
                FetchOutcome::TimedOut
            });
            FetchResult {
                remote: remote.clone(),
                outcome,
            }
        })
        .collect()
}

fn fetch_tags(git_dir: &Path, remote_name: &str) -> Result<()> {
    let repo = Git2Repo::open(git_dir)?;
    let mut remote = repo
        .find_remote(remote_name)
        .map_err(|e| GitSemverError::remote(format!("Cannot find remote '{}': {}", remote_name, e)))?;

    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");
        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });

    let mut fetch_options = git2::FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    remote
        .fetch(&[TAG_REFSPEC], Some(&mut fetch_options), None)
        .map_err(|e| GitSemverError::remote(format!("Fetch from '{}' failed: {}", remote_name, e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_no_remotes() {
        let results = fetch_remote_tags(Path::new("."), &[], Duration::from_millis(10));
        assert!(results.is_empty());
    }

    #[test]
    fn test_fetch_missing_repository_fails_per_remote() {
        let dir = tempfile::tempdir().unwrap();
        let remotes = vec!["origin".to_string(), "upstream".to_string()];

        let results = fetch_remote_tags(dir.path(), &remotes, Duration::from_secs(10));

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].remote, "origin");
        assert_eq!(results[1].remote, "upstream");
        for result in results {
            assert!(matches!(result.outcome, FetchOutcome::Failed(_)));
        }
    }

    #[test]
    fn test_fetch_repeated_remote_reports_each_entry() {
        let dir = tempfile::tempdir().unwrap();
        let remotes = vec!["origin".to_string(), "origin".to_string()];

        let results = fetch_remote_tags(dir.path(), &remotes, Duration::from_secs(10));

        assert_eq!(results.len(), 2);
        for result in results {
            assert_eq!(result.remote, "origin");
            assert!(matches!(result.outcome, FetchOutcome::Failed(_)));
        }
    }

    #[test]
    fn test_fetch_unknown_remote_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        let results = fetch_remote_tags(
            repo.path(),
            &["nowhere".to_string()],
            Duration::from_secs(10),
        );

        assert_eq!(results.len(), 1);
        match &results[0].outcome {
            FetchOutcome::Failed(reason) => assert!(reason.contains("nowhere")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
