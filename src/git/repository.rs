use crate::domain::{BranchState, Distance, ReleaseVersion, SemanticVersion, TagPattern};
use crate::error::{GitSemverError, Result};
use crate::git::{remote, FetchResult, HistoryVersion, VersionSource};
use git2::{DescribeFormatOptions, DescribeOptions, Repository as Git2Repo};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, info};

const DIRTY_SUFFIX: &str = "-dirty";

fn describe_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<tag>.+)-(?P<commits>\d+)-g(?P<hash>[0-9a-f]+)$")
            .expect("describe pattern is a valid regex")
    })
}

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    git_dir: PathBuf,
    tag_pattern: TagPattern,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P, tag_pattern: TagPattern) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Git2Repository::from_git2(repo, tag_pattern))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo, tag_pattern: TagPattern) -> Self {
        let git_dir = repo.path().to_path_buf();
        Git2Repository {
            repo,
            git_dir,
            tag_pattern,
        }
    }

    /// `git describe --tags --long --always [--dirty]` over tags matching the pattern
    fn describe(&self, ignore_dirty: bool) -> Result<String> {
        let mut options = DescribeOptions::new();
        options
            .describe_tags()
            .pattern(&self.tag_pattern.glob())
            .show_commit_oid_as_fallback(true);

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(7).always_use_long_format(true);
        if !ignore_dirty {
            format.dirty_suffix(DIRTY_SUFFIX);
        }

        let description = self.repo.describe(&options)?.format(Some(&format))?;
        debug!(%description, "described HEAD");
        Ok(description)
    }

    fn count_commits(&self) -> Result<u64> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;
        let mut count = 0;
        for oid in revwalk {
            oid?;
            count += 1;
        }
        Ok(count)
    }

    fn release_from_tag(&self, tag: &str) -> Result<ReleaseVersion> {
        let version_part = self.tag_pattern.version_part(tag).ok_or_else(|| {
            GitSemverError::tag(format!("Tag '{}' does not match the configured pattern", tag))
        })?;
        ReleaseVersion::parse(version_part).map_err(|e| {
            GitSemverError::tag(format!("Tag '{}' is not a release version: {}", tag, e))
        })
    }
}

impl VersionSource for Git2Repository {
    fn current_version_from_history(&self, ignore_dirty: bool) -> Result<HistoryVersion> {
        let description = self.describe(ignore_dirty)?;
        let (description, dirty) = match description.strip_suffix(DIRTY_SUFFIX) {
            Some(rest) if !ignore_dirty => (rest.to_string(), true),
            _ => (description, false),
        };

        let Some(caps) = describe_regex().captures(&description) else {
            // No matching tag: describe fell back to the abbreviated commit id
            let distance = Distance::new(self.count_commits()?, format!("g{}", description))?;
            let branch = BranchState::new(Some(distance), dirty);
            let version =
                SemanticVersion::new(0, 0, 0).requalified(Some(branch.snapshot_qualifier(None)));
            info!(%version, "no release tag found");
            return Ok(HistoryVersion {
                version,
                branch,
                tag: None,
            });
        };

        let tag = caps["tag"].to_string();
        let commits: u64 = caps["commits"]
            .parse()
            .map_err(|_| GitSemverError::tag(format!("Invalid describe output '{}'", description)))?;
        let distance = if commits > 0 {
            Some(Distance::new(commits, format!("g{}", &caps["hash"]))?)
        } else {
            None
        };

        let release = self.release_from_tag(&tag)?;
        let branch = BranchState::new(distance, dirty);
        let version = release.as_semantic().requalified(branch.qualifier());
        info!(%tag, %version, "derived version from history");

        Ok(HistoryVersion {
            version,
            branch,
            tag: Some(tag),
        })
    }

    fn fetch_remote_tags(&self, remotes: &[String], timeout: Duration) -> Vec<FetchResult> {
        let configured = match self.repo.remotes() {
            Ok(names) => names.iter().flatten().map(str::to_string).collect::<Vec<_>>(),
            Err(e) => {
                debug!(error = %e, "cannot list remotes, fetching all requested");
                return remote::fetch_remote_tags(&self.git_dir, remotes, timeout);
            }
        };

        let (known, unknown): (Vec<String>, Vec<String>) = remotes
            .iter()
            .cloned()
            .partition(|name| configured.contains(name));
        if !unknown.is_empty() {
            debug!(remotes = ?unknown, "skipping remotes not configured in the repository");
        }
        remote::fetch_remote_tags(&self.git_dir, &known, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::FetchOutcome;
    use std::fs;

    fn commit_file(repo: &Git2Repo, name: &str, contents: &str) -> git2::Oid {
        let workdir = repo.workdir().unwrap();
        fs::write(workdir.join(name), contents).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let signature = git2::Signature::now("Test Author", "test@example.com").unwrap();

        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &format!("update {}", name),
            &tree,
            &parent_refs,
        )
        .unwrap()
    }

    fn tag_head(repo: &Git2Repo, name: &str) {
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.tag_lightweight(name, head.as_object(), false).unwrap();
    }

    fn source(dir: &Path) -> Git2Repository {
        Git2Repository::open(dir, TagPattern::default()).unwrap()
    }

    #[test]
    fn test_exactly_on_tag() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit_file(&repo, "a.txt", "one");
        tag_head(&repo, "v1.2.3");

        let history = source(dir.path()).current_version_from_history(false).unwrap();
        assert_eq!(history.version.to_string(), "1.2.3");
        assert_eq!(history.tag.as_deref(), Some("v1.2.3"));
        assert!(history.branch.is_on_tag());
    }

    #[test]
    fn test_commits_past_tag() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit_file(&repo, "a.txt", "one");
        tag_head(&repo, "v1.2.3");
        commit_file(&repo, "a.txt", "two");
        let head = commit_file(&repo, "a.txt", "three");

        let history = source(dir.path()).current_version_from_history(false).unwrap();
        let short = &head.to_string()[..7];
        assert_eq!(
            history.version.to_string(),
            format!("1.2.3-2-g{}-SNAPSHOT", short)
        );
        assert_eq!(history.branch.distance.as_ref().map(|d| d.commits()), Some(2));
    }

    #[test]
    fn test_dirty_working_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit_file(&repo, "a.txt", "one");
        tag_head(&repo, "v1.2.3");
        fs::write(dir.path().join("a.txt"), "uncommitted").unwrap();

        let source = source(dir.path());
        let history = source.current_version_from_history(false).unwrap();
        assert_eq!(history.version.to_string(), "1.2.3-dirty");
        assert!(history.branch.dirty);

        let history = source.current_version_from_history(true).unwrap();
        assert_eq!(history.version.to_string(), "1.2.3");
    }

    #[test]
    fn test_no_tags() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit_file(&repo, "a.txt", "one");
        commit_file(&repo, "b.txt", "two");

        let history = source(dir.path()).current_version_from_history(false).unwrap();
        assert_eq!(history.tag, None);
        assert!(history.version.is_initial_dev_version());
        assert!(history.version.is_dirty());
        assert!(history.version.to_string().starts_with("0.0.0-2-g"));
        assert!(history.version.to_string().ends_with("-SNAPSHOT"));
    }

    #[test]
    fn test_tags_outside_pattern_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit_file(&repo, "a.txt", "one");
        tag_head(&repo, "v1.0.0");
        commit_file(&repo, "a.txt", "two");
        tag_head(&repo, "nightly");

        let history = source(dir.path()).current_version_from_history(false).unwrap();
        assert_eq!(history.tag.as_deref(), Some("v1.0.0"));
        assert!(history.version.is_dirty());
    }

    #[test]
    fn test_unparsable_tag_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit_file(&repo, "a.txt", "one");
        tag_head(&repo, "vnext");

        let err = source(dir.path())
            .current_version_from_history(false)
            .unwrap_err();
        assert!(matches!(err, GitSemverError::Tag(_)));
    }

    #[test]
    fn test_fetch_skips_unconfigured_remotes() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit_file(&repo, "a.txt", "one");

        let results =
            source(dir.path()).fetch_remote_tags(&["origin".to_string()], Duration::from_secs(5));
        assert!(results.is_empty());
    }

    #[test]
    fn test_fetch_configured_remote_is_attempted() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        commit_file(&repo, "a.txt", "one");
        let missing = dir.path().join("no-such-upstream");
        repo.remote("upstream", missing.to_str().unwrap()).unwrap();

        let remotes = vec!["origin".to_string(), "upstream".to_string()];
        let results = source(dir.path()).fetch_remote_tags(&remotes, Duration::from_secs(10));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].remote, "upstream");
        assert!(matches!(results[0].outcome, FetchOutcome::Failed(_)));
    }
}
