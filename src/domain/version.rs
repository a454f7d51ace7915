use crate::domain::{BranchState, LowerBound, SemVerReleaseType};
use crate::error::ParseError;
use regex::Regex;
use semver::Prerelease;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const VERSION_PATTERN: &str = concat!(
    r"^(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)",
    r"(?:-(?P<pre>[A-Za-z][0-9A-Za-z]*(?:\.[0-9A-Za-z]+)*))?",
    r"(?:-(?P<commits>\d+)-(?P<hash>g?[0-9a-f]{4,40}))?",
    r"(?P<dirty>-dirty)?",
    r"(?P<snapshot>-SNAPSHOT)?$",
);

const DIRTY: &str = "dirty";
const SNAPSHOT: &str = "SNAPSHOT";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is a valid regex"))
}

/// How far a build is from the tag it was described against (`-N-<hash>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance {
    commits: u64,
    hash: String,
}

impl Distance {
    /// `hash` is an abbreviated commit id: 4 to 40 lowercase hex digits, optionally
    /// prefixed with `g` as `git describe` prints it.
    pub fn new(commits: u64, hash: impl Into<String>) -> Result<Self, ParseError> {
        let hash = hash.into();
        let digits = hash.strip_prefix('g').unwrap_or(&hash);
        let valid = (4..=40).contains(&digits.len())
            && digits.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !valid {
            return Err(ParseError::Component {
                input: hash,
                component: "commit hash",
            });
        }
        Ok(Distance { commits, hash })
    }

    /// Commits since the tag
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Abbreviated commit id, kept verbatim (including any `g` prefix)
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.commits, self.hash)
    }
}

/// Marker for a version that is not an exact, clean release.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// `-SNAPSHOT` or `-N-<hash>-SNAPSHOT`
    Snapshot(Option<Distance>),
    /// `-dirty`: the tagged commit with uncommitted changes
    Dirty,
    /// `-dirty-SNAPSHOT` or `-N-<hash>-dirty-SNAPSHOT`
    DirtySnapshot(Option<Distance>),
}

impl Qualifier {
    /// Build a qualifier from its parts. Returns `None` for the clean state.
    pub fn from_parts(distance: Option<Distance>, dirty: bool) -> Option<Qualifier> {
        match (distance, dirty) {
            (None, false) => None,
            (None, true) => Some(Qualifier::Dirty),
            (Some(distance), false) => Some(Qualifier::Snapshot(Some(distance))),
            (Some(distance), true) => Some(Qualifier::DirtySnapshot(Some(distance))),
        }
    }

    pub fn distance(&self) -> Option<&Distance> {
        match self {
            Qualifier::Snapshot(distance) | Qualifier::DirtySnapshot(distance) => distance.as_ref(),
            Qualifier::Dirty => None,
        }
    }

    /// True when the working tree had uncommitted changes
    pub fn is_dirty_tree(&self) -> bool {
        matches!(self, Qualifier::Dirty | Qualifier::DirtySnapshot(_))
    }

    pub fn is_snapshot(&self) -> bool {
        matches!(self, Qualifier::Snapshot(_) | Qualifier::DirtySnapshot(_))
    }

    fn sort_key(&self) -> (Option<&Distance>, bool, bool) {
        (self.distance(), self.is_dirty_tree(), self.is_snapshot())
    }
}

impl Ord for Qualifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Qualifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(distance) = self.distance() {
            write!(f, "-{}", distance)?;
        }
        if self.is_dirty_tree() {
            write!(f, "-{}", DIRTY)?;
        }
        if self.is_snapshot() {
            write!(f, "-{}", SNAPSHOT)?;
        }
        Ok(())
    }
}

/// Semantic version with an optional pre-release and dirty/snapshot qualifier.
///
/// Values are immutable: every transform returns a new version.
///
/// Ordering is numeric on major, minor, patch, then SemVer pre-release precedence, then the
/// qualifier. A qualified version always sorts below its clean counterpart, so
/// `1.2.3-dirty-SNAPSHOT < 1.2.3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    pre_release: Prerelease,
    qualifier: Option<Qualifier>,
}

impl SemanticVersion {
    /// Create a clean version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre_release: Prerelease::EMPTY,
            qualifier: None,
        }
    }

    /// Create a version carrying the given qualifier
    pub fn with_qualifier(major: u64, minor: u64, patch: u64, qualifier: Qualifier) -> Self {
        SemanticVersion {
            qualifier: Some(qualifier),
            ..SemanticVersion::new(major, minor, patch)
        }
    }

    /// Same numbers and pre-release, with the qualifier replaced
    pub fn requalified(&self, qualifier: Option<Qualifier>) -> SemanticVersion {
        SemanticVersion {
            qualifier,
            ..self.clone()
        }
    }

    /// Parse `MAJOR.MINOR.PATCH` followed by an optional suffix.
    ///
    /// Recognized suffixes, in order: a pre-release (`-rc1`, `-beta.2`), a describe distance
    /// (`-4-gabc1234`), `-dirty`, `-SNAPSHOT`. A distance is only valid on a snapshot.
    ///
    /// ```ignore
    /// let v = SemanticVersion::parse("1.2.3-4-gabc1234-dirty-SNAPSHOT")?;
    /// assert!(v.is_dirty());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let caps = version_regex()
            .captures(input)
            .ok_or_else(|| ParseError::malformed(input))?;

        let major = parse_component(input, &caps["major"], "major")?;
        let minor = parse_component(input, &caps["minor"], "minor")?;
        let patch = parse_component(input, &caps["patch"], "patch")?;

        let mut pre = caps.name("pre").map(|m| m.as_str());
        let distance = match (caps.name("commits"), caps.name("hash")) {
            (Some(commits), Some(hash)) => Some(Distance {
                commits: parse_component(input, commits.as_str(), "distance")?,
                hash: hash.as_str().to_string(),
            }),
            _ => None,
        };
        let mut dirty = caps.name("dirty").is_some();
        let mut snapshot = caps.name("snapshot").is_some();

        // The pre-release slot greedily swallows a bare `-dirty` or `-SNAPSHOT`.
        match pre {
            Some(DIRTY) if distance.is_none() && !dirty => {
                pre = None;
                dirty = true;
            }
            Some(SNAPSHOT) if distance.is_none() && !dirty && !snapshot => {
                pre = None;
                snapshot = true;
            }
            Some(DIRTY) | Some(SNAPSHOT) => return Err(ParseError::malformed(input)),
            _ => {}
        }

        let qualifier = match (distance, dirty, snapshot) {
            (None, false, false) => None,
            (None, true, false) => Some(Qualifier::Dirty),
            (distance, false, true) => Some(Qualifier::Snapshot(distance)),
            (distance, true, true) => Some(Qualifier::DirtySnapshot(distance)),
            (Some(_), _, false) => return Err(ParseError::malformed(input)),
        };

        let pre_release = match pre {
            Some(pre) => Prerelease::new(pre).map_err(|_| ParseError::PreRelease {
                input: input.to_string(),
                pre_release: pre.to_string(),
            })?,
            None => Prerelease::EMPTY,
        };

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            pre_release,
            qualifier,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The `(major, minor, patch)` triple
    pub fn numeric(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }

    pub fn pre_release(&self) -> Option<&str> {
        if self.pre_release.is_empty() {
            None
        } else {
            Some(self.pre_release.as_str())
        }
    }

    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }

    /// True iff the version carries a dirty or snapshot marker
    pub fn is_dirty(&self) -> bool {
        self.qualifier.is_some()
    }

    /// SemVer exempts `0.y.z` from any stability guarantee
    pub fn is_initial_dev_version(&self) -> bool {
        self.major == 0
    }

    /// Bump to the next clean release of the given kind.
    ///
    /// - **Major**: major += 1, minor = 0, patch = 0
    /// - **Minor**: minor += 1, patch = 0
    /// - **Patch**: patch += 1
    ///
    /// Pre-release and qualifier are always dropped. Fails with [ParseError::Overflow] when
    /// the bumped component is already `u64::MAX`.
    pub fn release(&self, kind: SemVerReleaseType) -> Result<SemanticVersion, ParseError> {
        let bump = |value: u64, component: &'static str| {
            value.checked_add(1).ok_or_else(|| ParseError::Overflow {
                input: self.to_string(),
                component,
            })
        };
        Ok(match kind {
            SemVerReleaseType::Major => SemanticVersion::new(bump(self.major, "major")?, 0, 0),
            SemVerReleaseType::Minor => {
                SemanticVersion::new(self.major, bump(self.minor, "minor")?, 0)
            }
            SemVerReleaseType::Patch => {
                SemanticVersion::new(self.major, self.minor, bump(self.patch, "patch")?)
            }
        })
    }

    /// Raise the version to `bound` if it is numerically below it.
    ///
    /// A raised version never becomes clean: it gets a snapshot qualifier derived from
    /// `branch`, and stays dirty if either the branch or the original version was dirty.
    pub fn lower_bound(&self, bound: &LowerBound, branch: &BranchState) -> SemanticVersion {
        if self.numeric() >= bound.numeric() {
            return self.clone();
        }

        let (major, minor, patch) = bound.numeric();
        SemanticVersion::with_qualifier(
            major,
            minor,
            patch,
            branch.snapshot_qualifier(self.qualifier.as_ref()),
        )
    }

    fn cmp_qualifier(&self, other: &Self) -> Ordering {
        match (&self.qualifier, &other.qualifier) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }
}

fn parse_component(input: &str, digits: &str, component: &'static str) -> Result<u64, ParseError> {
    let invalid = || ParseError::Component {
        input: input.to_string(),
        component,
    };
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(invalid());
    }
    digits.parse::<u64>().map_err(|_| invalid())
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.numeric()
            .cmp(&other.numeric())
            .then_with(|| self.pre_release.cmp(&other.pre_release))
            .then_with(|| self.cmp_qualifier(other))
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for SemanticVersion {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if let Some(qualifier) = &self.qualifier {
            write!(f, "{}", qualifier)?;
        }
        Ok(())
    }
}
