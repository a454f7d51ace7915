use crate::domain::{LowerBound, ReleaseVersion, SemVerReleaseType, TagPattern};
use crate::error::{GitSemverError, ParseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const LOCAL_CONFIG: &str = "./gitsemver.toml";
const USER_CONFIG: &str = ".gitsemver.toml";

/// Represents the complete configuration for git-semver.
///
/// Values are raw strings as written in the file; [Config::version_options] validates them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub remotes: RemotesConfig,
}

/// How the version is computed and which enforcement escapes apply
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct VersionConfig {
    /// Exact release version to report instead of reading history
    #[serde(default, rename = "override")]
    pub version_override: Option<String>,

    /// Floor applied to the history-derived version
    #[serde(default)]
    pub snapshot_lower_bound: Option<String>,

    /// Bump applied to the history-derived version: major, minor or patch
    #[serde(default)]
    pub release_type: Option<String>,

    #[serde(default)]
    pub ignore_dirty: bool,

    /// Strict SemVer is not enforced up to and including this version
    #[serde(default)]
    pub enforce_after_version: Option<String>,

    /// Last published release; the computed version must be greater
    #[serde(default)]
    pub previous_release: Option<String>,
}

/// Tag naming
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagsConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            pattern: default_tag_pattern(),
        }
    }
}

/// Remote tag refresh before reading history
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemotesConfig {
    #[serde(default = "default_fetch")]
    pub fetch: bool,

    #[serde(default = "default_remote_names")]
    pub names: Vec<String>,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch() -> bool {
    true
}

fn default_remote_names() -> Vec<String> {
    vec!["origin".to_string()]
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

impl Default for RemotesConfig {
    fn default() -> Self {
        RemotesConfig {
            fetch: default_fetch(),
            names: default_remote_names(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl RemotesConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Validated version settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionOptions {
    pub version_override: Option<ReleaseVersion>,
    pub snapshot_lower_bound: Option<LowerBound>,
    pub release_type: Option<SemVerReleaseType>,
    pub ignore_dirty: bool,
    pub enforce_after_version: Option<ReleaseVersion>,
    pub previous_release: Option<ReleaseVersion>,
}

impl Config {
    /// Parse every version-related setting, failing on the first invalid one.
    ///
    /// # Errors
    /// * `UnrecognizedReleaseType` - `release_type` is not major, minor or patch
    /// * `DirtyVersionOverride` - `override` is a dirty or snapshot version
    /// * `Parse` - any other malformed version string
    pub fn version_options(&self) -> Result<VersionOptions> {
        let version = &self.version;

        let release_type = version
            .release_type
            .as_deref()
            .map(str::parse::<SemVerReleaseType>)
            .transpose()?;

        let version_override = match version.version_override.as_deref() {
            Some(input) => Some(ReleaseVersion::parse(input).map_err(|e| match e {
                ParseError::Dirty { input } => GitSemverError::DirtyVersionOverride(input),
                other => GitSemverError::Parse(other),
            })?),
            None => None,
        };

        Ok(VersionOptions {
            version_override,
            snapshot_lower_bound: parse_optional(&version.snapshot_lower_bound, LowerBound::parse)?,
            release_type,
            ignore_dirty: version.ignore_dirty,
            enforce_after_version: parse_optional(&version.enforce_after_version, ReleaseVersion::parse)?,
            previous_release: parse_optional(&version.previous_release, ReleaseVersion::parse)?,
        })
    }

    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(&self.tags.pattern)
    }
}

fn parse_optional<T>(
    value: &Option<String>,
    parse: fn(&str) -> std::result::Result<T, ParseError>,
) -> Result<Option<T>> {
    Ok(value.as_deref().map(parse).transpose()?)
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitsemver.toml` in current directory
/// 3. `.gitsemver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG).exists() {
        fs::read_to_string(LOCAL_CONFIG)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
