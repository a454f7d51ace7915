use crate::error::{GitSemverError, Result};

const PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    prefix: String,
    suffix: String,
}

impl TagPattern {
    /// Create a tag pattern; it must contain exactly one `{version}` placeholder
    pub fn new(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.split(PLACEHOLDER).collect();
        if parts.len() != 2 {
            return Err(GitSemverError::config(format!(
                "Invalid tag pattern '{}': should have exactly one {{version}} placeholder",
                pattern
            )));
        }

        Ok(TagPattern {
            prefix: parts[0].to_string(),
            suffix: parts[1].to_string(),
        })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &str) -> String {
        format!("{}{}{}", self.prefix, version, self.suffix)
    }

    /// Glob handed to `git describe --match`
    pub fn glob(&self) -> String {
        format!("{}*{}", self.prefix, self.suffix)
    }

    /// Extract the version part of a tag (e.g., "v1.2.3" -> "1.2.3")
    pub fn version_part<'a>(&self, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
            .filter(|part| !part.is_empty())
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            prefix: "v".to_string(),
            suffix: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::new("v{version}").unwrap();
        assert_eq!(pattern.format("1.2.3"), "v1.2.3");
    }

    #[test]
    fn test_pattern_format_with_suffix() {
        let pattern = TagPattern::new("release-{version}-final").unwrap();
        assert_eq!(pattern.format("1.2.3"), "release-1.2.3-final");
        assert_eq!(pattern.glob(), "release-*-final");
    }

    #[test]
    fn test_pattern_version_part() {
        let pattern = TagPattern::default();
        assert_eq!(pattern.version_part("v1.2.3"), Some("1.2.3"));
        assert_eq!(pattern.version_part("release-1.2.3"), None);
        assert_eq!(pattern.version_part("v"), None);

        let bare = TagPattern::new("{version}").unwrap();
        assert_eq!(bare.version_part("1.2.3"), Some("1.2.3"));
        assert_eq!(bare.glob(), "*");
    }

    #[test]
    fn test_pattern_requires_single_placeholder() {
        assert!(TagPattern::new("v1.2.3").is_err());
        assert!(TagPattern::new("{version}-{version}").is_err());
    }
}
