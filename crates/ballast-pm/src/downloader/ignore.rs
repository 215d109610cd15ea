//! Ignore-rule matching for archive extraction.

use glob::Pattern;

use crate::error::{BallastError, Result};

/// An ordered set of glob rules deciding which archive-internal paths are
/// skipped during extraction.
///
/// Rules are evaluated top to bottom and the last matching rule wins: a
/// plain pattern excludes, a `!`-prefixed pattern re-includes. Patterns use
/// `glob` syntax with default options, so `*` crosses `/` and `dir/*`
/// covers the whole subtree.
pub struct IgnoreSet {
    rules: Vec<IgnoreRule>,
}

struct IgnoreRule {
    pattern: Pattern,
    negated: bool,
}

impl IgnoreSet {
    /// Compile an ordered rule list. Fails on a malformed glob.
    pub fn from_rules(rules: &[String]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|raw| {
                let (negated, pattern) = match raw.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, raw.as_str()),
                };
                Pattern::new(pattern)
                    .map(|pattern| IgnoreRule { pattern, negated })
                    .map_err(|e| {
                        BallastError::InstallationFailed(format!(
                            "Invalid ignore pattern \"{}\": {}",
                            raw, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether `path` (an archive-relative path) should be skipped.
    pub fn is_excluded(&self, path: &str) -> bool {
        let mut excluded = false;
        for rule in &self.rules {
            if rule.pattern.matches(path) {
                excluded = !rule.negated;
            }
        }
        excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(rules: &[&str]) -> IgnoreSet {
        let rules: Vec<String> = rules.iter().map(|s| s.to_string()).collect();
        IgnoreSet::from_rules(&rules).unwrap()
    }

    #[test]
    fn test_empty_set_excludes_nothing() {
        let ignore = set(&[]);
        assert!(ignore.is_empty());
        assert!(!ignore.is_excluded("any/path.txt"));
    }

    #[test]
    fn test_plain_exclusion() {
        let ignore = set(&["docs/*"]);
        assert!(ignore.is_excluded("docs/readme.md"));
        assert!(ignore.is_excluded("docs/api/index.html"));
        assert!(!ignore.is_excluded("src/lib.rs"));
    }

    #[test]
    fn test_negation_reincludes() {
        let ignore = set(&["dir/*", "!dir/file"]);
        assert!(ignore.is_excluded("dir/other"));
        assert!(!ignore.is_excluded("dir/file"));
    }

    #[test]
    fn test_last_match_wins() {
        let ignore = set(&["!dir/file", "dir/*"]);
        // The re-include comes first, so the later exclusion overrides it.
        assert!(ignore.is_excluded("dir/file"));

        let ignore = set(&["dir/*", "!dir/keep/*", "dir/keep/secret"]);
        assert!(ignore.is_excluded("dir/other"));
        assert!(!ignore.is_excluded("dir/keep/file"));
        assert!(ignore.is_excluded("dir/keep/secret"));
    }

    #[test]
    fn test_invalid_pattern() {
        let rules = vec!["[".to_string()];
        assert!(IgnoreSet::from_rules(&rules).is_err());
    }
}
