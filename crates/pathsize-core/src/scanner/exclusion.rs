/// Exclusion patterns: paths that are never materialised as nodes.
///
/// Each pattern is a regular expression matched against a candidate's full
/// path, anchored at the start of the string (so `/var` also prunes
/// `/various`). Patterns keep their configured order; the first match wins
/// and is reported back so the skip can be logged.
use crate::error::{Result, TreeError};
use regex::Regex;

#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    patterns: Vec<Pattern>,
}

#[derive(Debug, Clone)]
struct Pattern {
    source: String,
    regex: Regex,
}

impl ExclusionSet {
    /// A set that excludes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile `patterns` in order. Fails on the first invalid expression.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| -> Result<Pattern> {
                let text = p.as_ref().to_string();
                // Anchor at the start only; a trailing remainder is allowed.
                let regex = Regex::new(&format!("^(?:{text})")).map_err(|source| {
                    TreeError::InvalidPattern {
                        pattern: text.clone(),
                        source,
                    }
                })?;
                Ok(Pattern {
                    source: text,
                    regex,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The first pattern (as configured) that matches `full_path`, if any.
    pub fn matching(&self, full_path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(full_path))
            .map(|p| p.source.as_str())
    }

    /// `true` if any pattern matches `full_path`.
    #[inline]
    pub fn is_excluded(&self, full_path: &str) -> bool {
        self.matching(full_path).is_some()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_anchored_at_start() {
        let set = ExclusionSet::new(["/dev"]).unwrap();
        assert!(set.is_excluded("/dev"));
        assert!(set.is_excluded("/dev/null"));
        assert!(set.is_excluded("/devices"));
        assert!(!set.is_excluded("/home/dev"));
    }

    #[test]
    fn test_first_match_is_reported() {
        let set = ExclusionSet::new([r"/Users/[^/]*/Library/Containers/.*", "/Users"]).unwrap();
        assert_eq!(
            set.matching("/Users/amy/Library/Containers/app"),
            Some(r"/Users/[^/]*/Library/Containers/.*")
        );
        assert_eq!(set.matching("/Users/amy/Documents"), Some("/Users"));
        assert_eq!(set.matching("/opt"), None);
    }

    #[test]
    fn test_alternation_stays_anchored() {
        let set = ExclusionSet::new(["/a|/b"]).unwrap();
        assert!(set.is_excluded("/b/x"));
        assert!(!set.is_excluded("/x/b"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = ExclusionSet::new(["/ok", "(unclosed"]).unwrap_err();
        assert!(matches!(err, TreeError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_empty_excludes_nothing() {
        let set = ExclusionSet::empty();
        assert!(set.is_empty());
        assert!(!set.is_excluded("/anything"));
    }
}
