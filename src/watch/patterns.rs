// src/watch/patterns.rs

use std::fmt;
use std::path::Path;

use globset::Glob;
use regex::bytes::Regex;

use crate::errors::Result;

/// Regex source used when neither `regex` nor `pattern` is configured.
pub const MATCH_ALL: &str = ".*";

/// Compiled predicate deciding which written files trigger the reaction.
///
/// Matching happens against the raw bytes of the full target path, so paths
/// that are not valid UTF-8 are still matched rather than skipped.
///
/// - [`MatchPredicate::from_regex`] anchors the user's regex at the start of
///   the path only (a prefix match), so `.*\.py` matches `/w/a.py` while
///   `\.py` does not.
/// - [`MatchPredicate::from_glob`] translates a shell pattern with `globset`;
///   the resulting regex is anchored at both ends and `*` also crosses `/`,
///   so `*.txt` matches `/a/b/note.txt`.
#[derive(Clone)]
pub struct MatchPredicate {
    source: String,
    regex: Regex,
}

impl fmt::Debug for MatchPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchPredicate")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl MatchPredicate {
    pub fn from_regex(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})"))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn from_glob(pattern: &str) -> Result<Self> {
        let glob = Glob::new(pattern)?;
        let regex = Regex::new(glob.regex())?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Predicate that accepts every path.
    pub fn match_all() -> Result<Self> {
        Self::from_regex(MATCH_ALL)
    }

    /// The pattern as the user wrote it.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.regex.is_match(path.as_os_str().as_encoded_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_matches_whole_path() {
        let p = MatchPredicate::from_glob("*.txt").unwrap();
        assert!(p.is_match(Path::new("/a/b/note.txt")));
        assert!(!p.is_match(Path::new("/a/b/note.log")));
        assert!(!p.is_match(Path::new("/a/b/note.txt.bak")));
    }

    #[test]
    fn glob_character_classes_and_wildcards() {
        let p = MatchPredicate::from_glob("/w/src/?[ab].rs").unwrap();
        assert!(p.is_match(Path::new("/w/src/xa.rs")));
        assert!(p.is_match(Path::new("/w/src/yb.rs")));
        assert!(!p.is_match(Path::new("/w/src/xc.rs")));
    }

    #[test]
    fn regex_is_anchored_at_start_only() {
        let p = MatchPredicate::from_regex(r".*\.py").unwrap();
        assert!(p.is_match(Path::new("/w/a.py")));
        // Prefix match: trailing text is allowed.
        assert!(p.is_match(Path::new("/w/a.pyc")));

        let unanchored = MatchPredicate::from_regex(r"\.py").unwrap();
        assert!(!unanchored.is_match(Path::new("/w/a.py")));
    }

    #[test]
    fn regex_alternation_stays_anchored() {
        let p = MatchPredicate::from_regex("/x|/y").unwrap();
        assert!(p.is_match(Path::new("/y/file")));
        assert!(!p.is_match(Path::new("/w/y/file")));
    }

    #[test]
    fn match_all_accepts_everything() {
        let p = MatchPredicate::match_all().unwrap();
        assert!(p.is_match(Path::new("/anything/at/all")));
        assert_eq!(p.source(), MATCH_ALL);
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        assert!(MatchPredicate::from_regex("(unclosed").is_err());
        assert!(MatchPredicate::from_glob("[unclosed").is_err());
    }
}
