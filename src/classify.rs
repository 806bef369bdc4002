//! INI line classification and section scope tracking.
//!
//! Classification decides only what a line *is*; it never rewrites anything.
//! The spans it reports let the mutators replace a value segment while
//! reproducing every other byte of the line.

use regex::Regex;
use std::sync::LazyLock;

/// `[Section Name]`, optionally surrounded by whitespace
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\[(.*?)\]\s*$").unwrap());

/// Leading `;` or `#` after optional whitespace
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[;#]").unwrap());

/// Key, delimiter (`:` or `=`), optional surrounding whitespace, value rest.
/// The key token may not start with whitespace, `=`, `:` or `#`.
static KEY_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^=:#\s][^=:#]*)\s*([:=])(\s*)(.*)$").unwrap());

/// What a physical INI line is
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Section header; `name` is the captured, trimmed section name
    Section { name: String },

    /// Comment or all-whitespace line, never eligible for key matching
    CommentOrBlank,

    /// Key-value line. `key` is the trimmed key text; `value_start` is the
    /// byte offset where the value remainder begins, i.e. everything before
    /// it (indentation, key casing, delimiter, surrounding whitespace) is
    /// reproduced verbatim on update.
    KeyValue { key: String, value_start: usize },

    /// Anything else; passed through unchanged
    Other,
}

/// Classify one line of INI content (without its line ending).
pub fn classify(line: &str) -> LineKind {
    if let Some(caps) = SECTION_RE.captures(line) {
        return LineKind::Section {
            name: caps[1].trim().to_string(),
        };
    }

    if COMMENT_RE.is_match(line) || line.trim().is_empty() {
        return LineKind::CommentOrBlank;
    }

    if let Some(caps) = KEY_VALUE_RE.captures(line) {
        return LineKind::KeyValue {
            key: caps[1].trim().to_string(),
            value_start: caps.get(4).map(|m| m.start()).unwrap_or(line.len()),
        };
    }

    LineKind::Other
}

/// Tracks which section the walk is currently inside.
///
/// Section identity is case-insensitive on trimmed names; the global scope is
/// the area before any header has been seen.
#[derive(Debug, Default)]
pub struct ScopeTracker {
    current: Option<String>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a section header was passed.
    pub fn enter(&mut self, name: &str) {
        self.current = Some(name.trim().to_string());
    }

    /// Is the current scope the requested one (`None` for global)?
    pub fn matches(&self, want: Option<&str>) -> bool {
        match (want, &self.current) {
            (None, None) => true,
            (Some(want), Some(current)) => {
                current.to_lowercase() == want.trim().to_lowercase()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_header() {
        assert_eq!(
            classify("  [ Video ]  "),
            LineKind::Section {
                name: "Video".to_string()
            }
        );
        assert_eq!(classify("[]"), LineKind::Section { name: String::new() });
    }

    #[test]
    fn test_comment_and_blank() {
        assert_eq!(classify("; comment"), LineKind::CommentOrBlank);
        assert_eq!(classify("   # comment"), LineKind::CommentOrBlank);
        assert_eq!(classify("   "), LineKind::CommentOrBlank);
        assert_eq!(classify(""), LineKind::CommentOrBlank);
    }

    #[test]
    fn test_key_value_spans() {
        let line = "Resolution :  1920x1080";
        match classify(line) {
            LineKind::KeyValue { key, value_start } => {
                assert_eq!(key, "Resolution");
                assert_eq!(&line[..value_start], "Resolution :  ");
                assert_eq!(&line[value_start..], "1920x1080");
            }
            other => panic!("expected key-value, got {:?}", other),
        }
    }

    #[test]
    fn test_key_value_empty_value() {
        match classify("Key=") {
            LineKind::KeyValue { key, value_start } => {
                assert_eq!(key, "Key");
                assert_eq!(value_start, 4);
            }
            other => panic!("expected key-value, got {:?}", other),
        }
    }

    #[test]
    fn test_other_lines_pass_through() {
        assert_eq!(classify("no delimiter here"), LineKind::Other);
        assert_eq!(classify("=starts with delim"), LineKind::Other);
    }

    #[test]
    fn test_scope_tracker() {
        let mut scope = ScopeTracker::new();
        assert!(scope.matches(None));
        assert!(!scope.matches(Some("Video")));

        scope.enter(" Video ");
        assert!(scope.matches(Some("video")));
        assert!(scope.matches(Some("  VIDEO")));
        assert!(!scope.matches(None));

        scope.enter("Audio");
        assert!(!scope.matches(Some("Video")));
    }
}
