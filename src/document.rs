//! Source-fidelity document model for INI files.
//!
//! An [`IniDocument`] is an ordered list of [`IniLine`] records, each pairing
//! a line's content with the exact line-ending bytes that followed it in the
//! source. Serializing an unmodified document reproduces the input
//! byte-for-byte: comments, blank lines, casing, indentation, mixed line
//! endings, and a leading byte-order mark all survive.
//!
//! The final record always exists and always has an empty ending; when the
//! source ends with a line break, that record has empty content as well. The
//! mutators rely on this shape when deciding whether an end-of-file insertion
//! needs a terminating or separating line break.

use crate::error::{ConfigError, ConfigResult};
use chrono::{SecondsFormat, Utc};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Any of the three line-ending styles, first match wins for EOL detection.
static EOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\n|\r").unwrap());

const BOM: char = '\u{feff}';

/// One physical line: content plus the line-ending bytes that followed it
#[derive(Debug, Clone, PartialEq)]
pub struct IniLine {
    /// Line content without its terminator
    pub content: String,
    /// The exact terminator from the source; empty for a final unterminated line
    pub ending: String,
}

impl IniLine {
    pub fn new(content: impl Into<String>, ending: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ending: ending.into(),
        }
    }
}

/// An INI file held in memory with full source fidelity
#[derive(Debug, Clone, PartialEq)]
pub struct IniDocument {
    /// Ordered line records
    pub lines: Vec<IniLine>,
    /// Whether the source began with a UTF-8 byte-order mark
    pub bom: bool,
    /// Dominant line ending, taken from the first break in the source
    pub eol: String,
}

impl IniDocument {
    /// Split a text body into line records, detecting BOM and dominant EOL.
    pub fn parse(text: &str) -> Self {
        let (bom, text) = match text.strip_prefix(BOM) {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let eol = EOL_RE
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "\n".to_string());

        let mut lines = Vec::new();
        let mut last = 0;
        for m in EOL_RE.find_iter(text) {
            lines.push(IniLine::new(&text[last..m.start()], m.as_str()));
            last = m.end();
        }
        // Final record, empty ending; empty content when the text ends with a break.
        lines.push(IniLine::new(&text[last..], ""));

        Self { lines, bom, eol }
    }

    /// Read and parse an INI file.
    pub fn read(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::io(path.display().to_string(), err.to_string()))?;
        Ok(Self::parse(&text))
    }

    /// Serialize the document back to text, reproducing the BOM if present.
    pub fn serialize(&self) -> String {
        let capacity = self
            .lines
            .iter()
            .map(|line| line.content.len() + line.ending.len())
            .sum::<usize>()
            + BOM.len_utf8();

        let mut out = String::with_capacity(capacity);
        if self.bom {
            out.push(BOM);
        }
        for line in &self.lines {
            out.push_str(&line.content);
            out.push_str(&line.ending);
        }
        out
    }

    /// Write the serialized document to a file.
    pub fn write(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.serialize())
            .map_err(|err| ConfigError::io(path.display().to_string(), err.to_string()))
    }
}

/// Copy `path` to a timestamped `<path>.bak.<ISO-8601>` sibling.
///
/// A failed copy is a [`ConfigError::BackupFailed`]; callers abort the
/// pending mutation write when this fails.
pub fn backup_file(path: impl AsRef<Path>) -> ConfigResult<PathBuf> {
    let path = path.as_ref();
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let dest = PathBuf::from(format!("{}.bak.{}", path.display(), stamp));

    std::fs::copy(path, &dest)
        .map_err(|err| ConfigError::backup(dest.display().to_string(), err.to_string()))?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_is_byte_identical() {
        let text = "; comment\r\n[Video]\nResolution :  1920x1080\r\n\n\tindented\r";
        assert_eq!(IniDocument::parse(text).serialize(), text);
    }

    #[test]
    fn test_bom_round_trip() {
        let text = "\u{feff}[S]\r\nK=old\r\n";
        let doc = IniDocument::parse(text);
        assert!(doc.bom);
        assert_eq!(doc.eol, "\r\n");
        assert_eq!(doc.serialize(), text);
    }

    #[test]
    fn test_final_record_shape() {
        let doc = IniDocument::parse("a=1\n");
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.lines[1], IniLine::new("", ""));

        let doc = IniDocument::parse("a=1");
        assert_eq!(doc.lines.len(), 1);
        assert_eq!(doc.lines[0], IniLine::new("a=1", ""));
    }

    #[test]
    fn test_eol_detection_favors_first_break() {
        assert_eq!(IniDocument::parse("a=1\r\nb=2\n").eol, "\r\n");
        assert_eq!(IniDocument::parse("a=1\nb=2\r\n").eol, "\n");
        assert_eq!(IniDocument::parse("no breaks").eol, "\n");
    }
}
