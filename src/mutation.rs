//! Surgical single-key INI mutations.
//!
//! Both operations treat the file in a minimal, surgical manner: every line
//! that is not the target of the requested mutation is reproduced
//! byte-for-byte — comments, blank lines, key casing, delimiter choice,
//! surrounding whitespace, per-line ending style, and a leading BOM all
//! survive. Newly inserted lines use the file's detected dominant line
//! ending and the plain `key=value` form.
//!
//! Section and key matching is case-insensitive; stored casing is never
//! rewritten. The global scope (`section = None`) is the area before the
//! first section header.
//!
//! Neither operation takes a lock: usage is single-writer, and a concurrent
//! external write during the read-modify-write window is an accepted
//! lost-update risk.

use crate::classify::{LineKind, ScopeTracker, classify};
use crate::document::{IniDocument, IniLine, backup_file};
use crate::error::ConfigResult;
use std::path::Path;

/// Options shared by the INI mutators
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationOptions {
    /// Copy the original file to a timestamped `.bak` sibling before writing.
    /// A backup failure aborts the write.
    pub backup_original_file: bool,
}

/// Result of [`remove_ini_key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// Number of key-value lines dropped
    pub removed: usize,
}

/// Result of [`set_ini_key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Number of key-value lines whose value segment was replaced
    pub updated: usize,
    /// Whether a new line was inserted; mutually exclusive with `updated > 0`
    pub inserted: bool,
}

/// Remove every in-scope occurrence of `key` from an INI file.
///
/// Matching lines are dropped together with their line endings; everything
/// else is copied verbatim. When nothing matches, the file is left untouched:
/// no write, no backup.
pub fn remove_ini_key(
    path: impl AsRef<Path>,
    section: Option<&str>,
    key: &str,
    options: MutationOptions,
) -> ConfigResult<RemoveOutcome> {
    let path = path.as_ref();
    let mut doc = IniDocument::read(path)?;

    let removed = remove_matches(&mut doc, section, key);
    if removed > 0 {
        if options.backup_original_file {
            backup_file(path)?;
        }
        doc.write(path)?;
    }

    Ok(RemoveOutcome { removed })
}

/// Update an in-scope `key` in place, or insert it when absent.
///
/// The update pass replaces only the value remainder of every in-scope match,
/// preserving indentation, key casing, delimiter, and the whitespace around
/// it. The insert pass runs only when the update pass changed nothing:
/// - target section exists: `key=value` becomes the section's last line,
///   immediately before the next section header or end of file (the first
///   matching section block receives it);
/// - `section` is `None` and the key is absent: appended at end of file, the
///   last existing line gaining a line ending only if it lacked one;
/// - target section absent anywhere: a `[section]` header plus `key=value`
///   are appended at end of file, separated from prior content by a blank
///   line when the file ended with a line break.
///
/// Exactly one of `updated > 0` or `inserted` holds per call.
pub fn set_ini_key(
    path: impl AsRef<Path>,
    section: Option<&str>,
    key: &str,
    value: &str,
    options: MutationOptions,
) -> ConfigResult<UpsertOutcome> {
    let path = path.as_ref();
    let mut doc = IniDocument::read(path)?;

    let updated = update_matches(&mut doc, section, key, value);
    let inserted = updated == 0;
    if inserted {
        insert_key(&mut doc, section, key, value);
    }

    if options.backup_original_file {
        backup_file(path)?;
    }
    doc.write(path)?;

    Ok(UpsertOutcome { updated, inserted })
}

fn remove_matches(doc: &mut IniDocument, section: Option<&str>, key: &str) -> usize {
    let key_lower = key.to_lowercase();
    let mut scope = ScopeTracker::new();
    let mut removed = 0;

    let mut kept = Vec::with_capacity(doc.lines.len());
    for line in std::mem::take(&mut doc.lines) {
        match classify(&line.content) {
            LineKind::Section { name } => {
                scope.enter(&name);
                kept.push(line);
            }
            LineKind::KeyValue { key: line_key, .. }
                if scope.matches(section) && line_key.to_lowercase() == key_lower =>
            {
                // Drop the line and its ending entirely.
                removed += 1;
            }
            _ => kept.push(line),
        }
    }
    doc.lines = kept;
    removed
}

fn update_matches(doc: &mut IniDocument, section: Option<&str>, key: &str, value: &str) -> usize {
    let key_lower = key.to_lowercase();
    let mut scope = ScopeTracker::new();
    let mut updated = 0;

    for line in &mut doc.lines {
        match classify(&line.content) {
            LineKind::Section { name } => scope.enter(&name),
            LineKind::KeyValue {
                key: line_key,
                value_start,
            } if scope.matches(section) && line_key.to_lowercase() == key_lower => {
                let mut next = String::with_capacity(value_start + value.len());
                next.push_str(&line.content[..value_start]);
                next.push_str(value);
                line.content = next;
                updated += 1;
            }
            _ => {}
        }
    }
    updated
}

fn insert_key(doc: &mut IniDocument, section: Option<&str>, key: &str, value: &str) {
    let eol = doc.eol.clone();
    let new_line = format!("{}={}", key, value);

    match section {
        None => {
            terminate_last_line(doc, &eol);
            doc.lines.push(IniLine::new(new_line, eol));
        }
        Some(name) => match section_end(doc, name) {
            Some(idx) => {
                if idx == doc.lines.len() {
                    terminate_last_line(doc, &eol);
                }
                doc.lines.insert(idx, IniLine::new(new_line, eol));
            }
            None => {
                // Appending a fresh section: an empty final record (file
                // ended with a break) becomes the separating blank line.
                if let Some(last) = doc.lines.last_mut() {
                    if last.ending.is_empty() {
                        last.ending = eol.clone();
                    }
                }
                doc.lines.push(IniLine::new(format!("[{}]", name), eol.clone()));
                doc.lines.push(IniLine::new(new_line, eol));
            }
        },
    }
}

/// Give the last line an ending if it has content but no terminator.
fn terminate_last_line(doc: &mut IniDocument, eol: &str) {
    if let Some(last) = doc.lines.last_mut() {
        if !last.content.is_empty() && last.ending.is_empty() {
            last.ending = eol.to_string();
        }
    }
}

/// Index just past the last line of the first section block matching `want`:
/// the index of the next section header, or one past the final record when
/// the section runs to end of file. `None` when the section does not exist.
fn section_end(doc: &IniDocument, want: &str) -> Option<usize> {
    let want_lower = want.trim().to_lowercase();
    let mut in_target = false;

    for (idx, line) in doc.lines.iter().enumerate() {
        if let LineKind::Section { name } = classify(&line.content) {
            if in_target {
                return Some(idx);
            }
            if name.to_lowercase() == want_lower {
                in_target = true;
            }
        }
    }

    in_target.then_some(doc.lines.len())
}
