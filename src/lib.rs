//! # steamcfg
//!
//! A parser for Valve's KeyValues serialization (the VDF/ACF text format used
//! by Steam app manifests and compatibility-tool mapping caches), paired with
//! a surgical INI editor that mutates a single key while reproducing every
//! other byte of the file.
//!
//! ## Features
//!
//! - **KeyValues parsing**: brace-delimited, tab-separated VDF/ACF text into
//!   a nested, insertion-ordered tree ([`KeyValueNode`])
//! - **Typed manifest readers**: app id / display name ([`AppManifest`]) and
//!   the compatibility-tool mapping table ([`compat_tool_mappings`])
//! - **Surgical INI mutation** (optional): single-key remove and upsert with
//!   byte-for-byte preservation of untouched lines — comments, casing,
//!   delimiter choice, whitespace, per-line endings, and BOM
//! - **Bounded aggregation** (optional): parse a directory of manifests under
//!   a fixed concurrency bound
//!
//! ## Optional Features
//!
//! ### `mutation` Feature
//!
//! ```toml
//! [dependencies]
//! steamcfg = { version = "0.3", features = ["mutation"] }
//! ```
//!
//! This provides [`set_ini_key`], [`remove_ini_key`], and the underlying
//! [`IniDocument`] fidelity model. The mutators read, transform in memory,
//! optionally back up, write, and return counts — they never reorder or
//! reformat anything they were not asked to touch.
//!
//! ### `aggregate` Feature
//!
//! Enables [`scan_cache_dir`], which enumerates a directory's `.acf`/`.vdf`
//! files and parses them under a worker bound (default 8, to cap open file
//! descriptors on large libraries), returning a flat fragment list.
//!
//! ## Example
//!
//! ```rust
//! use steamcfg::{AppManifest, KeyValuesParser};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = KeyValuesParser::parse_body(
//!     "\"AppState\"\n{\n\t\"appid\"\t\"440\"\n\t\"name\"\t\"Team Fortress 2\"\n}",
//! )?;
//!
//! let manifest = AppManifest::from_root(&root)?;
//! assert_eq!(manifest.app_id, "440");
//! assert_eq!(manifest.name, "Team Fortress 2");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error model
//!
//! Engine functions return [`ConfigResult`] and never log, retry, or make
//! user-facing decisions; messaging and exit codes belong to the calling
//! layer. I/O errors carry the offending path and the wrapped OS message.

// Module declarations
mod error;
mod parser;
mod types;

// Feature-gated modules
#[cfg(feature = "mutation")]
mod classify;

#[cfg(feature = "mutation")]
mod document;

#[cfg(feature = "mutation")]
mod mutation;

#[cfg(feature = "aggregate")]
mod aggregate;

// Public API exports
pub use error::{ConfigError, ConfigResult};
pub use parser::KeyValuesParser;
pub use types::{AppManifest, CompatToolMapping, KeyValueNode, compat_tool_mappings};

// Feature-gated exports
#[cfg(feature = "mutation")]
pub use classify::{LineKind, ScopeTracker, classify};

#[cfg(feature = "mutation")]
pub use document::{IniDocument, IniLine, backup_file};

#[cfg(feature = "mutation")]
pub use mutation::{MutationOptions, RemoveOutcome, UpsertOutcome, remove_ini_key, set_ini_key};

#[cfg(feature = "aggregate")]
pub use aggregate::{
    CacheFragment, DEFAULT_CONCURRENCY, MANIFEST_EXTENSIONS, scan_cache_dir, scan_cache_dir_with,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parsing() {
        let root = KeyValuesParser::parse_body("key1\n{\n\tvalue1\tdata1\n}").unwrap();
        assert_eq!(root.lookup(&["key1", "value1"]).unwrap().as_str(), Some("data1"));
    }

    #[test]
    fn test_empty_body_rejected() {
        assert!(matches!(
            KeyValuesParser::parse_body(""),
            Err(ConfigError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_quoted_tokens() {
        let root = KeyValuesParser::parse_body("key1\n{\n\tvalue1\t\"quoted data\"\n}").unwrap();
        assert_eq!(
            root.lookup(&["key1", "value1"]).unwrap().as_str(),
            Some("quoted data")
        );
    }
}
