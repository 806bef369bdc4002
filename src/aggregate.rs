//! Bounded-concurrency aggregation of manifest cache fragments.
//!
//! Scans a directory for KeyValues manifest files and parses each one under
//! a small fixed worker bound, capping open file descriptors on large
//! libraries. Results come back as a flat list once every worker has
//! drained; completion order across files is not significant and not
//! guaranteed — callers filter or search the flattened set.

use crate::error::{ConfigError, ConfigResult};
use crate::parser::KeyValuesParser;
use crate::types::{AppManifest, KeyValueNode};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default worker bound for concurrent manifest reads
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Extensions scanned by default
pub const MANIFEST_EXTENSIONS: [&str; 2] = ["acf", "vdf"];

/// One parsed manifest file
#[derive(Debug, Clone, PartialEq)]
pub struct CacheFragment {
    /// Where the fragment was read from
    pub path: PathBuf,
    /// Parsed KeyValues tree
    pub root: KeyValueNode,
}

impl CacheFragment {
    /// Read the app identifier and display name out of this fragment.
    pub fn app_manifest(&self) -> ConfigResult<AppManifest> {
        AppManifest::from_root(&self.root)
    }
}

/// Scan `dir` for `.acf`/`.vdf` files with the default worker bound.
pub async fn scan_cache_dir(dir: impl AsRef<Path>) -> ConfigResult<Vec<CacheFragment>> {
    scan_cache_dir_with(dir, &MANIFEST_EXTENSIONS, DEFAULT_CONCURRENCY).await
}

/// Scan `dir` for files with any of `extensions`, parsing at most
/// `concurrency` files at a time.
pub async fn scan_cache_dir_with(
    dir: impl AsRef<Path>,
    extensions: &[&str],
    concurrency: usize,
) -> ConfigResult<Vec<CacheFragment>> {
    let dir = dir.as_ref();
    let io = |err: std::io::Error| ConfigError::io(dir.display().to_string(), err.to_string());

    let mut entries = tokio::fs::read_dir(dir).await.map_err(io)?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io)? {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if matches {
            files.push(path);
        }
    }

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut join_set = JoinSet::new();
    for path in files {
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .expect("semaphore is never closed");
            let body = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| ConfigError::io(path.display().to_string(), err.to_string()))?;
            let root = KeyValuesParser::parse_body(&body)?;
            Ok(CacheFragment { path, root })
        });
    }

    let mut fragments = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        let result: ConfigResult<CacheFragment> =
            joined.map_err(|err| ConfigError::io(dir.display().to_string(), err.to_string()))?;
        fragments.push(result?);
    }
    Ok(fragments)
}
