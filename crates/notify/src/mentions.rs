//! Keyword → mention target directory.
//!
//! Loaded from a flat JSON object such as `{"disk": "13800000000"}`. A reload
//! decodes the whole file first and then swaps the shared map pointer, so
//! readers see either the old map or the new one, never a mix.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::de::Error as _;
use tracing::debug;

use crate::error::NotifyError;

type Directory = Arc<BTreeMap<String, String>>;

/// Shared handle to the current keyword directory.
///
/// Cloning the handle shares the same directory. Reads never lock: they load
/// the current pointer and match against that immutable snapshot.
#[derive(Debug, Clone, Default)]
pub struct MentionDirectory {
    current: Arc<ArcSwap<BTreeMap<String, String>>>,
}

impl MentionDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from an in-memory map.
    pub fn from_map(map: BTreeMap<String, String>) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(map)),
        }
    }

    /// Read and decode `path`, then replace the current directory with it.
    ///
    /// Returns the number of keywords loaded. On any error the previous
    /// directory stays in place.
    pub fn load(&self, path: &Path) -> Result<usize, NotifyError> {
        let map = read_directory(path)?;
        let count = map.len();
        self.replace(map);
        debug!(path = %path.display(), keywords = count, "mention directory loaded");
        Ok(count)
    }

    /// Swap in a new map wholesale.
    pub fn replace(&self, map: BTreeMap<String, String>) {
        self.current.store(Arc::new(map));
    }

    /// The directory as of now. Later reloads do not affect the snapshot.
    pub fn snapshot(&self) -> Directory {
        self.current.load_full()
    }

    /// Targets for every keyword that occurs in `text`, in keyword order.
    ///
    /// One entry per matched keyword: two keywords mapping to the same
    /// target yield that target twice.
    pub fn matches(&self, text: &str) -> Vec<String> {
        self.snapshot()
            .iter()
            .filter(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, target)| target.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

fn read_directory(path: &Path) -> Result<BTreeMap<String, String>, NotifyError> {
    let bytes = fs::read(path).map_err(|source| NotifyError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let decode = |source| NotifyError::Decode {
        what: "mention directory",
        source,
    };

    let map: BTreeMap<String, String> = serde_json::from_slice(&bytes).map_err(decode)?;

    // An empty keyword is a substring of every body.
    if map.contains_key("") {
        return Err(decode(serde_json::Error::custom(
            "mention keywords must not be empty",
        )));
    }

    Ok(map)
}
