//! Learned-alias persistence
//!
//! Display names no alias rule could resolve are accumulated during a run and
//! appended to a JSON mapping on disk, each mapped to itself so the file can
//! be corrected externally and picked up by later runs. Existing learned
//! entries are never overwritten. A store that cannot be read or written is a
//! warning, never a fatal error: the run proceeds with an empty mapping.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::{CuratorError, CuratorResult};

pub struct AliasStore {
    path: PathBuf,
    learned: HashMap<String, String>,
    unresolved: BTreeSet<String>,
    load_failed: bool,
}

impl AliasStore {
    /// Load the learned tier from disk. A missing file yields an empty
    /// mapping; an unreadable or malformed file yields an empty mapping and
    /// disarms `flush` so the damaged file is not clobbered.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let (learned, load_failed) = if path.exists() {
            match std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|contents| {
                    serde_json::from_str::<HashMap<String, String>>(&contents)
                        .map_err(|e| e.to_string())
                }) {
                Ok(map) => {
                    debug!("Loaded {} learned aliases from {}", map.len(), path.display());
                    (map, false)
                }
                Err(e) => {
                    warn!(
                        "Failed to load learned aliases from {}: {} - continuing with an empty mapping",
                        path.display(),
                        e
                    );
                    (HashMap::new(), true)
                }
            }
        } else {
            (HashMap::new(), false)
        };

        Self {
            path,
            learned,
            unresolved: BTreeSet::new(),
            load_failed,
        }
    }

    /// In-memory store with no backing file, for callers that do not want
    /// cross-run persistence.
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            learned: HashMap::new(),
            unresolved: BTreeSet::new(),
            load_failed: false,
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.learned.get(name).map(String::as_str)
    }

    /// Record a display name that no rule could resolve.
    pub fn note_unresolved(&mut self, name: &str) {
        self.unresolved.insert(name.to_string());
    }

    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }

    /// Merge newly unresolved names into the learned tier (mapped to
    /// themselves, never overwriting an existing entry) and persist. The file
    /// is rewritten only when at least one new name was learned.
    pub fn flush(&mut self) -> CuratorResult<()> {
        let fresh: Vec<String> = self
            .unresolved
            .iter()
            .filter(|name| !self.learned.contains_key(*name))
            .cloned()
            .collect();

        if fresh.is_empty() {
            debug!("No new unresolved names; learned-alias store left untouched");
            return Ok(());
        }

        if self.load_failed {
            warn!(
                "Learned-alias store {} failed to load earlier; skipping persist of {} new names",
                self.path.display(),
                fresh.len()
            );
            return Ok(());
        }

        let fresh_count = fresh.len();
        for name in fresh {
            self.learned.insert(name.clone(), name);
        }

        if self.path.as_os_str().is_empty() {
            return Ok(());
        }

        // BTreeMap view for a deterministic file layout.
        let ordered: BTreeMap<&String, &String> = self.learned.iter().collect();
        let contents = serde_json::to_string_pretty(&ordered)
            .map_err(|e| CuratorError::persistence(self.path.display().to_string(), e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CuratorError::persistence(self.path.display().to_string(), e.to_string())
                })?;
            }
        }
        std::fs::write(&self.path, contents)
            .map_err(|e| CuratorError::persistence(self.path.display().to_string(), e.to_string()))?;

        info!(
            "Persisted {} newly learned aliases to {}",
            fresh_count,
            self.path.display()
        );
        Ok(())
    }
}
