//! Persisted set of job identifiers that have already been announced.
//!
//! Backed by a single JSON array rewritten wholesale on every change. The
//! set is capped at [`MAX_POSTED_ENTRIES`]; when it grows past that, the
//! lexicographically smallest identifiers are dropped. That is sort order,
//! not age: a recent posting whose identifier sorts early can be evicted
//! before an older one. Existing `posted_jobs.json` files depend on this
//! layout, so it is kept as is. Eviction only shapes the file: ids marked
//! during a run are remembered until the run ends.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::common::utils::{read_json, write_json_atomic};
use crate::domains::jobs::JobIdentifier;

pub const MAX_POSTED_ENTRIES: usize = 5000;

#[derive(Debug)]
pub struct PostedJobStore {
    path: PathBuf,
    posted: HashSet<JobIdentifier>,
    max_entries: usize,
}

impl PostedJobStore {
    /// Load the store from `path`. Never fails: a missing or unreadable file
    /// starts an empty set, which at worst re-announces jobs.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let posted = match read_json::<Vec<JobIdentifier>>(&path) {
            Ok(Some(ids)) => {
                tracing::debug!(path = %path.display(), count = ids.len(), "Loaded posted jobs");
                ids.into_iter().collect()
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "No posted jobs file, starting empty");
                HashSet::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{:#}", e),
                    "Failed to load posted jobs, starting empty"
                );
                HashSet::new()
            }
        };

        Self {
            path,
            posted,
            max_entries: MAX_POSTED_ENTRIES,
        }
    }

    /// Override the retention cap (tests, small deployments).
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Keep the loaded ids but persist to `path` from now on.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.posted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posted.is_empty()
    }

    pub fn has_been_posted(&self, id: &JobIdentifier) -> bool {
        self.posted.contains(id)
    }

    /// Record a successful announcement and persist right away. Persist
    /// errors are logged, never returned: the posting loop must keep going.
    pub fn mark_posted(&mut self, id: JobIdentifier) {
        self.posted.insert(id);
        if let Err(e) = self.persist() {
            tracing::error!(
                path = %self.path.display(),
                error = %format!("{:#}", e),
                "Failed to save posted jobs"
            );
        }
    }

    /// Apply the retention cap and atomically rewrite the backing file.
    ///
    /// The cap only shapes what is written. Ids stay in memory for the rest
    /// of the run, so a duplicate later in the same input is still skipped.
    pub fn persist(&self) -> Result<()> {
        write_json_atomic(&self.path, &self.retained_ids())
    }

    /// The largest `max_entries` identifiers in sorted order: what `persist` writes.
    pub fn retained_ids(&self) -> Vec<JobIdentifier> {
        let mut sorted = self.sorted_ids();
        if sorted.len() > self.max_entries {
            let dropped = sorted.len() - self.max_entries;
            sorted.drain(..dropped);
            tracing::debug!(dropped, retained = sorted.len(), "Evicted posted job ids");
        }
        sorted
    }

    /// Every identifier known this run, sorted.
    pub fn sorted_ids(&self) -> Vec<JobIdentifier> {
        let mut ids: Vec<JobIdentifier> = self.posted.iter().cloned().collect();
        ids.sort();
        ids
    }
}
