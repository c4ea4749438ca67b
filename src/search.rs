//! Recursive directory search fanned out over the worker pool.

use crate::thread_pool::{TaskHandle, WorkerPool};
use crate::{Result, SearchErrorKind};
use failure::ResultExt;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Number of workers a Searcher uses unless configured otherwise
pub const DEFAULT_WORKERS: usize = 8;

/// Shared slot for the found path. The first publish wins; later
/// publishers see the slot taken and leave it alone.
struct MatchSlot {
    found: Mutex<Option<PathBuf>>,
}

impl MatchSlot {
    fn new() -> Self {
        Self {
            found: Mutex::new(None),
        }
    }

    /// set the slot if still empty, reporting whether this write took
    fn publish(&self, path: PathBuf) -> bool {
        let mut found = self.found.lock().unwrap();
        if found.is_none() {
            *found = Some(path);
            true
        } else {
            false
        }
    }

    fn is_set(&self) -> bool {
        self.found.lock().unwrap().is_some()
    }
}

/// One top-level branch of the search: a file child compared on the
/// spot, or a directory child walked by a pool task
enum Branch {
    Inline(Option<PathBuf>),
    Task(TaskHandle<Option<PathBuf>>),
}

/// Concurrent exact-name file search over a directory tree
pub struct Searcher {
    workers: usize,
}

impl Searcher {
    /// create a Searcher with the default worker count
    pub fn new() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }

    /// create a Searcher with a custom worker count, at least one
    pub fn with_workers(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(SearchErrorKind::InvalidPoolSize.into());
        }
        Ok(Self { workers })
    }

    /// Search for a file named `target` anywhere under `root`.
    ///
    /// Each directory child of `root` is walked by its own pool task;
    /// file children are compared inline. When several branches match,
    /// the first match in submission order wins. Returns `Ok(None)`
    /// when the tree holds no match and an error when `root` itself
    /// cannot be enumerated.
    pub fn find(&self, root: impl AsRef<Path>, target: &str) -> Result<Option<PathBuf>> {
        let root = root.as_ref();
        let entries = fs::read_dir(root).context(SearchErrorKind::IoError)?;

        let pool = WorkerPool::new(self.workers)?;
        let slot = Arc::new(MatchSlot::new());
        let target_name = OsString::from(target);

        let mut branches = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    debug!("skipping unreadable entry under {:?}: {}", root, error);
                    continue;
                }
            };

            // an answer already exists, stop handing out work
            if slot.is_set() {
                break;
            }

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(error) => {
                    debug!("skipping unclassifiable entry {:?}: {}", entry.path(), error);
                    continue;
                }
            };

            if file_type.is_dir() {
                let path = entry.path();
                let slot = Arc::clone(&slot);
                let target_name = target_name.clone();
                let handle = pool.submit(move || {
                    let found = walk_tree(&path, &target_name);
                    if let Some(hit) = &found {
                        slot.publish(hit.clone());
                    }
                    found
                })?;
                branches.push(Branch::Task(handle));
            } else if file_type.is_file() && entry.file_name() == target_name {
                let path = entry.path();
                slot.publish(path.clone());
                branches.push(Branch::Inline(Some(path)));
            }
        }

        // every branch is observed; the first hit in submission order wins
        let mut answer = None;
        for branch in branches {
            let found = match branch {
                Branch::Inline(found) => found,
                Branch::Task(handle) => match handle.wait() {
                    Ok(found) => found,
                    Err(error) => {
                        warn!("subtree search failed: {}", error);
                        None
                    }
                },
            };
            if answer.is_none() {
                answer = found;
            }
        }

        // pool teardown drains and joins every worker
        drop(pool);
        Ok(answer)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first sequential walk of one subtree. Unreadable entries are
/// skipped, and the walk stops at the first regular file whose name
/// equals `target`.
fn walk_tree(dir: &Path, target: &OsStr) -> Option<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            debug!("skipping unreadable directory {:?}: {}", dir, error);
            return None;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(_) => continue,
        };

        if file_type.is_dir() {
            if let Some(found) = walk_tree(&entry.path(), target) {
                return Some(found);
            }
        } else if file_type.is_file() && entry.file_name().as_os_str() == target {
            return Some(entry.path());
        }
    }

    None
}

/// render a path with forward slash separators, the way results are printed
pub fn display_path(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => {
                if !out.ends_with('/') {
                    out.push('/');
                }
            }
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            component => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&component.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_publish_wins() {
        let slot = MatchSlot::new();
        assert!(slot.publish(PathBuf::from("a/x.txt")));
        assert!(!slot.publish(PathBuf::from("b/x.txt")));
        assert_eq!(*slot.found.lock().unwrap(), Some(PathBuf::from("a/x.txt")));
    }

    #[test]
    fn display_uses_forward_slashes() {
        let path: PathBuf = ["a", "c", "d", "x.txt"].iter().collect();
        assert_eq!(display_path(&path), "a/c/d/x.txt");
    }
}
