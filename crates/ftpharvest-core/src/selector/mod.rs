//! Selection of remote files under space, size, and count constraints.
//!
//! Consumes directory paths in order, lists each via the transport, and
//! admits entries until the budget can no longer be satisfied. The
//! termination check runs before the size filter on every entry seen, so
//! enumeration stops the instant the remaining (unsorted, unknown) entries
//! can no longer fit — trading completeness for bounded listing cost on
//! trees far larger than the budget.

mod admit;
mod budget;
mod classify;

pub use admit::admissible;
pub use budget::SpaceBudget;
pub use classify::ContentClassifier;

use std::collections::HashSet;
use std::time::Instant;

use crate::transport::Transport;

/// Bounds for one selection pass.
#[derive(Debug, Clone, Copy)]
pub struct SelectionLimits {
    /// Total bytes the selection may occupy.
    pub space_budget: u64,
    /// Maximum number of admitted files.
    pub max_files: usize,
    /// Smallest admissible file size (inclusive).
    pub min_size: u64,
    /// Largest admissible file size (inclusive).
    pub max_size: u64,
}

/// One admitted (path, size) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub path: String,
    pub size: u64,
}

/// Ordered mapping of remote path to size. Insertion order is selection
/// order; keys are unique, a later duplicate path is ignored.
#[derive(Debug, Default)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
    seen: HashSet<String>,
}

impl Selection {
    /// Insert an entry. Returns false (and changes nothing) when the path
    /// is already present — first occurrence wins.
    pub fn insert(&mut self, path: &str, size: u64) -> bool {
        if !self.seen.insert(path.to_string()) {
            return false;
        }
        self.entries.push(SelectionEntry {
            path: path.to_string(),
            size,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of admitted sizes. Never exceeds the space budget the selection
    /// was built under.
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Size recorded for `path`, if admitted.
    pub fn get(&self, path: &str) -> Option<u64> {
        self.entries.iter().find(|e| e.path == path).map(|e| e.size)
    }

    /// Entries in admission order.
    pub fn iter(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.iter()
    }
}

/// Run one enumeration pass over `directories`, in order, and return the
/// admitted selection. A listing failure skips that directory; nothing
/// else interrupts the pass short of budget exhaustion.
pub fn select(
    transport: &mut dyn Transport,
    directories: &[String],
    limits: &SelectionLimits,
) -> Selection {
    select_with_classifier(transport, directories, limits, None)
}

/// [`select`] with an optional content classifier consulted after the size
/// filter.
pub fn select_with_classifier(
    transport: &mut dyn Transport,
    directories: &[String],
    limits: &SelectionLimits,
    classifier: Option<&dyn ContentClassifier>,
) -> Selection {
    let mut budget = SpaceBudget::new(limits.space_budget, limits.max_files);
    let mut selection = Selection::default();
    let started = Instant::now();

    'dirs: for dir in directories {
        let entries = match transport.list(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("skipping directory: {e:#}");
                continue;
            }
        };

        for entry in entries {
            // Checked before the size filter: a single entry that no longer
            // fits ends the whole scan, remaining directories included.
            if budget.exhausted_by(entry.size) {
                tracing::info!(
                    "enumeration done: {} ({} bytes) does not fit ({} bytes / {} files left)",
                    entry.path,
                    entry.size,
                    budget.available(),
                    limits.max_files - budget.admitted(),
                );
                break 'dirs;
            }

            if !admissible(entry.size, limits.min_size, limits.max_size) {
                continue;
            }
            if let Some(classifier) = classifier {
                if !classifier.keep(&entry) {
                    tracing::debug!("classifier rejected {}", entry.path);
                    continue;
                }
            }

            if selection.insert(&entry.path, entry.size) {
                tracing::debug!("queued {} ({} bytes)", entry.path, entry.size);
                budget.admit(entry.size);
            }
        }
    }

    tracing::info!(
        "selected {} file(s), {} bytes, in {} ms",
        selection.len(),
        selection.total_bytes(),
        started.elapsed().as_millis(),
    );
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{RemoteEntry, TransportError};
    use std::collections::HashMap;
    use std::path::Path;

    /// Scripted transport: a map of directory -> listing, or a listing
    /// failure for directories in `broken`.
    #[derive(Default)]
    struct FakeTransport {
        listings: HashMap<String, Vec<RemoteEntry>>,
        broken: Vec<String>,
        listed: Vec<String>,
    }

    impl FakeTransport {
        fn with_listing(mut self, dir: &str, entries: &[(&str, u64)]) -> Self {
            self.listings.insert(
                dir.to_string(),
                entries
                    .iter()
                    .map(|(p, s)| RemoteEntry::new(*p, *s))
                    .collect(),
            );
            self
        }

        fn with_broken(mut self, dir: &str) -> Self {
            self.broken.push(dir.to_string());
            self
        }
    }

    impl Transport for FakeTransport {
        fn list(&mut self, dir: &str) -> Result<Vec<RemoteEntry>, TransportError> {
            self.listed.push(dir.to_string());
            if self.broken.iter().any(|d| d == dir) {
                return Err(TransportError::Listing {
                    dir: dir.to_string(),
                    source: anyhow::anyhow!("connection reset"),
                });
            }
            Ok(self.listings.get(dir).cloned().unwrap_or_default())
        }

        fn list_dirs(&mut self, _dir: &str) -> Result<Vec<String>, TransportError> {
            Ok(Vec::new())
        }

        fn download(&mut self, _remote: &str, _local: &Path) -> Result<u64, TransportError> {
            unreachable!("selector never downloads")
        }
    }

    fn dirs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn limits(space_budget: u64, max_files: usize, min_size: u64, max_size: u64) -> SelectionLimits {
        SelectionLimits {
            space_budget,
            max_files,
            min_size,
            max_size,
        }
    }

    #[test]
    fn too_small_entries_are_skipped() {
        let mut t = FakeTransport::default()
            .with_listing("/d1", &[("/d1/a", 50), ("/d1/b", 200)]);
        let sel = select(
            &mut t,
            &dirs(&["/d1"]),
            &limits(10_000_000_000, 1000, 100, 10_000_000),
        );
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.get("/d1/b"), Some(200));
        assert_eq!(sel.get("/d1/a"), None);
    }

    #[test]
    fn space_exhaustion_terminates_mid_directory() {
        let mut t = FakeTransport::default()
            .with_listing("/d1", &[("/d1/a", 150), ("/d1/b", 400), ("/d1/c", 100)]);
        let sel = select(&mut t, &dirs(&["/d1"]), &limits(300, 1000, 0, 10_000));
        // a admitted (150 left), b (400) does not fit, c never evaluated.
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.get("/d1/a"), Some(150));
        assert_eq!(sel.total_bytes(), 150);
    }

    #[test]
    fn count_cap_terminates() {
        let mut t = FakeTransport::default()
            .with_listing("/d1", &[("/d1/a", 10), ("/d1/b", 10)]);
        let sel = select(&mut t, &dirs(&["/d1"]), &limits(u64::MAX, 1, 0, 1000));
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.get("/d1/a"), Some(10));
    }

    #[test]
    fn listing_failure_skips_directory_and_continues() {
        let mut t = FakeTransport::default()
            .with_broken("/bad")
            .with_listing("/good", &[("/good/x", 10)]);
        let sel = select(
            &mut t,
            &dirs(&["/bad", "/good"]),
            &limits(u64::MAX, 1000, 0, 1000),
        );
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.get("/good/x"), Some(10));
    }

    #[test]
    fn termination_abandons_remaining_directories() {
        let mut t = FakeTransport::default()
            .with_listing("/d1", &[("/d1/a", 150), ("/d1/b", 400)])
            .with_listing("/d2", &[("/d2/tiny", 10)]);
        let sel = select(&mut t, &dirs(&["/d1", "/d2"]), &limits(300, 1000, 0, 10_000));
        assert_eq!(sel.len(), 1);
        // /d2 was never listed.
        assert_eq!(t.listed, vec!["/d1".to_string()]);
    }

    #[test]
    fn oversized_entry_outside_filter_still_terminates() {
        // The termination check runs before the size filter: an entry that
        // the filter would have rejected anyway still ends the scan when it
        // exceeds the remaining space.
        let mut t = FakeTransport::default()
            .with_listing("/d1", &[("/d1/huge", 5000), ("/d1/ok", 100)]);
        let sel = select(&mut t, &dirs(&["/d1"]), &limits(1000, 1000, 0, 200));
        assert!(sel.is_empty());
    }

    #[test]
    fn duplicate_path_is_ignored_and_budget_untouched() {
        let mut t = FakeTransport::default()
            .with_listing("/d1", &[("/d1/a", 100), ("/d1/a", 100), ("/d1/b", 100)]);
        let sel = select(&mut t, &dirs(&["/d1"]), &limits(250, 1000, 0, 1000));
        // Second /d1/a is a no-op, so /d1/b still fits in the 250-byte budget.
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.total_bytes(), 200);
    }

    #[test]
    fn selection_order_is_deterministic() {
        let script = |t: FakeTransport| {
            t.with_listing("/d1", &[("/d1/b", 10), ("/d1/a", 10)])
                .with_listing("/d2", &[("/d2/c", 10)])
        };
        let run = || {
            let mut t = script(FakeTransport::default());
            let sel = select(
                &mut t,
                &dirs(&["/d1", "/d2"]),
                &limits(u64::MAX, 1000, 0, 1000),
            );
            sel.iter().map(|e| e.path.clone()).collect::<Vec<_>>()
        };
        let first = run();
        assert_eq!(first, vec!["/d1/b", "/d1/a", "/d2/c"]);
        assert_eq!(first, run());
    }

    #[test]
    fn budget_invariants_hold_over_a_larger_tree() {
        let entries: Vec<(String, u64)> = (0..200)
            .map(|i| (format!("/d1/file{i}.pdf"), 50 + (i % 7) * 30))
            .collect();
        let borrowed: Vec<(&str, u64)> =
            entries.iter().map(|(p, s)| (p.as_str(), *s)).collect();
        let mut t = FakeTransport::default().with_listing("/d1", &borrowed);
        let lim = limits(2_000, 30, 60, 180);
        let sel = select(&mut t, &dirs(&["/d1"]), &lim);
        assert!(sel.total_bytes() <= lim.space_budget);
        assert!(sel.len() <= lim.max_files);
        for e in sel.iter() {
            assert!(e.size >= lim.min_size && e.size <= lim.max_size);
        }
    }

    #[test]
    fn classifier_runs_after_size_filter() {
        struct RejectAll;
        impl ContentClassifier for RejectAll {
            fn keep(&self, _entry: &RemoteEntry) -> bool {
                false
            }
        }
        let mut t = FakeTransport::default()
            .with_listing("/d1", &[("/d1/a", 100), ("/d1/b", 100)]);
        let sel = select_with_classifier(
            &mut t,
            &dirs(&["/d1"]),
            &limits(u64::MAX, 1000, 0, 1000),
            Some(&RejectAll),
        );
        assert!(sel.is_empty());
    }
}
