//! Development-only redraw loop: watch the data directory and re-run the
//! attach-and-catch cycle whenever a dataset changes.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{new_debouncer, DebounceEventResult, Debouncer, FileIdMap};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

/// Quiet period per file before its change is reported
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches a directory for dataset changes
pub struct DataWatcher {
    _debouncer: Debouncer<RecommendedWatcher, FileIdMap>,
    receiver: Receiver<DebounceEventResult>,
    dir: PathBuf,
}

impl DataWatcher {
    pub fn new(dir: &Path) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut debouncer = new_debouncer(DEBOUNCE, None, tx)?;
        debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
        debouncer.cache().add_root(dir, RecursiveMode::Recursive);
        tracing::info!("Watching {} for changes", dir.display());

        Ok(Self {
            _debouncer: debouncer,
            receiver: rx,
            dir: dir.to_path_buf(),
        })
    }

    /// Block until a dataset changes and return the changed paths. `None`
    /// once the watcher has shut down or `timeout` has passed.
    pub fn wait_for_change(&self, timeout: Option<Duration>) -> Option<Vec<PathBuf>> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            let result = match deadline {
                Some(d) => self.receiver.recv_timeout(d.saturating_duration_since(Instant::now())).ok()?,
                None => self.receiver.recv().ok()?,
            };
            let changed = self.changed_paths(result);
            if !changed.is_empty() {
                return Some(changed);
            }
        }
    }

    fn changed_paths(&self, result: DebounceEventResult) -> Vec<PathBuf> {
        let mut changed: Vec<PathBuf> = match result {
            Ok(events) => events.iter().flat_map(|e| relevant_paths(&e.event)).collect(),
            Err(errors) => {
                for e in errors {
                    tracing::warn!("File watcher error: {}", e);
                }
                Vec::new()
            }
        };
        changed.sort();
        changed.dedup();
        if !changed.is_empty() {
            tracing::debug!(dir = %self.dir.display(), files = changed.len(), "Data changed");
        }
        changed
    }
}

fn relevant_paths(event: &Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => event
            .paths
            .iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    #[test]
    fn test_only_json_changes_count() {
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("data/2028-eclipse.geo.json"))
            .add_path(PathBuf::from("data/.swp"));
        assert_eq!(relevant_paths(&event), vec![PathBuf::from("data/2028-eclipse.geo.json")]);
    }

    #[test]
    fn test_access_events_ignored() {
        let event = Event::new(EventKind::Access(AccessKind::Any)).add_path(PathBuf::from("data/australia.geo.json"));
        assert!(relevant_paths(&event).is_empty());

        let created = Event::new(EventKind::Create(CreateKind::File)).add_path(PathBuf::from("world.geo.json"));
        assert_eq!(relevant_paths(&created).len(), 1);
    }

    #[test]
    fn test_written_dataset_arrives_as_one_batch() {
        let dir = tempfile::tempdir().unwrap();
        let watcher = DataWatcher::new(dir.path()).unwrap();

        let path = dir.path().join("2066-eclipse.geo.json");
        std::fs::write(&path, r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let changed = watcher.wait_for_change(Some(Duration::from_secs(10))).unwrap();
        let names: Vec<_> = changed.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, ["2066-eclipse.geo.json"]);
    }
}
