//! Debounced change notifications for the compared files.
//!
//! The parent directory of each file is watched rather than the file, since
//! editors often save by writing a new file and renaming it over the old one.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

struct Target {
    path: PathBuf,
    name: Option<OsString>,
    root: PathBuf,
    pending_since: Option<Instant>,
}

impl Target {
    fn new(path: &Path) -> Self {
        // OS events carry canonical paths
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let name = path.file_name().map(std::ffi::OsStr::to_os_string);
        let root = watch_root_for(&path);
        Self {
            path,
            name,
            root,
            pending_since: None,
        }
    }

    fn matches(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.root
                || path == &self.path
                || (path.parent() == Some(self.root.as_path())
                    && self
                        .name
                        .as_ref()
                        .is_some_and(|name| path.file_name().is_some_and(|f| f == name)))
        })
    }
}

/// Watches a set of files; targets are reported by their index.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    targets: Vec<Target>,
    debounce: Duration,
}

impl FileWatcher {
    /// Start watching `paths`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or a directory
    /// cannot be watched.
    pub fn new<P: AsRef<Path>>(paths: &[P], debounce: Duration) -> notify::Result<Self> {
        let targets: Vec<Target> = paths.iter().map(|p| Target::new(p.as_ref())).collect();

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        let mut roots: Vec<&Path> = Vec::new();
        for target in &targets {
            if !roots.contains(&target.root.as_path()) {
                watcher.watch(&target.root, RecursiveMode::NonRecursive)?;
                roots.push(target.root.as_path());
            }
        }
        tracing::debug!(targets = targets.len(), roots = roots.len(), "watching files");

        Ok(Self {
            _watcher: watcher,
            rx,
            targets,
            debounce,
        })
    }

    /// Canonical path of target `index`.
    pub fn target_path(&self, index: usize) -> Option<&Path> {
        self.targets.get(index).map(|t| t.path.as_path())
    }

    /// Drain pending events and return the targets whose debounce has
    /// elapsed since their last change.
    pub fn take_ready(&mut self) -> Vec<usize> {
        let now = Instant::now();
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) => self.record(&ev, now),
                Err(err) => tracing::warn!(error = %err, "file watcher error"),
            }
        }

        let mut ready = Vec::new();
        for (index, target) in self.targets.iter_mut().enumerate() {
            if let Some(since) = target.pending_since
                && now.duration_since(since) >= self.debounce
            {
                target.pending_since = None;
                ready.push(index);
            }
        }
        ready
    }

    fn record(&mut self, event: &Event, at: Instant) {
        for target in &mut self.targets {
            if target.matches(event) {
                target.pending_since = Some(at);
            }
        }
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
