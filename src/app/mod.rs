//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete session state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering and side effects

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{AppError, Model, Pane, RewriteStatus, Tab, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::clipboard::Clipboard;
use crate::diff::Granularity;
use crate::rewrite::{RewriteWorker, Rewriter};

/// Owns the terminal session, the rewrite worker and the clipboard.
pub struct App {
    original_path: PathBuf,
    modified_path: Option<PathBuf>,
    watch_enabled: bool,
    granularity: Granularity,
    export_path: Option<PathBuf>,
    rewrite_worker: Option<RewriteWorker>,
    clipboard: Clipboard,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create an app comparing `original_path` against `modified_path`.
    ///
    /// Without a modified file the modified text starts as a copy of the
    /// original.
    pub fn new(original_path: PathBuf, modified_path: Option<PathBuf>) -> Self {
        Self {
            original_path,
            modified_path,
            watch_enabled: false,
            granularity: Granularity::default(),
            export_path: None,
            rewrite_worker: None,
            clipboard: Clipboard::default(),
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Enable or disable file watching.
    #[must_use]
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Use `rewriter` for AI rewrites, abandoning requests after `timeout`.
    #[must_use]
    pub fn with_rewriter(mut self, rewriter: Arc<dyn Rewriter>, timeout: Duration) -> Self {
        self.rewrite_worker = Some(RewriteWorker::new(rewriter, timeout));
        self
    }

    /// Where Ctrl+P writes the HTML page.
    #[must_use]
    pub fn with_export_path(mut self, path: Option<PathBuf>) -> Self {
        self.export_path = path;
        self
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Clipboard) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
