use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thiserror::Error;
use unicode_width::UnicodeWidthStr;

use crate::diff::{self, DiffStats, EditSpan, Granularity};
use crate::editor::EditorBuffer;
use crate::markup;

/// Rows taken by the tab bar, status bar and pane borders.
const CHROME_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Side-by-side editors
    #[default]
    Edit,
    /// Rendered diff
    Diff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Original,
    Modified,
}

impl Pane {
    pub const fn other(self) -> Self {
        match self {
            Self::Original => Self::Modified,
            Self::Modified => Self::Original,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Modified => "Modified",
        }
    }
}

/// Progress of the AI rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteStatus {
    #[default]
    Idle,
    /// Accepted by `update`, not yet handed to the worker
    Requested,
    InFlight,
}

/// Errors shown in the banner until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("{0}")]
    RewriteFailed(String),
    #[error("{0}")]
    CopyFailed(String),
    #[error("{0}")]
    ExportFailed(String),
    #[error("{0}")]
    Io(String),
}

impl AppError {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::RewriteFailed(_) => "Rewrite failed",
            Self::CopyFailed(_) => "Copy failed",
            Self::ExportFailed(_) => "Export failed",
            Self::Io(_) => "File error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete session state.
#[derive(Debug)]
pub struct Model {
    pub original: EditorBuffer,
    pub modified: EditorBuffer,
    pub original_path: PathBuf,
    /// Where the modified text is saved; derived from the original when unset
    pub modified_path: Option<PathBuf>,
    pub tab: Tab,
    pub focus: Pane,
    pub rewrite: RewriteStatus,
    pub last_error: Option<AppError>,
    toast: Option<Toast>,
    /// First visible line of each editor pane
    pub original_scroll: usize,
    pub modified_scroll: usize,
    /// First visible line of the diff view
    pub diff_scroll: usize,
    pub granularity: Granularity,
    pub watch_enabled: bool,
    pub help_visible: bool,
    pub width: u16,
    pub height: u16,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    pub should_quit: bool,
    /// Set after the first quit attempt with unsaved edits
    pub quit_confirmed: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::new(), "", "", (80, 24))
    }
}

impl Model {
    pub fn new(original_path: PathBuf, original: &str, modified: &str, size: (u16, u16)) -> Self {
        Self {
            original: EditorBuffer::from_text(original),
            modified: EditorBuffer::from_text(modified),
            original_path,
            modified_path: None,
            tab: Tab::default(),
            focus: Pane::default(),
            rewrite: RewriteStatus::default(),
            last_error: None,
            toast: None,
            original_scroll: 0,
            modified_scroll: 0,
            diff_scroll: 0,
            granularity: Granularity::default(),
            watch_enabled: false,
            help_visible: false,
            width: size.0,
            height: size.1,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
            quit_confirmed: false,
        }
    }

    #[must_use]
    pub fn with_modified_path(mut self, path: Option<PathBuf>) -> Self {
        self.modified_path = path;
        self
    }

    /// Diff of the current buffers, computed fresh on every call.
    pub fn spans(&self) -> Vec<EditSpan> {
        diff::diff_with(&self.original.text(), &self.modified.text(), self.granularity)
    }

    /// Annotated Markdown for the current buffers.
    pub fn annotated(&self) -> String {
        markup::render(&self.spans())
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats::from_spans(&self.spans())
    }

    pub const fn is_busy(&self) -> bool {
        !matches!(self.rewrite, RewriteStatus::Idle)
    }

    pub const fn buffer(&self, pane: Pane) -> &EditorBuffer {
        match pane {
            Pane::Original => &self.original,
            Pane::Modified => &self.modified,
        }
    }

    pub const fn buffer_mut(&mut self, pane: Pane) -> &mut EditorBuffer {
        match pane {
            Pane::Original => &mut self.original,
            Pane::Modified => &mut self.modified,
        }
    }

    pub const fn scroll(&self, pane: Pane) -> usize {
        match pane {
            Pane::Original => self.original_scroll,
            Pane::Modified => self.modified_scroll,
        }
    }

    pub const fn has_unsaved_edits(&self) -> bool {
        self.original.is_dirty() || self.modified.is_dirty()
    }

    /// Path a pane is saved to.
    pub fn save_path(&self, pane: Pane) -> PathBuf {
        match pane {
            Pane::Original => self.original_path.clone(),
            Pane::Modified => self
                .modified_path
                .clone()
                .unwrap_or_else(|| derived_path(&self.original_path, "modified.md")),
        }
    }

    /// Default location for an HTML export.
    pub fn default_export_path(&self) -> PathBuf {
        derived_path(&self.original_path, "diff.html")
    }

    /// Title used for exported pages.
    pub fn title(&self) -> String {
        self.original_path.file_name().map_or_else(
            || "markdiff".to_string(),
            |name| name.to_string_lossy().to_string(),
        )
    }

    /// Paths that should be watched for external changes.
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.original_path.clone()];
        paths.extend(self.modified_path.clone());
        paths
    }

    /// Text rows available inside an editor pane.
    pub fn pane_rows(&self) -> usize {
        let banner = u16::from(self.last_error.is_some());
        let toast = u16::from(self.toast.is_some());
        usize::from(self.height.saturating_sub(CHROME_ROWS + banner + toast)).max(1)
    }

    /// Rows the diff view needs at the current width, counting wrapped lines.
    ///
    /// Estimated from display width; word wrapping can add a few rows.
    pub fn diff_rows(&self, spans: &[EditSpan]) -> usize {
        let width = usize::from(self.width.saturating_sub(2)).max(1);
        let text: String = spans.iter().map(|span| span.text.as_str()).collect();
        text.split('\n')
            .map(|line| UnicodeWidthStr::width(line).div_ceil(width).max(1))
            .sum()
    }

    pub fn max_diff_scroll(&self) -> usize {
        self.max_diff_scroll_for(&self.spans())
    }

    /// Like [`Self::max_diff_scroll`] for spans the caller already computed.
    pub fn max_diff_scroll_for(&self, spans: &[EditSpan]) -> usize {
        self.diff_rows(spans).saturating_sub(self.pane_rows())
    }

    /// Scroll a pane so its cursor is visible.
    pub(super) fn follow_cursor(&mut self, pane: Pane) {
        let rows = self.pane_rows();
        let line = self.buffer(pane).cursor().line;
        let scroll = match pane {
            Pane::Original => &mut self.original_scroll,
            Pane::Modified => &mut self.modified_scroll,
        };
        if line < *scroll {
            *scroll = line;
        } else if line >= *scroll + rows {
            *scroll = line + 1 - rows;
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

/// `notes.md` + `diff.html` -> `notes.diff.html`, next to the original.
fn derived_path(original: &Path, suffix: &str) -> PathBuf {
    let stem = original
        .file_stem()
        .map_or_else(|| "untitled".into(), |s| s.to_string_lossy());
    original.with_file_name(format!("{stem}.{suffix}"))
}
