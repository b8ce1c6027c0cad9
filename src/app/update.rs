use std::path::PathBuf;

use crate::app::Model;
use crate::app::model::{AppError, Pane, RewriteStatus, Tab, ToastLevel};
use crate::diff::Granularity;
use crate::editor::{Direction, EditorBuffer};

/// All possible events and actions in the application.
///
/// Messages ending in a past tense (`Saved`, `Copied`, ...) are produced
/// by side effects and fed back through [`update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing the focused pane
    InsertChar(char),
    /// Pasted text
    InsertStr(String),
    DeleteBack,
    DeleteForward,
    SplitLine,
    MoveCursor(Direction),
    MoveHome,
    MoveEnd,
    MoveWordLeft,
    MoveWordRight,
    MoveToStart,
    MoveToEnd,
    /// Replace the modified text with the original
    CopyOriginalToModified,

    // Layout
    SwitchFocus,
    ShowTab(Tab),
    ToggleTab,
    /// Scroll the diff view (or move the cursor a page in the editor)
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    CycleGranularity,

    // Rewrite
    RequestRewrite,
    RewriteStarted,
    RewriteCompleted(String),
    RewriteFailed(String),

    // Clipboard and export
    CopyDiff,
    /// Name of the clipboard backend that took the copy
    Copied(&'static str),
    CopyFailed(String),
    ExportHtml,
    Exported(PathBuf),
    ExportFailed(String),

    // Files
    Save,
    Saved(Pane, PathBuf),
    SaveFailed(String),
    ToggleWatch,
    /// A watched file changed on disk
    FileChanged(Pane),
    Reloaded(Pane, String),
    ReloadFailed(String),

    // Window
    DismissError,
    ToggleHelp,
    HideHelp,
    Resize(u16, u16),
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// All state transitions happen here; disk, clipboard and network work
/// is done by the side-effect handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    if !matches!(msg, Message::Quit | Message::Save | Message::Saved(..)) {
        model.quit_confirmed = false;
    }

    match msg {
        Message::InsertChar(ch) => edit(&mut model, |buf| buf.insert_char(ch)),
        Message::InsertStr(text) => edit(&mut model, |buf| buf.insert_str(&text)),
        Message::DeleteBack => edit(&mut model, |buf| {
            buf.delete_back();
        }),
        Message::DeleteForward => edit(&mut model, |buf| {
            buf.delete_forward();
        }),
        Message::SplitLine => edit(&mut model, EditorBuffer::split_line),
        Message::MoveCursor(direction) => edit(&mut model, |buf| buf.move_cursor(direction)),
        Message::MoveHome => edit(&mut model, EditorBuffer::move_home),
        Message::MoveEnd => edit(&mut model, EditorBuffer::move_end),
        Message::MoveWordLeft => edit(&mut model, EditorBuffer::move_word_left),
        Message::MoveWordRight => edit(&mut model, EditorBuffer::move_word_right),
        Message::MoveToStart => edit(&mut model, EditorBuffer::move_to_start),
        Message::MoveToEnd => edit(&mut model, EditorBuffer::move_to_end),
        Message::CopyOriginalToModified => {
            let text = model.original.text();
            model.modified.replace_text(&text);
            model.follow_cursor(Pane::Modified);
            model.show_toast(ToastLevel::Info, "Copied original into modified");
        }

        Message::SwitchFocus => {
            model.focus = model.focus.other();
        }
        Message::ShowTab(tab) => show_tab(&mut model, tab),
        Message::ToggleTab => {
            let next = match model.tab {
                Tab::Edit => Tab::Diff,
                Tab::Diff => Tab::Edit,
            };
            show_tab(&mut model, next);
        }
        Message::ScrollUp(n) => scroll_or_move(&mut model, n, true),
        Message::ScrollDown(n) => scroll_or_move(&mut model, n, false),
        Message::PageUp => {
            let rows = model.pane_rows();
            scroll_or_move(&mut model, rows, true);
        }
        Message::PageDown => {
            let rows = model.pane_rows();
            scroll_or_move(&mut model, rows, false);
        }
        Message::GoToTop => match model.tab {
            Tab::Diff => model.diff_scroll = 0,
            Tab::Edit => edit(&mut model, EditorBuffer::move_to_start),
        },
        Message::GoToBottom => match model.tab {
            Tab::Diff => model.diff_scroll = model.max_diff_scroll(),
            Tab::Edit => edit(&mut model, EditorBuffer::move_to_end),
        },
        Message::CycleGranularity => {
            model.granularity = match model.granularity {
                Granularity::Word => Granularity::Line,
                Granularity::Line => Granularity::Char,
                Granularity::Char => Granularity::Word,
            };
            model.diff_scroll = model.diff_scroll.min(model.max_diff_scroll());
            let name = model.granularity.as_str();
            model.show_toast(ToastLevel::Info, format!("Diffing by {name}"));
        }

        Message::RequestRewrite => {
            if model.is_busy() {
                model.show_toast(ToastLevel::Warning, "A rewrite is already in progress");
            } else {
                model.rewrite = RewriteStatus::Requested;
                model.last_error = None;
            }
        }
        Message::RewriteStarted => {
            if model.rewrite == RewriteStatus::Requested {
                model.rewrite = RewriteStatus::InFlight;
            }
        }
        Message::RewriteCompleted(text) => {
            model.rewrite = RewriteStatus::Idle;
            model.modified.replace_text(&text);
            model.follow_cursor(Pane::Modified);
            model.diff_scroll = 0;
            show_tab(&mut model, Tab::Diff);
            model.show_toast(ToastLevel::Info, "Rewrite ready");
        }
        Message::RewriteFailed(message) => {
            model.rewrite = RewriteStatus::Idle;
            model.last_error = Some(AppError::RewriteFailed(message));
        }

        Message::Copied(backend) => {
            model.show_toast(ToastLevel::Info, format!("Copied diff to the {backend}"));
        }
        Message::CopyFailed(message) => {
            model.last_error = Some(AppError::CopyFailed(message));
        }
        Message::Exported(path) => {
            model.show_toast(
                ToastLevel::Info,
                format!("Exported to {}", path.display()),
            );
        }
        Message::ExportFailed(message) => {
            model.last_error = Some(AppError::ExportFailed(message));
        }

        Message::Saved(pane, path) => {
            model.buffer_mut(pane).mark_clean();
            if pane == Pane::Modified {
                model.modified_path = Some(path.clone());
            }
            model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
        }
        Message::SaveFailed(message) => {
            model.last_error = Some(AppError::Io(message));
        }
        Message::ToggleWatch => {
            model.watch_enabled = !model.watch_enabled;
        }
        Message::FileChanged(pane) => {
            if model.buffer(pane).is_dirty() {
                model.show_toast(
                    ToastLevel::Warning,
                    format!(
                        "{} changed on disk; keeping your unsaved edits",
                        pane.label()
                    ),
                );
            }
        }
        Message::Reloaded(pane, text) => {
            // our own saves come back as change events
            if model.buffer(pane).text() != text {
                model.buffer_mut(pane).reload(&text);
                model.follow_cursor(pane);
                model.show_toast(ToastLevel::Info, format!("Reloaded {}", pane.label()));
            }
        }
        Message::ReloadFailed(message) => {
            model.last_error = Some(AppError::Io(message));
        }

        Message::DismissError => {
            model.last_error = None;
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.diff_scroll = model.diff_scroll.min(model.max_diff_scroll());
            model.follow_cursor(Pane::Original);
            model.follow_cursor(Pane::Modified);
        }
        Message::Quit => {
            if model.has_unsaved_edits() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
        // CopyDiff/ExportHtml/Save: handled in effects
        Message::CopyDiff | Message::ExportHtml | Message::Save => {}
    }
    model
}

/// Apply an editor operation to the focused pane.
///
/// Editing only happens on the edit tab.
fn edit(model: &mut Model, op: impl FnOnce(&mut EditorBuffer)) {
    if model.tab != Tab::Edit {
        return;
    }
    let pane = model.focus;
    op(model.buffer_mut(pane));
    model.follow_cursor(pane);
}

fn show_tab(model: &mut Model, tab: Tab) {
    model.tab = tab;
    if tab == Tab::Diff {
        model.diff_scroll = model.diff_scroll.min(model.max_diff_scroll());
    }
}

fn scroll_or_move(model: &mut Model, n: usize, up: bool) {
    match model.tab {
        Tab::Diff => {
            model.diff_scroll = if up {
                model.diff_scroll.saturating_sub(n)
            } else {
                (model.diff_scroll + n).min(model.max_diff_scroll())
            };
        }
        Tab::Edit => {
            let direction = if up { Direction::Up } else { Direction::Down };
            edit(model, |buf| {
                for _ in 0..n {
                    buf.move_cursor(direction);
                }
            });
        }
    }
}
