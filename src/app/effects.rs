use std::path::PathBuf;
use std::time::Duration;

use crate::app::{App, Message, Model, Pane, RewriteStatus, ToastLevel};
use crate::clipboard::ClipboardPayload;
use crate::markdown::export_page;
use crate::markup::MarkupTheme;
use crate::watcher::FileWatcher;

impl App {
    pub(super) fn make_file_watcher(model: &Model) -> notify::Result<FileWatcher> {
        FileWatcher::new(&model.watched_paths(), Duration::from_millis(200))
    }

    /// Run the side effect for `msg`, returning a follow-up message with
    /// its outcome.
    pub(super) fn handle_message_side_effects(
        &mut self,
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
        msg: &Message,
    ) -> Option<Message> {
        match msg {
            Message::RequestRewrite if model.rewrite == RewriteStatus::Requested => {
                Some(self.start_rewrite(model))
            }
            Message::CopyDiff => Some(self.copy_diff(model)),
            Message::ExportHtml => Some(self.export_html(model)),
            Message::Save => Some(save_pane(model, model.focus)),
            Message::FileChanged(pane) if !model.buffer(*pane).is_dirty() => {
                reload_pane(model, *pane)
            }
            Message::ToggleWatch => {
                if model.watch_enabled {
                    match Self::make_file_watcher(model) {
                        Ok(watcher) => {
                            *file_watcher = Some(watcher);
                            model.show_toast(ToastLevel::Info, "Watching file changes");
                        }
                        Err(err) => {
                            model.watch_enabled = false;
                            *file_watcher = None;
                            model.show_toast(
                                ToastLevel::Warning,
                                format!("Watch unavailable: {err}"),
                            );
                            tracing::warn!(error = %err, "failed to start file watcher");
                        }
                    }
                } else {
                    *file_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
                None
            }
            _ => None,
        }
    }

    /// Outcome of the in-flight rewrite, if it has resolved.
    pub(super) fn poll_rewrite(&mut self) -> Option<Message> {
        let outcome = self.rewrite_worker.as_mut()?.poll()?;
        Some(match outcome {
            Ok(text) => {
                tracing::info!(chars = text.len(), "rewrite completed");
                Message::RewriteCompleted(text)
            }
            Err(err) => {
                tracing::warn!(error = %err, "rewrite failed");
                Message::RewriteFailed(err.to_string())
            }
        })
    }

    fn start_rewrite(&mut self, model: &Model) -> Message {
        let Some(worker) = self.rewrite_worker.as_mut() else {
            return Message::RewriteFailed("AI rewriting is not configured".to_string());
        };
        match worker.start(model.original.text()) {
            Ok(()) => Message::RewriteStarted,
            Err(err) => Message::RewriteFailed(err.to_string()),
        }
    }

    fn copy_diff(&mut self, model: &Model) -> Message {
        let payload = ClipboardPayload::from_annotated(&model.annotated());
        match self.clipboard.copy(&payload) {
            Ok(backend) => {
                tracing::info!(backend, bytes = payload.html.len(), "copied diff");
                Message::Copied(backend)
            }
            Err(err) => Message::CopyFailed(err.to_string()),
        }
    }

    fn export_html(&self, model: &Model) -> Message {
        let path = self
            .export_path
            .clone()
            .unwrap_or_else(|| model.default_export_path());
        let page = export_page(&model.title(), &model.annotated(), &MarkupTheme::default());
        match std::fs::write(&path, page) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "exported diff");
                Message::Exported(path)
            }
            Err(err) => Message::ExportFailed(format!("Could not write {}: {err}", path.display())),
        }
    }
}

fn save_pane(model: &Model, pane: Pane) -> Message {
    let path = model.save_path(pane);
    match std::fs::write(&path, model.buffer(pane).text()) {
        Ok(()) => Message::Saved(pane, path),
        Err(err) => Message::SaveFailed(format!("Could not save {}: {err}", path.display())),
    }
}

fn reload_pane(model: &Model, pane: Pane) -> Option<Message> {
    let path: PathBuf = match pane {
        Pane::Original => model.original_path.clone(),
        Pane::Modified => model.modified_path.clone()?,
    };
    Some(match std::fs::read_to_string(&path) {
        Ok(text) => Message::Reloaded(pane, text),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "reload failed");
            Message::ReloadFailed(format!("Could not reload {}: {err}", path.display()))
        }
    })
}
