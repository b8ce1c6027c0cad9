use std::io::stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, Pane, ToastLevel, update};
use crate::watcher::FileWatcher;

/// Holds the latest terminal size until resizing settles.
pub(super) struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(u16, u16, Instant)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, at: Instant) {
        self.pending = Some((width, height, at));
    }

    pub(super) fn take_ready(&mut self, now: Instant) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now.saturating_duration_since(queued_at) >= self.delay {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the terminal session until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read, the terminal cannot be
    /// initialized, or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; markdiff requires an interactive terminal")?;
        let size = terminal.size()?;
        let result = self
            .initial_model((size.width, size.height))
            .and_then(|mut model| {
                execute!(stdout(), EnableBracketedPaste)?;
                self.event_loop(&mut terminal, &mut model)
            });

        let _ = execute!(stdout(), DisableBracketedPaste);
        ratatui::restore();
        result
    }

    /// Load both files into a fresh model.
    pub(super) fn initial_model(&self, size: (u16, u16)) -> Result<Model> {
        let original = std::fs::read_to_string(&self.original_path)
            .with_context(|| format!("Failed to read {}", self.original_path.display()))?;
        let modified = match &self.modified_path {
            Some(path) if path.exists() => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            _ => original.clone(),
        };

        let mut model = Model::new(self.original_path.clone(), &original, &modified, size)
            .with_modified_path(self.modified_path.clone());
        model.granularity = self.granularity;
        model.watch_enabled = self.watch_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        Ok(model)
    }

    /// Apply a message and any follow-ups its side effects produce.
    pub(super) fn dispatch(
        &mut self,
        model: &mut Model,
        file_watcher: &mut Option<FileWatcher>,
        msg: Message,
    ) {
        let mut next = Some(msg);
        while let Some(msg) = next.take() {
            tracing::trace!(?msg, "message");
            let side_msg = msg.clone();
            *model = update(std::mem::take(model), msg);
            next = self.handle_message_side_effects(model, file_watcher, &side_msg);
        }
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut resize_debouncer = ResizeDebouncer::new(Duration::from_millis(100));
        let mut watched_paths: Vec<PathBuf> = model.watched_paths();
        let mut file_watcher = if model.watch_enabled {
            match Self::make_file_watcher(model) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    model.watch_enabled = false;
                    model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                    tracing::warn!(error = %err, "failed to start file watcher");
                    None
                }
            }
        } else {
            None
        };
        let mut needs_render = true;

        loop {
            // Saving the modified text for the first time adds a path to watch
            let paths = model.watched_paths();
            if model.watch_enabled && paths != watched_paths {
                match Self::make_file_watcher(model) {
                    Ok(watcher) => file_watcher = Some(watcher),
                    Err(err) => tracing::warn!(error = %err, "failed to rewatch files"),
                }
                watched_paths = paths;
            }

            let now = Instant::now();
            if model.expire_toast(now) {
                needs_render = true;
            }

            if let Some((width, height)) = resize_debouncer.take_ready(now) {
                self.dispatch(model, &mut file_watcher, Message::Resize(width, height));
                needs_render = true;
            }

            if let Some(msg) = self.poll_rewrite() {
                self.dispatch(model, &mut file_watcher, msg);
                needs_render = true;
            }

            let ready = file_watcher
                .as_mut()
                .map(FileWatcher::take_ready)
                .unwrap_or_default();
            for index in ready {
                let pane = if index == 0 {
                    Pane::Original
                } else {
                    Pane::Modified
                };
                self.dispatch(model, &mut file_watcher, Message::FileChanged(pane));
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else if model.is_busy() {
                100
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) =
                    Self::handle_event(event::read()?, model, &mut resize_debouncer)
                {
                    self.dispatch(model, &mut file_watcher, msg);
                    needs_render = true;
                }

                // Coalesce key repeat and paste bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) =
                        Self::handle_event(event::read()?, model, &mut resize_debouncer)
                    {
                        self.dispatch(model, &mut file_watcher, msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                tracing::trace!(
                    draw_ms = draw_start.elapsed().as_secs_f64() * 1000.0,
                    "frame drawn"
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
