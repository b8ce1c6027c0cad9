//! Copying the annotated diff to the system clipboard.
//!
//! The primary path writes rendered HTML and the annotated Markdown
//! source in a single clipboard transaction, so rich-text targets keep
//! the highlight styling and plain-text targets get the source. When that
//! fails the terminal path copies the source through `pbcopy` or OSC 52.

use std::io::{IsTerminal, Write};

use base64::Engine;
use thiserror::Error;

use crate::markdown::render_html;

/// Both representations of a copied diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardPayload {
    /// Rendered HTML fragment
    pub html: String,
    /// Annotated Markdown source
    pub text: String,
}

impl ClipboardPayload {
    pub fn from_annotated(annotated: &str) -> Self {
        Self {
            html: render_html(annotated),
            text: annotated.to_string(),
        }
    }
}

/// A place the payload can be written to.
pub trait ClipboardBackend {
    fn name(&self) -> &'static str;

    fn write(&mut self, payload: &ClipboardPayload) -> Result<(), String>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CopyError {
    #[error(
        "Could not copy to the clipboard ({primary}; {fallback}). Select the text in the diff view and copy it manually."
    )]
    Rejected { primary: String, fallback: String },
}

/// Rich clipboard access via the platform clipboard.
///
/// The handle is kept open after the first write: on X11 and Wayland the
/// copied content is served by this process and disappears when the
/// handle is dropped.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
    /// Block after writing until another program owns the clipboard
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hold: bool,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// For processes that exit right after copying: on Linux the write
    /// blocks until another program replaces the clipboard contents.
    pub fn holding() -> Self {
        Self {
            handle: None,
            hold: true,
        }
    }
}

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system clipboard"
    }

    fn write(&mut self, payload: &ClipboardPayload) -> Result<(), String> {
        if self.handle.is_none() {
            let handle =
                arboard::Clipboard::new().map_err(|e| format!("clipboard unavailable: {e}"))?;
            self.handle = Some(handle);
        }
        let Some(handle) = self.handle.as_mut() else {
            return Err("clipboard unavailable".to_string());
        };
        let set = handle.set();
        #[cfg(target_os = "linux")]
        let set = if self.hold {
            use arboard::SetExtLinux;
            set.wait()
        } else {
            set
        };
        set.html(payload.html.as_str(), Some(payload.text.as_str()))
            .map_err(|e| format!("clipboard rejected the write: {e}"))
    }
}

/// Plain-text copy through `pbcopy` on macOS, otherwise OSC 52.
#[derive(Debug, Default)]
pub struct TerminalClipboard;

impl ClipboardBackend for TerminalClipboard {
    fn name(&self) -> &'static str {
        "terminal clipboard"
    }

    fn write(&mut self, payload: &ClipboardPayload) -> Result<(), String> {
        copy_plain(&payload.text).map_err(|e| format!("terminal copy failed: {e}"))
    }
}

fn copy_plain(text: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    let mut out = std::io::stdout();
    let is_terminal = out.is_terminal();
    write_osc52(&mut out, is_terminal, text)
}

/// OSC 52 only reaches a clipboard when a terminal reads it.
fn write_osc52(out: &mut impl Write, is_terminal: bool, text: &str) -> std::io::Result<()> {
    if !is_terminal {
        return Err(std::io::Error::other("stdout is not a terminal"));
    }
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

/// Tries the primary backend, then the fallback.
pub struct Clipboard {
    primary: Box<dyn ClipboardBackend>,
    fallback: Box<dyn ClipboardBackend>,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new(
            Box::new(SystemClipboard::new()),
            Box::new(TerminalClipboard),
        )
    }
}

impl Clipboard {
    /// Backends for a one-shot command that exits after copying.
    pub fn for_batch() -> Self {
        Self::new(
            Box::new(SystemClipboard::holding()),
            Box::new(TerminalClipboard),
        )
    }

    pub fn new(primary: Box<dyn ClipboardBackend>, fallback: Box<dyn ClipboardBackend>) -> Self {
        Self { primary, fallback }
    }

    /// Copy the payload, returning the name of the backend that took it.
    pub fn copy(&mut self, payload: &ClipboardPayload) -> Result<&'static str, CopyError> {
        let primary = match self.primary.write(payload) {
            Ok(()) => return Ok(self.primary.name()),
            Err(e) => e,
        };
        tracing::warn!(error = %primary, "rich copy failed, trying plain text");
        match self.fallback.write(payload) {
            Ok(()) => Ok(self.fallback.name()),
            Err(fallback) => {
                tracing::warn!(error = %fallback, "plain copy failed");
                Err(CopyError::Rejected { primary, fallback })
            }
        }
    }
}
