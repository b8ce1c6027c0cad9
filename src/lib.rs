// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. diff::DiffStats)
    clippy::module_name_repetitions
)]

//! # Markdiff
//!
//! A word-level Markdown diff editor for the terminal.
//!
//! Markdiff compares an original and a modified Markdown text and shows:
//! - Side-by-side editors for both texts
//! - A diff view with added text highlighted and removed text struck out
//! - Rich-text copy of the diff (HTML plus annotated Markdown source)
//! - An AI rewrite of the original text through Gemini
//!
//! ## Architecture
//!
//! The diff pipeline is pure: [`diff`] turns two texts into edit spans,
//! [`markup`] serializes the spans into Markdown with `<ins>`/`<del>`
//! wrappers and [`markdown`] renders that to HTML. The terminal session
//! uses The Elm Architecture (TEA):
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`diff`]: Tokenization and Myers diff
//! - [`markup`]: Annotated Markdown output
//! - [`markdown`]: HTML rendering and export pages
//! - [`clipboard`]: Rich and plain clipboard writes
//! - [`rewrite`]: AI rewrite client and worker
//! - [`editor`]: Rope-backed text buffers
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: File watching
//! - [`config`]: Saved default flags

pub mod app;
pub mod clipboard;
pub mod config;
pub mod diff;
pub mod editor;
pub mod markdown;
pub mod markup;
pub mod rewrite;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::diff::{EditSpan, Granularity, SpanKind, diff, diff_with};
    pub use crate::markup::{MarkupTheme, annotate, render};
}
