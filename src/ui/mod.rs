//! Terminal UI components.
//!
//! - [`style`]: Theming and colors
//! - [`diff_view`]: Diff spans as styled terminal text

pub mod diff_view;
pub mod style;

mod overlays;
mod render;
mod status;

pub use diff_view::diff_lines;
pub use render::{line_number_width, render};
