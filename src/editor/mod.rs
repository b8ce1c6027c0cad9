//! Text buffers for the original and modified panes.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
