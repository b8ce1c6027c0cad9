use ropey::Rope;

/// Cursor position in an editor pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column in chars.
    pub col: usize,
    /// Column vertical moves try to return to.
    goal: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            goal: col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// One side of the comparison, held in a rope.
///
/// All edits go through the cursor and mark the buffer dirty; a file
/// reload replaces the content and leaves it clean.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::default(),
            dirty: false,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the text changed since load or the last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of a line without its line ending.
    pub fn line_at(&self, line: usize) -> Option<String> {
        (line < self.rope.len_lines()).then(|| {
            let text = self.rope.line(line).to_string();
            text.trim_end_matches(['\n', '\r']).to_string()
        })
    }

    /// Line length in chars, excluding the line ending.
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
            if len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    /// Replace the whole text as an edit (marks the buffer dirty when the
    /// content changes). The cursor is clamped into the new text.
    pub fn replace_text(&mut self, text: &str) {
        if self.rope == text {
            return;
        }
        self.rope = Rope::from_str(text);
        self.clamp_cursor();
        self.dirty = true;
    }

    /// Replace the text with what is on disk, leaving the buffer clean.
    pub fn reload(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.clamp_cursor();
        self.dirty = false;
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.char_idx();
        self.rope.insert_char(idx, ch);
        self.place(idx + 1);
        self.dirty = true;
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let idx = self.char_idx();
        self.rope.insert(idx, s);
        self.place(idx + s.chars().count());
        self.dirty = true;
    }

    /// Break the line at the cursor.
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Backspace. Returns `false` at the start of the buffer.
    pub fn delete_back(&mut self) -> bool {
        let idx = self.char_idx();
        if idx == 0 {
            return false;
        }
        // a CRLF pair goes as one unit
        let start = if idx >= 2 && self.rope.char(idx - 1) == '\n' && self.rope.char(idx - 2) == '\r'
        {
            idx - 2
        } else {
            idx - 1
        };
        self.rope.remove(start..idx);
        self.place(start);
        self.dirty = true;
        true
    }

    /// Delete. Returns `false` at the end of the buffer.
    pub fn delete_forward(&mut self) -> bool {
        let idx = self.char_idx();
        let len = self.rope.len_chars();
        if idx >= len {
            return false;
        }
        let end = if self.rope.char(idx) == '\r' && idx + 1 < len && self.rope.char(idx + 1) == '\n'
        {
            idx + 2
        } else {
            idx + 1
        };
        self.rope.remove(idx..end);
        self.dirty = true;
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                let idx = self.char_idx();
                if idx > 0 {
                    self.place(self.step_back(idx));
                }
            }
            Direction::Right => {
                let idx = self.char_idx();
                if idx < self.rope.len_chars() {
                    self.place(self.step_forward(idx));
                }
            }
            Direction::Up if self.cursor.line > 0 => self.move_vertical(self.cursor.line - 1),
            Direction::Down if self.cursor.line + 1 < self.line_count() => {
                self.move_vertical(self.cursor.line + 1);
            }
            Direction::Up | Direction::Down => {}
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor = Cursor::at(self.cursor.line, 0);
    }

    pub fn move_end(&mut self) {
        self.cursor = Cursor::at(self.cursor.line, self.line_len(self.cursor.line));
    }

    /// Jump to the start of the previous word, crossing line breaks.
    pub fn move_word_left(&mut self) {
        let mut idx = self.char_idx();
        while idx > 0 && !is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        while idx > 0 && is_word_char(self.rope.char(idx - 1)) {
            idx -= 1;
        }
        self.place(idx);
    }

    /// Jump past the current word and the gap after it.
    pub fn move_word_right(&mut self) {
        let len = self.rope.len_chars();
        let mut idx = self.char_idx();
        while idx < len && is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        while idx < len && !is_word_char(self.rope.char(idx)) {
            idx += 1;
        }
        self.place(idx);
    }

    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        self.cursor = Cursor::at(line, col.min(self.line_len(line)));
    }

    pub const fn move_to_start(&mut self) {
        self.cursor = Cursor::at(0, 0);
    }

    pub fn move_to_end(&mut self) {
        self.place(self.rope.len_chars());
    }

    fn char_idx(&self) -> usize {
        self.rope.line_to_char(self.cursor.line) + self.cursor.col
    }

    /// Put the cursor at an absolute char index.
    fn place(&mut self, idx: usize) {
        let idx = idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(idx);
        let col = (idx - self.rope.line_to_char(line)).min(self.line_len(line));
        self.cursor = Cursor::at(line, col);
    }

    fn step_back(&self, idx: usize) -> usize {
        if self.cursor.col == 0 && self.cursor.line > 0 {
            self.rope.line_to_char(self.cursor.line - 1) + self.line_len(self.cursor.line - 1)
        } else {
            idx - 1
        }
    }

    fn step_forward(&self, idx: usize) -> usize {
        if self.cursor.col >= self.line_len(self.cursor.line) {
            self.rope.line_to_char(self.cursor.line + 1)
        } else {
            idx + 1
        }
    }

    fn move_vertical(&mut self, line: usize) {
        let goal = self.cursor.goal;
        self.cursor = Cursor {
            line,
            col: goal.min(self.line_len(line)),
            goal,
        };
    }

    fn clamp_cursor(&mut self) {
        let Cursor { line, col, .. } = self.cursor;
        self.move_to(line, col);
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}
