//! Tracks whether the emitted Markdown stream is inside a code block.
//!
//! Raw HTML is shown literally inside fenced and indented code blocks,
//! so the renderer must not wrap text there. Inline code spans need
//! lookahead to tell a real span from a stray backtick and are left to
//! the rendered-output check in the parent module.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CodeContext {
    fence: Option<Fence>,
    /// The previous line was paragraph text, so an indented line continues it
    in_paragraph: bool,
    /// Inside an indented code block, possibly on one of its blank lines
    indented_block: bool,
    /// Indented lines belong to the open list item instead of a code block
    in_list: bool,
    line: String,
}

impl CodeContext {
    /// Feed emitted text through the tracker.
    pub fn feed(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.end_line();
            } else {
                self.line.push(ch);
            }
        }
    }

    /// True when text emitted next would land inside code.
    pub fn in_code(&self) -> bool {
        // the info string of an opening fence is not inline text either
        self.fence.is_some() || fence_opener(&self.line).is_some() || self.indented_line()
    }

    /// True when the current line is the first line of an indented block.
    pub fn opens_indented_block(&self) -> bool {
        self.indented_line() && !self.indented_block
    }

    /// Marker of the open fence if the current line already closes it.
    pub fn closing_fence_marker(&self) -> Option<char> {
        self.fence
            .filter(|fence| closes_fence(&self.line, *fence))
            .map(|fence| fence.marker)
    }

    /// The text emitted so far on the current line.
    pub fn line(&self) -> &str {
        &self.line
    }

    fn indented_line(&self) -> bool {
        self.fence.is_none()
            && !self.in_paragraph
            && !self.in_list
            && indent_width(&self.line) >= 4
    }

    fn end_line(&mut self) {
        let was_indented = self.indented_line();
        let line = std::mem::take(&mut self.line);
        if let Some(fence) = self.fence {
            if closes_fence(&line, fence) {
                self.fence = None;
            }
            return;
        }
        if let Some(fence) = fence_opener(&line) {
            self.fence = Some(fence);
            self.in_paragraph = false;
            self.indented_block = false;
            return;
        }
        if line.trim().is_empty() {
            self.in_paragraph = false;
        } else if was_indented {
            self.indented_block = true;
        } else {
            self.indented_block = false;
            self.in_paragraph = !is_atx_heading(&line);
            if is_list_item(line.trim_start()) {
                self.in_list = true;
            } else if indent_width(&line) == 0 {
                self.in_list = false;
            }
        }
    }
}

/// Leading indentation in columns, with tabs advancing to the next stop of 4.
fn indent_width(line: &str) -> usize {
    let mut width = 0;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += 4 - width % 4,
            _ => break,
        }
    }
    width
}

fn is_list_item(line: &str) -> bool {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    let rest = match line[digits..].chars().next() {
        Some('-' | '*' | '+') if digits == 0 => &line[1..],
        Some('.' | ')') if (1..=9).contains(&digits) => &line[digits + 1..],
        _ => return false,
    };
    rest.is_empty() || rest.starts_with([' ', '\t'])
}

fn is_atx_heading(line: &str) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    (1..=6).contains(&hashes)
        && trimmed[hashes..]
            .chars()
            .next()
            .is_none_or(|c| c == ' ' || c == '\t')
}

/// Returns the fence a line opens, if it starts with ``` or ~~~.
fn fence_opener(line: &str) -> Option<Fence> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];
    let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = rest.chars().take_while(|c| *c == marker).count();
    if len < 3 {
        return None;
    }
    // backtick fences may not carry backticks in the info string
    if marker == '`' && rest[len..].contains('`') {
        return None;
    }
    Some(Fence { marker, len })
}

fn closes_fence(line: &str, fence: Fence) -> bool {
    let trimmed = line.trim();
    let len = trimmed.chars().take_while(|c| *c == fence.marker).count();
    len >= fence.len && trimmed[len..].trim().is_empty()
}

/// True if `segment` starts a fence line.
pub fn is_fence_line(segment: &str) -> bool {
    fence_opener(segment).is_some()
}
