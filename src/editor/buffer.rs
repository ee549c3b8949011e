//! The editing surface: a plain-text buffer with cursor, selection and
//! snapshot-based undo/redo.
//!
//! Columns are character indices, not byte offsets, so multi-byte UTF-8
//! content moves and edits correctly.

/// One undo/redo step: full text plus the cursor at the time.
#[derive(Debug, Clone)]
struct Snapshot {
    text: String,
    cursor_row: usize,
    cursor_col: usize,
}

/// Cap on the undo stack; oldest snapshots are dropped beyond this.
const UNDO_LIMIT: usize = 100;

/// A text buffer for one open file.
#[derive(Debug)]
pub struct EditorBuffer {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    /// Inclusive start and exclusive end of the selection, as (row, col)
    /// pairs in document order.
    selection: Option<((usize, usize), (usize, usize))>,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    modified: bool,
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
            selection: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            modified: false,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer.modified = false;
        buffer
    }

    /// Replace the whole buffer, resetting history.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.selection = None;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.modified = true;
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn selection(&self) -> Option<((usize, usize), (usize, usize))> {
        self.selection
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices()
            .nth(col)
            .map_or_else(|| line.len(), |(i, _)| i)
    }

    fn push_undo(&mut self) {
        let snapshot = Snapshot {
            text: self.text(),
            cursor_row: self.cursor_row,
            cursor_col: self.cursor_col,
        };
        // Skip if nothing changed since the last snapshot.
        if self.undo_stack.last().map(|s| s.text.as_str()) != Some(snapshot.text.as_str()) {
            self.undo_stack.push(snapshot);
            if self.undo_stack.len() > UNDO_LIMIT {
                self.undo_stack.remove(0);
            }
            self.redo_stack.clear();
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.lines = snapshot.text.split('\n').map(String::from).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_row = snapshot.cursor_row.min(self.lines.len() - 1);
        self.cursor_col = snapshot.cursor_col.min(self.line_len(self.cursor_row));
        self.selection = None;
        self.modified = true;
    }

    // ---- editing ----

    pub fn insert_char(&mut self, c: char) {
        self.push_undo();
        self.delete_selection_inner();
        let col = self.cursor_col;
        let line = &mut self.lines[self.cursor_row];
        let idx = Self::byte_index(line, col);
        line.insert(idx, c);
        self.cursor_col += 1;
        self.modified = true;
    }

    /// Insert a string at the cursor; embedded newlines split lines.
    pub fn insert_str(&mut self, text: &str) {
        self.push_undo();
        self.delete_selection_inner();
        for c in text.chars() {
            if c == '\n' {
                self.split_line_at_cursor();
            } else if c != '\r' {
                let col = self.cursor_col;
                let line = &mut self.lines[self.cursor_row];
                let idx = Self::byte_index(line, col);
                line.insert(idx, c);
                self.cursor_col += 1;
            }
        }
        self.modified = true;
    }

    /// Tab inserts a fixed four-space indent.
    pub fn insert_tab(&mut self) {
        self.insert_str("    ");
    }

    pub fn insert_newline(&mut self) {
        self.push_undo();
        self.delete_selection_inner();
        self.split_line_at_cursor();
        self.modified = true;
    }

    fn split_line_at_cursor(&mut self) {
        let col = self.cursor_col;
        let line = &mut self.lines[self.cursor_row];
        let idx = Self::byte_index(line, col);
        let rest = line.split_off(idx);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    pub fn backspace(&mut self) {
        if self.selection.is_some() {
            self.push_undo();
            self.delete_selection_inner();
            self.modified = true;
            return;
        }
        if self.cursor_col > 0 {
            self.push_undo();
            let col = self.cursor_col - 1;
            let line = &mut self.lines[self.cursor_row];
            let idx = Self::byte_index(line, col);
            line.remove(idx);
            self.cursor_col = col;
            self.modified = true;
        } else if self.cursor_row > 0 {
            self.push_undo();
            let current = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
            self.lines[self.cursor_row].push_str(&current);
            self.modified = true;
        }
    }

    pub fn delete_forward(&mut self) {
        if self.selection.is_some() {
            self.push_undo();
            self.delete_selection_inner();
            self.modified = true;
            return;
        }
        if self.cursor_col < self.line_len(self.cursor_row) {
            self.push_undo();
            let col = self.cursor_col;
            let line = &mut self.lines[self.cursor_row];
            let idx = Self::byte_index(line, col);
            line.remove(idx);
            self.modified = true;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.push_undo();
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
            self.modified = true;
        }
    }

    // ---- cursor movement ----

    pub fn move_left(&mut self) {
        self.selection = None;
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.line_len(self.cursor_row);
        }
    }

    pub fn move_right(&mut self) {
        self.selection = None;
        if self.cursor_col < self.line_len(self.cursor_row) {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_up(&mut self) {
        self.selection = None;
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }

    pub fn move_down(&mut self) {
        self.selection = None;
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
        }
    }

    pub fn move_home(&mut self) {
        self.selection = None;
        self.cursor_col = 0;
    }

    pub fn move_end(&mut self) {
        self.selection = None;
        self.cursor_col = self.line_len(self.cursor_row);
    }

    pub fn move_page_up(&mut self, page: usize) {
        self.selection = None;
        self.cursor_row = self.cursor_row.saturating_sub(page.max(1));
        self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
    }

    pub fn move_page_down(&mut self, page: usize) {
        self.selection = None;
        self.cursor_row = (self.cursor_row + page.max(1)).min(self.lines.len() - 1);
        self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_row));
    }

    // ---- selection and clipboard ----

    pub fn select_all(&mut self) {
        let last_row = self.lines.len() - 1;
        let last_col = self.line_len(last_row);
        self.selection = Some(((0, 0), (last_row, last_col)));
        self.cursor_row = last_row;
        self.cursor_col = last_col;
    }

    pub fn selected_text(&self) -> Option<String> {
        let ((sr, sc), (er, ec)) = self.selection?;
        if sr == er {
            let line = &self.lines[sr];
            let start = Self::byte_index(line, sc);
            let end = Self::byte_index(line, ec);
            return Some(line[start..end].to_string());
        }
        let mut out = String::new();
        let first = &self.lines[sr];
        out.push_str(&first[Self::byte_index(first, sc)..]);
        for row in sr + 1..er {
            out.push('\n');
            out.push_str(&self.lines[row]);
        }
        out.push('\n');
        let last = &self.lines[er];
        out.push_str(&last[..Self::byte_index(last, ec)]);
        Some(out)
    }

    fn delete_selection_inner(&mut self) {
        let Some(((sr, sc), (er, ec))) = self.selection.take() else {
            return;
        };
        if sr == er {
            let line = &mut self.lines[sr];
            let start = Self::byte_index(line, sc);
            let end = Self::byte_index(line, ec);
            line.replace_range(start..end, "");
        } else {
            let tail = {
                let last = &self.lines[er];
                last[Self::byte_index(last, ec)..].to_string()
            };
            let first = &mut self.lines[sr];
            first.truncate(Self::byte_index(first, sc));
            first.push_str(&tail);
            self.lines.drain(sr + 1..=er);
        }
        self.cursor_row = sr;
        self.cursor_col = sc;
    }

    /// Copy the selection, if any. The buffer is unchanged.
    pub fn copy(&self) -> Option<String> {
        self.selected_text()
    }

    /// Cut the selection, if any.
    pub fn cut(&mut self) -> Option<String> {
        let text = self.selected_text()?;
        self.push_undo();
        self.delete_selection_inner();
        self.modified = true;
        Some(text)
    }

    pub fn paste(&mut self, text: &str) {
        self.insert_str(text);
    }

    // ---- history ----

    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            self.redo_stack.push(Snapshot {
                text: self.text(),
                cursor_row: self.cursor_row,
                cursor_col: self.cursor_col,
            });
            self.restore(snapshot);
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            self.undo_stack.push(Snapshot {
                text: self.text(),
                cursor_row: self.cursor_row,
                cursor_col: self.cursor_col,
            });
            self.restore(snapshot);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_text_round_trip() {
        let mut buf = EditorBuffer::new();
        buf.insert_str("hello");
        buf.insert_newline();
        buf.insert_str("world");
        assert_eq!(buf.text(), "hello\nworld");
        assert_eq!(buf.cursor(), (1, 5));
    }

    #[test]
    fn tab_inserts_four_spaces() {
        let mut buf = EditorBuffer::new();
        buf.insert_tab();
        assert_eq!(buf.text(), "    ");
    }

    #[test]
    fn backspace_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_down();
        buf.move_home();
        buf.backspace();
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), (0, 2));
    }

    #[test]
    fn undo_redo_restores_text() {
        let mut buf = EditorBuffer::new();
        buf.insert_str("first");
        buf.insert_newline();
        buf.insert_str("second");
        assert!(buf.undo());
        assert!(buf.undo());
        assert_eq!(buf.text(), "first");
        assert!(buf.redo());
        assert_eq!(buf.text(), "first\n");
    }

    #[test]
    fn select_all_cut_paste() {
        let mut buf = EditorBuffer::from_text("one\ntwo");
        buf.select_all();
        let cut = buf.cut().expect("selection should yield text");
        assert_eq!(cut, "one\ntwo");
        assert_eq!(buf.text(), "");
        buf.paste(&cut);
        assert_eq!(buf.text(), "one\ntwo");
    }

    #[test]
    fn copy_without_selection_is_none() {
        let buf = EditorBuffer::from_text("text");
        assert!(buf.copy().is_none());
    }

    #[test]
    fn multibyte_editing() {
        let mut buf = EditorBuffer::new();
        buf.insert_str("héllo");
        buf.backspace();
        buf.backspace();
        assert_eq!(buf.text(), "hél");
    }

    #[test]
    fn trailing_newline_round_trips() {
        let buf = EditorBuffer::from_text("line\n");
        assert_eq!(buf.text(), "line\n");
        assert_eq!(buf.line_count(), 2);
    }
}
