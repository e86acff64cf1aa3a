/// Search input state for the TUI
pub struct SearchState {
    pub query: String,
    /// Byte offset of the cursor in `query`
    pub cursor_pos: usize,
    pub focused: bool,
    pub needs_search: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            cursor_pos: 0,
            focused: true,
            needs_search: false,
        }
    }
}

impl SearchState {
    pub fn insert(&mut self, c: char) {
        self.query.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
        self.needs_search = true;
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }
        let prev = self.prev_boundary();
        self.query.remove(prev);
        self.cursor_pos = prev;
        self.needs_search = true;
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.query.len() {
            self.query.remove(self.cursor_pos);
            self.needs_search = true;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos = self.prev_boundary();
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.query.len() {
            self.cursor_pos = self.query[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.query.len());
        }
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor_pos = 0;
        self.needs_search = true;
    }

    /// Take the pending query, if it was edited
    pub fn take_pending(&mut self) -> Option<&str> {
        if self.needs_search {
            self.needs_search = false;
            Some(&self.query)
        } else {
            None
        }
    }

    fn prev_boundary(&self) -> usize {
        self.query[..self.cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_char_boundaries() {
        let mut s = SearchState::default();
        for c in "gäm".chars() {
            s.insert(c);
        }
        assert_eq!(s.query, "gäm");
        s.move_left();
        s.move_left();
        assert_eq!(s.cursor_pos, 1);
        s.delete();
        assert_eq!(s.query, "gm");
        s.move_right();
        s.backspace();
        assert_eq!(s.query, "g");
        assert_eq!(s.cursor_pos, 1);
    }

    #[test]
    fn edits_mark_search_pending() {
        let mut s = SearchState::default();
        s.insert('f');
        assert_eq!(s.take_pending(), Some("f"));
        assert_eq!(s.take_pending(), None);
        s.move_left();
        assert_eq!(s.take_pending(), None);
        s.clear();
        assert_eq!(s.take_pending(), Some(""));
    }
}
