//! Search state management

/// Search state
pub struct SearchState {
    /// Current search query
    pub query: String,
    /// Whether the query changed since the last filter pass
    pub needs_search: bool,
    /// First frame flag (for auto-focus)
    pub first_frame: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            needs_search: false,
            first_frame: true,
        }
    }
}

impl SearchState {
    /// Take the pending query, if the field was edited
    pub fn take_pending(&mut self) -> Option<&str> {
        if self.needs_search {
            self.needs_search = false;
            Some(&self.query)
        } else {
            None
        }
    }
}
