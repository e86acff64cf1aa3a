use crate::config::CategoryEntry;
use crate::launcher::Launcher;
use crate::logging;
use crate::session::Session;
use crate::tui::search::SearchState;
use crate::tui::table::TableState;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::Duration;

/// Which pane receives plain keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Applications,
    Categories,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Applications,
            Focus::Applications => Focus::Categories,
            Focus::Categories => Focus::Search,
        }
    }
}

pub struct App<L: Launcher> {
    pub session: Session<L>,

    // Sub-states
    pub search: SearchState,
    pub table: TableState,
    pub focus: Focus,
    /// Highlighted entry in the category column (index into the config list)
    pub category_cursor: usize,

    pub status_message: String,

    // Quit flag
    pub should_quit: bool,
}

impl<L: Launcher> App<L> {
    pub fn new(session: Session<L>) -> Self {
        let category_cursor = session
            .category_entries()
            .iter()
            .position(|c| c.key() == Some(session.current_category()))
            .unwrap_or(0);

        let mut table = TableState::default();
        table.reset(session.view_len());

        Self {
            status_message: format!("{} applications", session.registry().len()),
            session,
            search: SearchState::default(),
            table,
            focus: Focus::Search,
            category_cursor,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(100);

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if let Some(query) = self.search.take_pending() {
                self.session.search(query);
                self.table.reset(self.session.view_len());
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') | KeyCode::Char('R') if ctrl => {
                let flush = key.modifiers.contains(KeyModifiers::SHIFT)
                    || key.code == KeyCode::Char('R');
                if flush {
                    self.flush();
                } else {
                    self.reload();
                }
                return;
            }
            KeyCode::F(5) => {
                self.reload();
                return;
            }
            KeyCode::Char('f') if ctrl => {
                self.toggle_selected_favorite();
                return;
            }
            KeyCode::Esc => {
                if self.focus == Focus::Search && !self.search.query.is_empty() {
                    self.search.clear();
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::Tab => {
                self.set_focus(self.focus.next());
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Applications => self.handle_table_key(key),
            Focus::Categories => self.handle_category_key(key),
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.search.focused = focus == Focus::Search;
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.search.insert(c),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Down | KeyCode::Up | KeyCode::PageDown | KeyCode::PageUp | KeyCode::Enter => {
                self.handle_table_key(key)
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let total = self.session.view_len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(),
            KeyCode::PageDown => self.table.page_down(total),
            KeyCode::PageUp => self.table.page_up(),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(total),
            KeyCode::Enter => self.launch_selected(),
            KeyCode::Char('f') => self.toggle_selected_favorite(),
            _ => {}
        }
    }

    fn handle_category_key(&mut self, key: KeyEvent) {
        let entries = self.session.category_entries();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(i) = (self.category_cursor + 1..entries.len())
                    .find(|&i| entries[i] != CategoryEntry::Spacer)
                {
                    self.category_cursor = i;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(i) = (0..self.category_cursor)
                    .rev()
                    .find(|&i| entries[i] != CategoryEntry::Spacer)
                {
                    self.category_cursor = i;
                }
            }
            KeyCode::Enter => {
                let key = entries
                    .get(self.category_cursor)
                    .and_then(CategoryEntry::key)
                    .map(String::from);
                if let Some(key) = key {
                    self.session.open_category(&key);
                    self.table.reset(self.session.view_len());
                    self.set_focus(Focus::Applications);
                }
            }
            _ => {}
        }
    }

    fn launch_selected(&mut self) {
        let Some(row) = self.table.selected else {
            return;
        };
        match self.session.launch(row) {
            Ok(()) => {
                if let Some(app) = self.session.app_at(row) {
                    self.status_message = format!("Launched {}", app.name);
                }
            }
            Err(e) => {
                let msg = format!("launch failed: {}", e);
                if e.is_recoverable() {
                    logging::warn("TUI", &msg);
                } else {
                    logging::error("TUI", &msg);
                }
            }
        }
    }

    fn toggle_selected_favorite(&mut self) {
        let Some(row) = self.table.selected else {
            return;
        };
        let name = self.session.app_at(row).map(|a| a.name.clone());
        match self.session.toggle_favorite(row) {
            Ok(favorite) => {
                self.status_message = format!(
                    "{} {}",
                    name.unwrap_or_default(),
                    if favorite { "added to favorites" } else { "removed from favorites" }
                );
                self.table.clamp(self.session.view_len());
            }
            Err(e) => logging::warn("TUI", &format!("favorite toggle failed: {}", e)),
        }
    }

    fn reload(&mut self) {
        let stats = self.session.reload();
        self.table.reset(self.session.view_len());
        self.status_message = format!(
            "Reloaded: {} applications ({} skipped)",
            stats.applications, stats.skipped
        );
    }

    fn flush(&mut self) {
        let stats = self.session.flush();
        self.table.reset(self.session.view_len());
        self.status_message = format!("Flushed: {} applications", stats.applications);
    }
}
