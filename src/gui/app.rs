//! Main FuzzMenu window

use crate::config::CategoryEntry;
use crate::filter::Filter;
use crate::gui::icons::IconCache;
use crate::gui::list::{RowAction, ScrolledList};
use crate::gui::search::SearchState;
use crate::logging;
use crate::registry::Application;
use crate::session::{ScanStats, Session};
use eframe::egui;

const SEARCH_BAR_HEIGHT: f32 = 20.0;
const CATEGORY_BUTTON_HEIGHT: f32 = 26.0;
const CATEGORY_SPACER: f32 = 30.0;

/// Main application state
pub struct LauncherApp {
    /// Registry and view state
    session: Session,
    /// Search field
    search: SearchState,
    /// Application rows
    list: ScrolledList,
    /// Decoded row icons
    icons: IconCache,
    /// Status bar message
    status_message: String,
    /// The window has been focused at least once
    had_focus: bool,
}

impl LauncherApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, session: Session) -> Self {
        let mut list = ScrolledList::default();
        list.configure_scroll_region(session.view_len());

        Self {
            status_message: format!("{} applications", session.registry().len()),
            session,
            search: SearchState::default(),
            list,
            icons: IconCache::default(),
            had_focus: false,
        }
    }

    /// Re-render the list after the session view changed
    fn refresh_list(&mut self) {
        self.list.clear();
        self.list.configure_scroll_region(self.session.view_len());
    }

    fn open_category(&mut self, key: &str) {
        self.session.open_category(key);
        self.refresh_list();
    }

    fn launch(&mut self, row: usize) {
        if let Err(e) = self.session.launch(row) {
            let msg = format!("launch failed: {}", e);
            if e.is_recoverable() {
                logging::warn("GUI", &msg);
            } else {
                logging::error("GUI", &msg);
            }
        }
    }

    fn toggle_favorite(&mut self, row: usize) {
        match self.session.toggle_favorite(row) {
            Ok(_) => self.list.configure_scroll_region(self.session.view_len()),
            Err(e) => logging::warn("GUI", &format!("favorite toggle failed: {}", e)),
        }
    }

    fn after_scan(&mut self, what: &str, stats: ScanStats) {
        self.icons.clear();
        self.refresh_list();
        self.status_message = format!(
            "{}: {} applications ({} skipped)",
            what, stats.applications, stats.skipped
        );
    }

    /// Keyboard shortcuts; consumed before any widget sees them
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (quit, flush, reload, down, up, enter) = ctx.input_mut(|i| {
            let quit = i.consume_key(egui::Modifiers::NONE, egui::Key::Escape)
                || i.consume_key(egui::Modifiers::CTRL, egui::Key::Q);
            // Flush first: Ctrl+R would also match Ctrl+Shift+R
            let flush = i.consume_key(egui::Modifiers::CTRL | egui::Modifiers::SHIFT, egui::Key::R);
            let reload = i.consume_key(egui::Modifiers::NONE, egui::Key::F5)
                || i.consume_key(egui::Modifiers::CTRL, egui::Key::R);
            let down = i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowDown);
            let up = i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowUp);
            let enter = i.consume_key(egui::Modifiers::NONE, egui::Key::Enter);
            (quit, flush, reload, down, up, enter)
        });

        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        if flush {
            let stats = self.session.flush();
            self.after_scan("Flushed", stats);
        } else if reload {
            let stats = self.session.reload();
            self.after_scan("Reloaded", stats);
        }
        if down {
            self.list.select_next();
        }
        if up {
            self.list.select_prev();
        }
        if enter {
            if let Some(row) = self.list.activation_target() {
                self.launch(row);
            }
        }
    }

    /// Close on focus loss, once the window has been focused
    fn handle_focus(&mut self, ctx: &egui::Context) {
        if !self.session.config().close_on_unfocus {
            return;
        }
        match ctx.input(|i| i.viewport().focused) {
            Some(true) => self.had_focus = true,
            Some(false) if self.had_focus => {
                logging::info("GUI", "focus lost, closing");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            _ => {}
        }
    }

    /// Render search bar
    fn render_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar")
            .exact_height(SEARCH_BAR_HEIGHT + 8.0)
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.search.query)
                        .desired_width(f32::INFINITY)
                        .hint_text("Search Applications"),
                );

                if self.search.first_frame {
                    response.request_focus();
                    self.search.first_frame = false;
                }

                if response.changed() {
                    self.search.needs_search = true;
                }
            });

        if let Some(query) = self.search.take_pending() {
            self.session.search(query);
            self.refresh_list();
        }
    }

    /// Render the category column
    fn render_categories(&mut self, ctx: &egui::Context) {
        let width = self.session.config().geometry.category_column_width();
        let mut clicked: Option<String> = None;

        egui::SidePanel::left("categories")
            .exact_width(width)
            .resizable(false)
            .show(ctx, |ui| {
                let active = match self.session.filter() {
                    Filter::Category(key) => Some(key.as_str()),
                    Filter::Search(_) => None,
                };

                for entry in self.session.category_entries() {
                    match entry {
                        CategoryEntry::Spacer => ui.add_space(CATEGORY_SPACER),
                        CategoryEntry::Bucket { key } => {
                            let label = entry.label().unwrap_or(key);
                            let button = egui::Button::new(label).selected(active == Some(key.as_str()));
                            if ui.add_sized([width, CATEGORY_BUTTON_HEIGHT], button).clicked() {
                                clicked = Some(key.clone());
                            }
                        }
                    }
                }
            });

        if let Some(key) = clicked {
            self.open_category(&key);
        }
    }

    /// Render status bar
    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} shown", self.session.view_len()));
                ui.separator();
                ui.label(&self.status_message);
            });
        });
    }

    fn render_list(&mut self, ctx: &egui::Context) {
        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let rows: Vec<&Application> = self.session.current_apps().collect();
            action = self.list.show(ui, &rows, &mut self.icons);
        });

        match action {
            Some(RowAction::Launch(row)) => {
                self.list.selected = Some(row);
                self.launch(row);
            }
            Some(RowAction::ToggleFavorite(row)) => self.toggle_favorite(row),
            None => {}
        }
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_focus(ctx);
        self.handle_shortcuts(ctx);

        self.render_search_bar(ctx);
        self.render_status_bar(ctx);
        self.render_categories(ctx);
        self.render_list(ctx);
    }
}
