//! Scrollable application list
//!
//! One 40pt row per application: icon, name and comment. The list keeps no
//! application data of its own; callers pass the current rows every frame
//! and get back what the user did with them.

use crate::gui::icons::{IconCache, ICON_EDGE};
use crate::registry::Application;
use eframe::egui;
use egui_extras::{Column, TableBuilder};

const ROW_HEIGHT: f32 = ICON_EDGE as f32;

/// What the user did to a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Primary click or Enter
    Launch(usize),
    /// Secondary click
    ToggleFavorite(usize),
}

/// Scroll and selection state of the application list
#[derive(Debug, Default)]
pub struct ScrolledList {
    row_count: usize,
    /// Keyboard selection (row index)
    pub selected: Option<usize>,
    scroll_to_selected: bool,
    reset_scroll: bool,
}

impl ScrolledList {
    /// Forget all rows, selection and scroll offset
    pub fn clear(&mut self) {
        self.row_count = 0;
        self.selected = None;
        self.scroll_to_selected = false;
        self.reset_scroll = true;
    }

    /// Size the scroll region for `rows` rows
    pub fn configure_scroll_region(&mut self, rows: usize) {
        self.row_count = rows;
        self.selected = match self.selected {
            Some(_) if rows == 0 => None,
            Some(i) => Some(i.min(rows - 1)),
            None => None,
        };
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Height of the whole scroll region
    pub fn content_height(&self) -> f32 {
        self.row_count as f32 * ROW_HEIGHT
    }

    pub fn select_next(&mut self) {
        if self.row_count == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(self.row_count - 1),
            None => 0,
        });
        self.scroll_to_selected = true;
    }

    pub fn select_prev(&mut self) {
        if self.row_count == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
        self.scroll_to_selected = true;
    }

    /// Row Enter should launch: the selection, or the top row
    pub fn activation_target(&self) -> Option<usize> {
        match self.selected {
            Some(i) => Some(i),
            None if self.row_count > 0 => Some(0),
            None => None,
        }
    }

    /// Place the list into `ui` and draw `rows`
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        rows: &[&Application],
        icons: &mut IconCache,
    ) -> Option<RowAction> {
        let mut action = None;
        let available_height = ui.available_height();
        let selected = self.selected;
        let ctx = ui.ctx().clone();

        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(ROW_HEIGHT))
            .column(Column::remainder().clip(true))
            .min_scrolled_height(0.0)
            .max_scroll_height(available_height)
            .sense(egui::Sense::click());

        if std::mem::take(&mut self.reset_scroll) {
            table = table.vertical_scroll_offset(0.0);
        }
        if std::mem::take(&mut self.scroll_to_selected) {
            if let Some(i) = selected {
                table = table.scroll_to_row(i, None);
            }
        }

        table.body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let index = row.index();
                let Some(app) = rows.get(index) else {
                    return;
                };
                row.set_selected(selected == Some(index));

                row.col(|ui| {
                    if let Some(texture) = app.icon_path.as_deref().and_then(|p| icons.get(&ctx, p)) {
                        ui.add(egui::Image::new(egui::load::SizedTexture::new(
                            texture.id(),
                            egui::vec2(ROW_HEIGHT, ROW_HEIGHT),
                        )));
                    }
                });
                row.col(|ui| {
                    ui.vertical(|ui| {
                        let name = if app.favorite {
                            format!("\u{2605} {}", app.name)
                        } else {
                            app.name.clone()
                        };
                        ui.add(egui::Label::new(egui::RichText::new(name).strong()).selectable(false));
                        ui.add(
                            egui::Label::new(egui::RichText::new(&app.comment).small().weak())
                                .selectable(false)
                                .truncate(),
                        );
                    });
                });

                let response = row.response();
                if response.clicked() {
                    action = Some(RowAction::Launch(index));
                } else if response.secondary_clicked() {
                    action = Some(RowAction::ToggleFavorite(index));
                }
            });
        });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_clamped_to_region() {
        let mut list = ScrolledList::default();
        list.configure_scroll_region(3);
        list.select_next();
        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected, Some(2));

        list.configure_scroll_region(2);
        assert_eq!(list.selected, Some(1));
        list.configure_scroll_region(0);
        assert_eq!(list.selected, None);
    }

    #[test]
    fn clear_drops_rows_and_selection() {
        let mut list = ScrolledList::default();
        list.configure_scroll_region(5);
        list.select_next();
        list.clear();
        assert_eq!(list.row_count(), 0);
        assert_eq!(list.selected, None);
        assert_eq!(list.content_height(), 0.0);
    }

    #[test]
    fn enter_targets_selection_or_top_row() {
        let mut list = ScrolledList::default();
        assert_eq!(list.activation_target(), None);
        list.configure_scroll_region(4);
        assert_eq!(list.activation_target(), Some(0));
        list.select_next();
        list.select_next();
        assert_eq!(list.activation_target(), Some(1));
        list.select_prev();
        list.select_prev();
        assert_eq!(list.activation_target(), Some(0));
    }
}
