use crate::config::CategoryEntry;
use crate::filter::Filter;
use crate::launcher::Launcher;
use crate::tui::app::{App, Focus};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use unicode_width::UnicodeWidthStr;

const ACCENT: Color = Color::Cyan;
const HEADER_BG: Color = Color::Rgb(0, 95, 135);
const SELECTED_BG: Color = Color::Rgb(60, 60, 80);
const STRIPE_BG: Color = Color::Rgb(25, 25, 35);

pub fn draw<L: Launcher>(frame: &mut Frame, app: &mut App<L>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Categories + applications
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let category_width = (area.width / 3).min(24);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(category_width), Constraint::Min(10)])
        .split(chunks[1]);

    draw_search_bar(frame, app, chunks[0]);
    draw_categories(frame, app, body[0]);
    draw_table(frame, app, body[1]);
    draw_status_bar(frame, app, chunks[2]);

    if app.focus == Focus::Search {
        // Border (1) + leading space (1)
        let typed = app.search.query[..app.search.cursor_pos].width() as u16;
        let cursor_x = (chunks[0].x + 2 + typed).min(chunks[0].right().saturating_sub(2));
        frame.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

fn draw_search_bar<L: Launcher>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let focused = app.focus == Focus::Search;
    let paragraph = if app.search.query.is_empty() && !focused {
        Paragraph::new(" Search Applications").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(format!(" {}", app.search.query)).style(Style::default().fg(Color::White))
    };

    frame.render_widget(paragraph.block(pane_block(" Search ", focused)), area);
}

fn draw_categories<L: Launcher>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let active = match app.session.filter() {
        Filter::Category(key) => Some(key.as_str()),
        Filter::Search(_) => None,
    };
    let focused = app.focus == Focus::Categories;

    let lines: Vec<Line> = app
        .session
        .category_entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            CategoryEntry::Spacer => Line::raw(""),
            CategoryEntry::Bucket { key } => {
                let label = entry.label().unwrap_or(key);
                let mut style = Style::default().fg(Color::White);
                if active == Some(key.as_str()) {
                    style = style.fg(ACCENT).add_modifier(Modifier::BOLD);
                }
                if focused && i == app.category_cursor {
                    style = style.bg(SELECTED_BG);
                }
                Line::styled(format!(" {}", label), style)
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(pane_block(" Categories ", focused)),
        area,
    );
}

fn draw_table<L: Launcher>(frame: &mut Frame, app: &mut App<L>, area: Rect) {
    // Borders (2) + header (1)
    let inner_height = area.height.saturating_sub(3) as usize;
    app.table.visible_rows = inner_height;

    let header = Row::new(["", "Name", "Comment"].map(|name| {
        Cell::from(name).style(
            Style::default()
                .fg(Color::White)
                .bg(HEADER_BG)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    // Build visible rows only
    let start = app.table.scroll_offset;
    let selected = app.table.selected;
    let rows: Vec<Row> = app
        .session
        .current_apps()
        .enumerate()
        .skip(start)
        .take(inner_height)
        .map(|(index, application)| {
            let is_selected = selected == Some(index);
            let bg = if is_selected {
                SELECTED_BG
            } else if (index - start) % 2 == 1 {
                STRIPE_BG
            } else {
                Color::Reset
            };
            let modifier = if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            };

            let star = if application.favorite { "\u{2605}" } else { "" };
            Row::new(vec![
                Cell::from(star).style(Style::default().fg(Color::Yellow).bg(bg)),
                Cell::from(application.name.as_str())
                    .style(Style::default().fg(Color::White).bg(bg).add_modifier(modifier)),
                Cell::from(application.comment.as_str())
                    .style(Style::default().fg(Color::Gray).bg(bg)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Percentage(40),
        Constraint::Fill(1),
    ];
    let title = format!(" {} ", app.session.current_category());
    let table = Table::new(rows, widths)
        .header(header)
        .block(pane_block(&title, app.focus == Focus::Applications));

    frame.render_widget(table, area);
}

fn draw_status_bar<L: Launcher>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let left_text = format!(
        " {} shown | {}",
        app.session.view_len(),
        app.status_message
    );
    let right_text = " Tab:Focus  Enter:Launch  ^F:Favorite  F5:Reload  ^Q:Quit ";

    let available_width = area.width as usize;
    let left_len = left_text.width();
    let right_len = right_text.width();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        left_text
    };

    let paragraph =
        Paragraph::new(status_str).style(Style::default().fg(Color::White).bg(Color::Rgb(40, 40, 50)));
    frame.render_widget(paragraph, area);
}
