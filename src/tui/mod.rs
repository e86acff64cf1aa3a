//! Terminal front-end
//!
//! Same session and shortcuts as the window, drawn with ratatui: a search
//! line on top, the category column on the left and the application table
//! on the right.

pub mod app;
pub mod search;
pub mod table;
pub mod ui;

use crate::config::LauncherConfig;
use crate::session::Session;

/// Run the terminal launcher until the user quits
pub fn run(config: LauncherConfig) -> crate::Result<()> {
    let session = Session::open(config);
    let mut app = app::App::new(session);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
