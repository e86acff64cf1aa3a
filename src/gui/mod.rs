pub mod app;
pub mod icons;
pub mod list;
pub mod search;

use crate::config::LauncherConfig;
use crate::logging;
use crate::session::Session;
use mouse_position::mouse_position::Mouse;

/// Entry point: open the launcher window
pub fn run(config: LauncherConfig) -> crate::Result<()> {
    let geometry = config.geometry;
    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title("FuzzMenu")
        .with_inner_size([geometry.width as f32, geometry.height as f32])
        .with_min_inner_size([200.0, 150.0]);
    if let Some((x, y)) = geometry.position() {
        viewport = viewport.with_position([x as f32, y as f32]);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let session = Session::open(config);
    eframe::run_native(
        "FuzzMenu",
        native_options,
        Box::new(|cc| Ok(Box::new(app::LauncherApp::new(cc, session)))),
    )
    .map_err(|e| crate::FuzzMenuError::GuiError(e.to_string()))
}

/// Current pointer position in screen coordinates
pub fn pointer_position() -> Option<(i32, i32)> {
    match Mouse::get_mouse_position() {
        Mouse::Position { x, y } => Some((x, y)),
        Mouse::Error => {
            logging::debug("GUI", "pointer position unavailable");
            None
        }
    }
}
