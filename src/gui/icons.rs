//! Icon textures for the application list

use crate::icons::is_vector;
use crate::logging;
use eframe::egui;
use image::imageops::FilterType;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Edge length of a row icon, in points
pub const ICON_EDGE: u32 = 40;

/// Decoded icon textures keyed by file path. Failed loads are remembered too.
#[derive(Default)]
pub struct IconCache {
    textures: HashMap<PathBuf, Option<egui::TextureHandle>>,
}

impl IconCache {
    /// Texture for `path`, decoding it on first use
    pub fn get(&mut self, ctx: &egui::Context, path: &Path) -> Option<&egui::TextureHandle> {
        self.textures
            .entry(path.to_path_buf())
            .or_insert_with(|| {
                let image = load_image(path)?;
                Some(ctx.load_texture(
                    path.to_string_lossy(),
                    image,
                    egui::TextureOptions::LINEAR,
                ))
            })
            .as_ref()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

/// Decode and scale a bitmap icon. Vector formats are not decoded.
fn load_image(path: &Path) -> Option<egui::ColorImage> {
    if is_vector(path) {
        return None;
    }

    let decoded = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            logging::debug("ICONS", &format!("cannot decode {}: {}", path.display(), e));
            return None;
        }
    };

    let rgba = decoded
        .resize_exact(ICON_EDGE, ICON_EDGE, FilterType::Lanczos3)
        .to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Some(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_and_missing_files_have_no_image() {
        assert!(load_image(Path::new("/usr/share/icons/foo.svg")).is_none());
        assert!(load_image(Path::new("/no/such/icon.png")).is_none());
    }

    #[test]
    fn png_is_scaled_to_row_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        image::RgbaImage::from_pixel(16, 16, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.size, [ICON_EDGE as usize, ICON_EDGE as usize]);
    }
}
