//! Icon lookup
//!
//! Maps an `Icon=` identifier to a bitmap file. This is a best-effort walk of
//! the usual theme directories, not a full icon-theme implementation.

use std::path::{Path, PathBuf};

/// Resolves icon identifiers to files
pub trait IconResolver {
    /// Path of an icon close to `size` pixels, if any
    fn resolve(&self, icon: &str, size: u32) -> Option<PathBuf>;
}

/// Resolver that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconResolver for NoIcons {
    fn resolve(&self, _icon: &str, _size: u32) -> Option<PathBuf> {
        None
    }
}

const EXTENSIONS: &[&str] = &["png", "svg", "xpm"];
const FALLBACK_SIZES: &[&str] = &["48x48", "64x64", "32x32", "128x128", "256x256", "scalable"];

/// Looks in `<data dir>/icons/<theme>/<size>/apps` and the pixmaps directories
#[derive(Debug, Clone)]
pub struct ThemeIconResolver {
    icon_roots: Vec<PathBuf>,
    pixmap_dirs: Vec<PathBuf>,
    themes: Vec<String>,
}

impl ThemeIconResolver {
    /// Resolver over the XDG data directories, `hicolor` first then `theme`
    pub fn new(theme: Option<&str>) -> Self {
        let mut data_dirs = Vec::new();
        if let Ok(base) = xdg::BaseDirectories::new() {
            data_dirs.push(base.get_data_home());
            data_dirs.extend(base.get_data_dirs());
        }
        if data_dirs.is_empty() {
            data_dirs.push(PathBuf::from("/usr/share"));
        }
        Self::with_data_dirs(&data_dirs, theme)
    }

    pub fn with_data_dirs(data_dirs: &[PathBuf], theme: Option<&str>) -> Self {
        let mut themes = vec!["hicolor".to_string()];
        if let Some(theme) = theme {
            if theme != "hicolor" {
                themes.push(theme.to_string());
            }
        }

        Self {
            icon_roots: data_dirs.iter().map(|d| d.join("icons")).collect(),
            pixmap_dirs: data_dirs.iter().map(|d| d.join("pixmaps")).collect(),
            themes,
        }
    }

    fn find_in(dir: &Path, icon: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", icon, ext)))
            .find(|p| p.is_file())
    }
}

impl IconResolver for ThemeIconResolver {
    fn resolve(&self, icon: &str, size: u32) -> Option<PathBuf> {
        if icon.is_empty() {
            return None;
        }

        let as_path = Path::new(icon);
        if as_path.is_absolute() {
            return as_path.is_file().then(|| as_path.to_path_buf());
        }

        let requested = format!("{0}x{0}", size);
        let sizes = std::iter::once(requested.as_str())
            .chain(FALLBACK_SIZES.iter().copied().filter(|s| *s != requested));

        for size_dir in sizes {
            for theme in &self.themes {
                for root in &self.icon_roots {
                    let dir = root.join(theme).join(size_dir).join("apps");
                    if let Some(found) = Self::find_in(&dir, icon) {
                        return Some(found);
                    }
                }
            }
        }

        self.pixmap_dirs
            .iter()
            .find_map(|dir| Self::find_in(dir, icon))
    }
}

/// True for formats the bitmap decoder cannot draw
pub fn is_vector(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg") || e.eq_ignore_ascii_case("svgz"))
        .unwrap_or(false)
}
