//! Launcher configuration
//!
//! One `LauncherConfig` is built in `main` from the command line and handed by
//! reference to every component that needs it.

use crate::error::{FuzzMenuError, Result};
use crate::logging;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

/// Synthetic bucket matching every application
pub const ALL_APPLICATIONS: &str = "All Applications";

/// Synthetic bucket matching favorite-flagged applications
pub const FAVORITES: &str = "Favorites";

/// Category list shown when none is given on the command line
pub const DEFAULT_CATEGORIES: &str = "Favorites,All Applications,,Utility,Development,Game,Graphics,Network,Multimedia:Audio:Video,Office,Settings,System:Filesystem";

/// System directory holding descriptor files
pub const SYSTEM_APPLICATIONS_DIR: &str = "/usr/share/applications";

/// Separator between alternatives inside one category key
pub const COMPOUND_SEPARATOR: char = ':';

// ============================================================================
// Categories
// ============================================================================

/// One item of the configured category column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryEntry {
    /// Empty item, rendered as a gap
    Spacer,
    /// A clickable bucket; `key` may be compound (`Multimedia:Audio:Video`)
    Bucket { key: String },
}

impl CategoryEntry {
    /// Button label: the first part of a compound key
    pub fn label(&self) -> Option<&str> {
        match self {
            CategoryEntry::Spacer => None,
            CategoryEntry::Bucket { key } => key.split(COMPOUND_SEPARATOR).next(),
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            CategoryEntry::Spacer => None,
            CategoryEntry::Bucket { key } => Some(key),
        }
    }
}

/// Parse a comma separated category list. Empty items become spacers.
pub fn parse_categories(list: &str) -> Vec<CategoryEntry> {
    list.split(',')
        .map(|item| {
            let item = item.trim();
            if item.is_empty() {
                CategoryEntry::Spacer
            } else {
                CategoryEntry::Bucket {
                    key: item.to_string(),
                }
            }
        })
        .collect()
}

// ============================================================================
// Window geometry
// ============================================================================

/// Window size and optional position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: 400,
            height: 500,
            x: None,
            y: None,
        }
    }
}

impl WindowGeometry {
    /// Width of the category column: a third of the window, capped at 100
    pub fn category_column_width(&self) -> f32 {
        (self.width as f32 / 3.0).min(100.0)
    }

    /// Position as a pair when both coordinates are known
    pub fn position(&self) -> Option<(i32, i32)> {
        Some((self.x?, self.y?))
    }

    /// Fill missing coordinates from `pointer`, which is only called when a
    /// coordinate is missing. A `None` pointer leaves placement to the
    /// window manager.
    pub fn or_pointer(mut self, pointer: impl FnOnce() -> Option<(i32, i32)>) -> Self {
        if self.position().is_some() {
            return self;
        }
        if let Some((x, y)) = pointer() {
            self.x.get_or_insert(x);
            self.y.get_or_insert(y);
        }
        self
    }
}

fn geometry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+)x(\d+)(?:([+-]\d+)([+-]\d+))?$").expect("geometry pattern is valid")
    })
}

impl FromStr for WindowGeometry {
    type Err = FuzzMenuError;

    /// Parses `WIDTHxHEIGHT` with an optional `+X+Y` suffix.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || FuzzMenuError::InvalidGeometry(s.to_string());
        let caps = geometry_regex().captures(s.trim()).ok_or_else(invalid)?;

        let width = caps[1].parse().map_err(|_| invalid())?;
        let height = caps[2].parse().map_err(|_| invalid())?;
        let x = caps
            .get(3)
            .map(|m| m.as_str().parse::<i32>())
            .transpose()
            .map_err(|_| invalid())?;
        let y = caps
            .get(4)
            .map(|m| m.as_str().parse::<i32>())
            .transpose()
            .map_err(|_| invalid())?;

        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self {
            width,
            height,
            x,
            y,
        })
    }
}

impl fmt::Display for WindowGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)?;
        if let Some((x, y)) = self.position() {
            write!(f, "{:+}{:+}", x, y)?;
        }
        Ok(())
    }
}

// ============================================================================
// Launcher configuration
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Window size and position
    pub geometry: WindowGeometry,
    /// Category column, in display order
    pub categories: Vec<CategoryEntry>,
    /// Bucket opened on start
    pub default_category: String,
    /// Close the window when it loses focus
    pub close_on_unfocus: bool,
    /// Directories scanned for descriptor files, first match wins
    pub app_dirs: Vec<PathBuf>,
    /// Registry cache file
    pub cache_path: PathBuf,
    /// Requested icon size in pixels
    pub icon_size: u32,
    /// Icon theme searched after `hicolor`
    pub icon_theme: Option<String>,
    /// Also register entries marked `NoDisplay` or `Hidden`
    pub include_hidden: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            geometry: WindowGeometry::default(),
            categories: parse_categories(DEFAULT_CATEGORIES),
            default_category: ALL_APPLICATIONS.to_string(),
            close_on_unfocus: false,
            app_dirs: default_app_dirs(),
            cache_path: default_cache_path(),
            icon_size: 48,
            icon_theme: None,
            include_hidden: false,
        }
    }
}

impl LauncherConfig {
    /// Keys of every clickable bucket, in display order
    pub fn category_keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().filter_map(CategoryEntry::key)
    }
}

/// System applications directory followed by the user's own
pub fn default_app_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(SYSTEM_APPLICATIONS_DIR)];
    if let Some(base) = base_directories() {
        dirs.push(base.get_data_home().join("applications"));
    }
    dirs
}

/// `$XDG_CONFIG_HOME/fuzzmenu/registry.json`
pub fn default_cache_path() -> PathBuf {
    base_directories()
        .map(|base| base.get_config_home())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(crate::APP_DIR_NAME)
        .join("registry.json")
}

fn base_directories() -> Option<xdg::BaseDirectories> {
    match xdg::BaseDirectories::new() {
        Ok(base) => Some(base),
        Err(e) => {
            logging::warn("CONFIG", &FuzzMenuError::from(e).to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_categories_keep_spacer_and_compound_keys() {
        let cats = parse_categories(DEFAULT_CATEGORIES);
        assert_eq!(cats.len(), 12);
        assert_eq!(cats[0].key(), Some(FAVORITES));
        assert_eq!(cats[1].key(), Some(ALL_APPLICATIONS));
        assert_eq!(cats[2], CategoryEntry::Spacer);

        let multimedia = cats
            .iter()
            .find(|c| c.label() == Some("Multimedia"))
            .unwrap();
        assert_eq!(multimedia.key(), Some("Multimedia:Audio:Video"));
    }

    #[test]
    fn geometry_with_position() {
        let g: WindowGeometry = "400x500+10+20".parse().unwrap();
        assert_eq!(
            g,
            WindowGeometry {
                width: 400,
                height: 500,
                x: Some(10),
                y: Some(20)
            }
        );
        assert_eq!(g.to_string(), "400x500+10+20");
    }

    #[test]
    fn geometry_without_position() {
        let g: WindowGeometry = "640x480".parse().unwrap();
        assert_eq!(g.position(), None);
        assert_eq!(g.to_string(), "640x480");
    }

    #[test]
    fn geometry_negative_offsets() {
        let g: WindowGeometry = "300x200-5+0".parse().unwrap();
        assert_eq!(g.position(), Some((-5, 0)));
        assert_eq!(g.to_string(), "300x200-5+0");
    }

    #[test]
    fn pointer_fills_only_missing_coordinates() {
        let g = WindowGeometry::default().or_pointer(|| Some((640, 360)));
        assert_eq!(g.position(), Some((640, 360)));

        let g = WindowGeometry {
            x: Some(10),
            ..Default::default()
        }
        .or_pointer(|| Some((640, 360)));
        assert_eq!(g.position(), Some((10, 360)));

        let placed: WindowGeometry = "300x200+1+2".parse().unwrap();
        let g = placed.or_pointer(|| panic!("pointer queried for a placed window"));
        assert_eq!(g, placed);
    }

    #[test]
    fn unknown_pointer_leaves_placement_to_window_manager() {
        let g = WindowGeometry::default().or_pointer(|| None);
        assert_eq!(g, WindowGeometry::default());
        assert_eq!(g.position(), None);
    }

    #[test]
    fn geometry_rejects_garbage() {
        assert!("".parse::<WindowGeometry>().is_err());
        assert!("400x".parse::<WindowGeometry>().is_err());
        assert!("0x100".parse::<WindowGeometry>().is_err());
        assert!("400x500+10".parse::<WindowGeometry>().is_err());
    }

    #[test]
    fn category_column_is_capped() {
        let narrow = WindowGeometry {
            width: 150,
            ..Default::default()
        };
        assert_eq!(narrow.category_column_width(), 50.0);
        assert_eq!(WindowGeometry::default().category_column_width(), 100.0);
    }
}
