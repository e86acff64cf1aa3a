//! FuzzMenu - lightweight categorized application launcher
//!
//! Scans freedesktop `.desktop` files into a registry, keeps it cached on
//! disk together with the user's favorites, and shows it as a searchable,
//! categorized list.
//!
//! # Features
//!
//! - **Descriptor Scanning**: tolerant `.desktop` parsing with per-field warnings
//! - **Favorites**: toggled per application, kept across rescans
//! - **Categories**: configurable buckets, including compound `A:B` keys
//! - **Search**: case-insensitive name search, favorites first
//! - **Front-ends**: native window (egui) or terminal (ratatui)
//!
//! # Example
//!
//! ```no_run
//! use fuzzmenu::{LauncherConfig, Session};
//!
//! let mut session = Session::open(LauncherConfig::default());
//! session.open_category("Network");
//! for app in session.current_apps() {
//!     println!("{} ({})", app.name, app.filename);
//! }
//!
//! session.search("fire");
//! if session.view_len() > 0 {
//!     session.launch(0).ok();
//! }
//! ```

pub mod cache;
pub mod config;
pub mod desktop_entry;
pub mod error;
pub mod filter;
pub mod gui;
pub mod icons;
pub mod launcher;
pub mod logging;
pub mod registry;
pub mod scanner;
pub mod session;
pub mod tui;

// Re-export main types
pub use cache::RegistryCache;
pub use config::{CategoryEntry, LauncherConfig, WindowGeometry, ALL_APPLICATIONS, FAVORITES};
pub use desktop_entry::{DesktopEntry, ParseWarning, ParsedEntry};
pub use error::{FuzzMenuError, Result};
pub use filter::Filter;
pub use icons::{IconResolver, NoIcons, ThemeIconResolver};
pub use launcher::{Launcher, ShellLauncher};
pub use registry::{Application, Registry};
pub use scanner::{DescriptorScanner, ScanConfig, ScanReport, SkipReason};
pub use session::{RegistrySource, ScanStats, Session};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name used under the XDG config and cache homes
pub const APP_DIR_NAME: &str = "fuzzmenu";
