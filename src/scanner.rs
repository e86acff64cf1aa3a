//! Descriptor Scanner
//!
//! Walks the application directories, parses every `.desktop` file and
//! builds a fresh [`Registry`]. A bad file is skipped and recorded in the
//! [`ScanReport`]; it never aborts the scan.

use crate::config::LauncherConfig;
use crate::desktop_entry::{self, ParseWarning};
use crate::error::FuzzMenuError;
use crate::icons::{IconResolver, NoIcons, ThemeIconResolver};
use crate::logging;
use crate::registry::{Application, Registry};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

// ============================================================================
// Scanner Configuration
// ============================================================================

/// Configuration for the scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directories to scan, in priority order
    pub app_dirs: Vec<PathBuf>,
    /// Icon size handed to the resolver
    pub icon_size: u32,
    /// Keep `NoDisplay=true` / `Hidden=true` entries
    pub include_hidden: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            app_dirs: crate::config::default_app_dirs(),
            icon_size: 48,
            include_hidden: false,
        }
    }
}

impl From<&LauncherConfig> for ScanConfig {
    fn from(config: &LauncherConfig) -> Self {
        Self {
            app_dirs: config.app_dirs.clone(),
            icon_size: config.icon_size,
            include_hidden: config.include_hidden,
        }
    }
}

// ============================================================================
// Scan Report
// ============================================================================

/// Why a descriptor file did not make it into the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `Type` is something other than `Application`
    NotApplication(String),
    /// `NoDisplay` or `Hidden` is set
    NotListed,
    /// A file with the same name was already taken from an earlier directory
    Shadowed,
    /// The file could not be read
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotApplication(t) if t.is_empty() => write!(f, "no Type"),
            SkipReason::NotApplication(t) => write!(f, "Type={}", t),
            SkipReason::NotListed => write!(f, "NoDisplay/Hidden"),
            SkipReason::Shadowed => write!(f, "shadowed by an earlier directory"),
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
        }
    }
}

/// A skipped descriptor file
#[derive(Debug, Clone)]
pub struct SkippedDescriptor {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// A warning raised while parsing one descriptor
#[derive(Debug, Clone)]
pub struct DescriptorWarning {
    pub filename: String,
    pub warning: ParseWarning,
}

/// Result of one scan
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub registry: Registry,
    pub skipped: Vec<SkippedDescriptor>,
    pub warnings: Vec<DescriptorWarning>,
    pub elapsed: Duration,
}

// ============================================================================
// Descriptor Scanner
// ============================================================================

/// Builds registries from descriptor directories
pub struct DescriptorScanner {
    config: ScanConfig,
    resolver: Box<dyn IconResolver>,
}

impl DescriptorScanner {
    /// Scanner over the given directories, without icon lookup
    pub fn new(app_dirs: Vec<PathBuf>) -> Self {
        Self {
            config: ScanConfig {
                app_dirs,
                ..ScanConfig::default()
            },
            resolver: Box::new(NoIcons),
        }
    }

    /// Scanner set up from the launcher configuration, with theme icon lookup
    pub fn from_config(config: &LauncherConfig) -> Self {
        Self {
            config: ScanConfig::from(config),
            resolver: Box::new(ThemeIconResolver::new(config.icon_theme.as_deref())),
        }
    }

    /// Configure the scanner
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the icon resolver
    pub fn with_resolver(mut self, resolver: impl IconResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Perform the scan
    pub fn scan(&self) -> ScanReport {
        let start_time = Instant::now();
        logging::separator("SCAN START");

        let mut report = ScanReport::default();
        let mut taken: HashSet<String> = HashSet::new();
        let mut apps = Vec::new();

        for dir in &self.config.app_dirs {
            for path in list_descriptors(dir) {
                let Some(filename) = path.file_name().and_then(|n| n.to_str()).map(String::from)
                else {
                    continue;
                };

                if taken.contains(&filename) {
                    report.skipped.push(SkippedDescriptor {
                        path,
                        reason: SkipReason::Shadowed,
                    });
                    continue;
                }

                match self.load_descriptor(&path, &filename, &mut report.warnings) {
                    Ok(app) => {
                        taken.insert(filename);
                        apps.push(app);
                    }
                    Err(reason) => {
                        logging::debug("SCANNER", &format!("skip {}: {}", path.display(), reason));
                        report.skipped.push(SkippedDescriptor { path, reason });
                    }
                }
            }
        }

        let mut registry = Registry::new(apps);
        registry.sort_by_name();
        report.registry = registry;
        report.elapsed = start_time.elapsed();

        logging::log_scan_summary(
            &self.config.app_dirs,
            report.registry.len(),
            report.skipped.len(),
            report.warnings.len(),
        );
        report
    }

    fn load_descriptor(
        &self,
        path: &Path,
        filename: &str,
        warnings: &mut Vec<DescriptorWarning>,
    ) -> std::result::Result<Application, SkipReason> {
        let parsed =
            desktop_entry::parse_file(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;

        if !parsed.entry.is_application() {
            return Err(SkipReason::NotApplication(parsed.entry.entry_type));
        }
        if !self.config.include_hidden && !parsed.entry.is_listed() {
            return Err(SkipReason::NotListed);
        }

        for warning in parsed.warnings {
            logging::log_parse_warning(filename, &warning);
            warnings.push(DescriptorWarning {
                filename: filename.to_string(),
                warning,
            });
        }

        let icon_path = self.resolver.resolve(&parsed.entry.icon, self.config.icon_size);
        Ok(Application::from_entry(filename, parsed.entry, icon_path))
    }
}

/// `.desktop` files directly inside `dir`, sorted by file name.
/// A missing or unreadable directory yields nothing.
fn list_descriptors(dir: &Path) -> Vec<PathBuf> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            logging::debug("SCANNER", &format!("no directory {}", dir.display()));
            return Vec::new();
        }
        Err(e) => {
            let err = FuzzMenuError::DirectoryError(dir.to_path_buf(), e);
            logging::warn("SCANNER", &err.to_string());
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "desktop"))
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn only_applications_are_registered() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "app.desktop", "[Desktop Entry]\nType=Application\nName=App\n");
        write(dir.path(), "link.desktop", "[Desktop Entry]\nType=Link\nName=Link\n");
        write(dir.path(), "dir.desktop", "[Desktop Entry]\nType=Directory\nName=Dir\n");
        write(dir.path(), "notes.txt", "[Desktop Entry]\nType=Application\nName=Txt\n");

        let report = DescriptorScanner::new(vec![dir.path().to_path_buf()]).scan();
        let names: Vec<_> = report.registry.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["App"]);
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn earlier_directory_wins_on_duplicate_filename() {
        let sys = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        write(sys.path(), "same.desktop", "[Desktop Entry]\nType=Application\nName=System\n");
        write(user.path(), "same.desktop", "[Desktop Entry]\nType=Application\nName=User\n");

        let report =
            DescriptorScanner::new(vec![sys.path().to_path_buf(), user.path().to_path_buf()])
                .scan();
        assert_eq!(report.registry.len(), 1);
        assert_eq!(report.registry.find("same.desktop").unwrap().name, "System");
        assert_eq!(report.skipped[0].reason, SkipReason::Shadowed);
    }

    #[test]
    fn missing_directory_is_not_an_error() {
        let report = DescriptorScanner::new(vec![PathBuf::from("/definitely/not/here")]).scan();
        assert!(report.registry.is_empty());
    }

    #[test]
    fn no_display_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "hidden.desktop",
            "[Desktop Entry]\nType=Application\nName=Hidden\nNoDisplay=true\n",
        );
        let scanner = DescriptorScanner::new(vec![dir.path().to_path_buf()]);
        assert!(scanner.scan().registry.is_empty());

        let scanner = scanner.with_config(ScanConfig {
            app_dirs: vec![dir.path().to_path_buf()],
            icon_size: 48,
            include_hidden: true,
        });
        assert_eq!(scanner.scan().registry.len(), 1);
    }

    #[test]
    fn launcher_config_controls_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "hidden.desktop",
            "[Desktop Entry]\nType=Application\nName=Hidden\nHidden=true\n",
        );
        write(dir.path(), "shown.desktop", "[Desktop Entry]\nType=Application\nName=Shown\n");

        let mut config = LauncherConfig {
            app_dirs: vec![dir.path().to_path_buf()],
            ..LauncherConfig::default()
        };
        assert!(!ScanConfig::from(&config).include_hidden);
        let report = DescriptorScanner::new(config.app_dirs.clone())
            .with_config(ScanConfig::from(&config))
            .scan();
        assert_eq!(report.registry.len(), 1);
        assert!(report.skipped.iter().any(|s| s.reason == SkipReason::NotListed));

        config.include_hidden = true;
        let report = DescriptorScanner::new(config.app_dirs.clone())
            .with_config(ScanConfig::from(&config))
            .scan();
        let names: Vec<_> = report.registry.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Hidden", "Shown"]);
    }

    #[test]
    fn resolver_fills_icon_path() {
        struct Fixed;
        impl IconResolver for Fixed {
            fn resolve(&self, icon: &str, size: u32) -> Option<PathBuf> {
                (!icon.is_empty()).then(|| PathBuf::from(format!("/icons/{}/{}.png", size, icon)))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.desktop", "[Desktop Entry]\nType=Application\nName=A\nIcon=a\n");
        write(dir.path(), "b.desktop", "[Desktop Entry]\nType=Application\nName=B\n");

        let report = DescriptorScanner::new(vec![dir.path().to_path_buf()])
            .with_resolver(Fixed)
            .scan();
        assert_eq!(
            report.registry.find("a.desktop").unwrap().icon_path,
            Some(PathBuf::from("/icons/48/a.png"))
        );
        assert_eq!(report.registry.find("b.desktop").unwrap().icon_path, None);
    }
}
