//! Launcher session
//!
//! Owns the registry, its cache and the view state, and implements the
//! launcher's state machine. Front-ends only forward user gestures here and
//! draw whatever [`Session::current_apps`] returns.
//!
//! ```text
//! Idle(category X) --category click--> Idle(category Y)
//! Idle(any)        --search edit-----> Filtered(query Q)
//! Filtered(Q)      --category click--> Idle(category)
//! Idle(Favorites)  --favorite toggle-> Idle(Favorites), re-evaluated
//! ```

use crate::cache::RegistryCache;
use crate::config::{CategoryEntry, LauncherConfig};
use crate::error::{FuzzMenuError, Result};
use crate::filter::Filter;
use crate::launcher::{Launcher, ShellLauncher};
use crate::logging;
use crate::registry::{Application, Registry};
use crate::scanner::{DescriptorScanner, ScanReport};
use std::time::Duration;

/// Counters of the last scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    pub applications: usize,
    pub skipped: usize,
    pub warnings: usize,
    pub elapsed: Duration,
}

impl From<&ScanReport> for ScanStats {
    fn from(report: &ScanReport) -> Self {
        Self {
            applications: report.registry.len(),
            skipped: report.skipped.len(),
            warnings: report.warnings.len(),
            elapsed: report.elapsed,
        }
    }
}

/// Where the registry of a freshly opened session came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrySource {
    Cache,
    Scan(ScanStats),
}

/// Registry plus view state
pub struct Session<L: Launcher = ShellLauncher> {
    config: LauncherConfig,
    scanner: DescriptorScanner,
    cache: RegistryCache,
    launcher: L,
    registry: Registry,
    filter: Filter,
    current_category: String,
    current_apps: Vec<usize>,
    source: RegistrySource,
}

impl Session<ShellLauncher> {
    /// Open a session for the given configuration with the real scanner,
    /// cache and shell launcher
    pub fn open(config: LauncherConfig) -> Self {
        let scanner = DescriptorScanner::from_config(&config);
        let cache = RegistryCache::new(config.cache_path.clone());
        Self::with_parts(config, scanner, cache, ShellLauncher::default())
    }
}

impl<L: Launcher> Session<L> {
    /// Open a session from explicit parts. Loads the cache when present,
    /// otherwise scans and writes it, then opens the default category.
    pub fn with_parts(
        config: LauncherConfig,
        scanner: DescriptorScanner,
        cache: RegistryCache,
        launcher: L,
    ) -> Self {
        let default_category = config.default_category.clone();
        let mut session = Self {
            config,
            scanner,
            cache,
            launcher,
            registry: Registry::default(),
            filter: Filter::category(default_category.clone()),
            current_category: default_category,
            current_apps: Vec::new(),
            source: RegistrySource::Cache,
        };

        match session.cache.load_or_none() {
            Some(registry) => {
                logging::info(
                    "SESSION",
                    &format!("loaded {} applications from cache", registry.len()),
                );
                session.registry = registry;
            }
            None => {
                let stats = session.rescan(false);
                session.source = RegistrySource::Scan(stats);
            }
        }

        session.refresh_view();
        session
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn source(&self) -> RegistrySource {
        self.source
    }

    /// Last opened category bucket; kept while a search is active
    pub fn current_category(&self) -> &str {
        &self.current_category
    }

    /// Applications in the current view, in display order
    pub fn current_apps(&self) -> impl Iterator<Item = &Application> + '_ {
        self.current_apps
            .iter()
            .filter_map(move |&i| self.registry.get(i))
    }

    /// Configured category column, spacers included
    pub fn category_entries(&self) -> &[CategoryEntry] {
        &self.config.categories
    }

    pub fn view_len(&self) -> usize {
        self.current_apps.len()
    }

    /// Application shown at `row` of the current view
    pub fn app_at(&self, row: usize) -> Option<&Application> {
        self.current_apps
            .get(row)
            .and_then(|&i| self.registry.get(i))
    }

    /// Open a category bucket
    pub fn open_category(&mut self, key: &str) {
        logging::debug("SESSION", &format!("opening category: '{}'", key));
        self.current_category = key.to_string();
        self.filter = Filter::category(key);
        self.refresh_view();
    }

    /// Show applications whose name contains `query`
    pub fn search(&mut self, query: &str) {
        self.filter = Filter::search(query);
        self.refresh_view();
    }

    /// Toggle the favorite flag of the application at `row` and persist it.
    /// Returns the new flag.
    pub fn toggle_favorite(&mut self, row: usize) -> Result<bool> {
        let filename = self
            .app_at(row)
            .map(|a| a.filename.clone())
            .ok_or(FuzzMenuError::RowOutOfRange(row))?;
        self.toggle_favorite_by_filename(&filename)
    }

    /// Toggle the favorite flag of the application with this descriptor name
    pub fn toggle_favorite_by_filename(&mut self, filename: &str) -> Result<bool> {
        let favorite = self.registry.toggle_favorite(filename)?;
        logging::info(
            "SESSION",
            &format!("favorite {} -> {}", filename, favorite),
        );
        self.persist();

        if self.filter.is_favorites() {
            self.refresh_view();
        }
        Ok(favorite)
    }

    /// Launch the application at `row`
    pub fn launch(&self, row: usize) -> Result<()> {
        let app = self.app_at(row).ok_or(FuzzMenuError::RowOutOfRange(row))?;
        self.launcher.launch(app)
    }

    /// Launch the application with this descriptor name
    pub fn launch_filename(&self, filename: &str) -> Result<()> {
        let app = self
            .registry
            .find(filename)
            .ok_or_else(|| FuzzMenuError::UnknownApplication(filename.to_string()))?;
        self.launcher.launch(app)
    }

    /// Rescan descriptors, keeping favorites
    pub fn reload(&mut self) -> ScanStats {
        let stats = self.rescan(true);
        self.refresh_view();
        stats
    }

    /// Drop the cache and all favorites, then rescan from defaults
    pub fn flush(&mut self) -> ScanStats {
        if let Err(e) = self.cache.flush() {
            logging::warn("SESSION", &format!("cache flush failed: {}", e));
        }
        self.registry = Registry::default();
        let stats = self.rescan(false);
        self.refresh_view();
        stats
    }

    fn rescan(&mut self, keep_favorites: bool) -> ScanStats {
        let report = self.scanner.scan();
        let stats = ScanStats::from(&report);

        let mut registry = report.registry;
        if keep_favorites {
            registry.merge_favorites(&self.registry);
        }
        self.registry = registry;
        self.persist();
        stats
    }

    fn persist(&self) {
        if let Err(e) = self.cache.save(&self.registry) {
            logging::error("SESSION", &format!("could not save registry: {}", e));
        }
    }

    fn refresh_view(&mut self) {
        self.current_apps = self.filter.apply(&self.registry);
    }
}
