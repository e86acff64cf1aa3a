//! FuzzMenu CLI
//!
//! Opens the launcher window by default, the terminal launcher with
//! `--tui`, and exposes the registry operations as subcommands.

use clap::{Parser, Subcommand};
use console::style;
use fuzzmenu::config::{parse_categories, DEFAULT_CATEGORIES};
use fuzzmenu::logging::{self, FuzzMenuLogger, LogLevel};
use fuzzmenu::{
    Application, CategoryEntry, LauncherConfig, RegistrySource, ScanStats, Session,
    WindowGeometry, ALL_APPLICATIONS,
};
use indicatif::{HumanDuration, ProgressBar};
use std::path::PathBuf;
use std::time::Duration;

/// FuzzMenu - categorized application launcher
///
/// Scans freedesktop desktop entries, caches them with your favorites and
/// shows them as a searchable, categorized list.
#[derive(Parser)]
#[command(name = "fuzzmenu")]
#[command(author = "FuzzMenu Contributors")]
#[command(version)]
#[command(about = "Categorized application launcher", long_about = None)]
struct Cli {
    /// Window X position [default: pointer X]
    #[arg(short = 'x', allow_negative_numbers = true)]
    x: Option<i32>,

    /// Window Y position [default: pointer Y]
    #[arg(short = 'y', allow_negative_numbers = true)]
    y: Option<i32>,

    /// Window geometry as WIDTHxHEIGHT+X+Y; overrides the other size options
    #[arg(short = 'g', long)]
    geometry: Option<WindowGeometry>,

    /// Window width
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Window height
    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Comma separated category column; empty items become spacers
    #[arg(short = 'c', long, default_value = DEFAULT_CATEGORIES)]
    categories: String,

    /// Category opened on start
    #[arg(short = 'd', long, default_value = ALL_APPLICATIONS)]
    default_category: String,

    /// Close the window when it loses focus
    #[arg(long)]
    close_on_unfocus: bool,

    /// Directory of .desktop files to scan (repeatable, first match wins)
    #[arg(long = "apps-dir")]
    apps_dirs: Vec<PathBuf>,

    /// Registry cache file
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Icon size in pixels
    #[arg(long, default_value_t = 48)]
    icon_size: u32,

    /// Icon theme searched after hicolor
    #[arg(long)]
    icon_theme: Option<String>,

    /// Also list entries marked NoDisplay or Hidden
    #[arg(long)]
    include_hidden: bool,

    /// Use the terminal interface instead of a window
    #[arg(long)]
    tui: bool,

    /// Write debug messages to the log file
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the applications of a category
    List {
        /// Category key (compound keys like Multimedia:Audio:Video allowed)
        #[arg(short, long, default_value = ALL_APPLICATIONS)]
        category: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search applications by name, favorites first
    Search {
        /// Case-insensitive name fragment
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Launch an application by descriptor file name
    Launch {
        /// Descriptor file name, e.g. firefox.desktop
        filename: String,
    },

    /// Toggle the favorite flag of an application
    Favorite {
        /// Descriptor file name, e.g. firefox.desktop
        filename: String,
    },

    /// Rescan descriptor directories, keeping favorites
    Rescan,

    /// Delete the cache and all favorites, then rescan
    Flush,

    /// Show the configured categories with their sizes
    Categories {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Build the launcher configuration. Coordinates not given on the
    /// command line come from `pointer`.
    fn launcher_config(&self, pointer: impl FnOnce() -> Option<(i32, i32)>) -> LauncherConfig {
        let mut config = LauncherConfig::default();

        let geometry = match self.geometry {
            Some(geometry) => geometry,
            None => WindowGeometry {
                width: self.width,
                height: self.height,
                x: self.x,
                y: self.y,
            },
        };
        config.geometry = geometry.or_pointer(pointer);
        config.categories = parse_categories(&self.categories);
        config.default_category = self.default_category.clone();
        config.close_on_unfocus = self.close_on_unfocus;
        if !self.apps_dirs.is_empty() {
            config.app_dirs = self.apps_dirs.clone();
        }
        if let Some(cache) = &self.cache {
            config.cache_path = cache.clone();
        }
        config.icon_size = self.icon_size;
        config.icon_theme = self.icon_theme.clone();
        config.include_hidden = self.include_hidden;

        config
    }
}

fn main() {
    let cli = Cli::parse();

    let min_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    logging::init(&FuzzMenuLogger::default_path(), min_level);
    logging::info("MAIN", &format!("FuzzMenu {} starting up", fuzzmenu::VERSION));

    let windowed = cli.command.is_none() && !cli.tui;
    let config = cli.launcher_config(|| {
        if windowed {
            fuzzmenu::gui::pointer_position()
        } else {
            None
        }
    });
    logging::debug("MAIN", &format!("{:?}", config));

    let result = match cli.command {
        None if cli.tui => fuzzmenu::tui::run(config),
        None => fuzzmenu::gui::run(config),
        Some(Commands::List { category, json }) => cmd_list(config, &category, json),
        Some(Commands::Search { query, json }) => cmd_search(config, &query, json),
        Some(Commands::Launch { filename }) => cmd_launch(config, &filename),
        Some(Commands::Favorite { filename }) => cmd_favorite(config, &filename),
        Some(Commands::Rescan) => cmd_rescan(config),
        Some(Commands::Flush) => cmd_flush(config),
        Some(Commands::Categories { json }) => cmd_categories(config, json),
    };

    logging::flush();

    if let Err(e) = result {
        logging::error("MAIN", &e.to_string());
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Open a session, with a spinner while a first scan runs
fn open_session(config: LauncherConfig) -> Session {
    let pb = spinner(if config.cache_path.exists() {
        "Loading registry..."
    } else {
        "Scanning applications..."
    });
    let session = Session::open(config);
    pb.finish_and_clear();

    if let RegistrySource::Scan(stats) = session.source() {
        print_scan_stats("Scanned", &stats);
    }
    session
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn print_scan_stats(what: &str, stats: &ScanStats) {
    eprintln!(
        "{} {} {} applications in {}",
        style("✓").green().bold(),
        what,
        style(stats.applications).cyan(),
        style(HumanDuration(stats.elapsed)).cyan()
    );
    if stats.skipped > 0 || stats.warnings > 0 {
        eprintln!(
            "  {} skipped, {} warnings (see {})",
            style(stats.skipped).yellow(),
            style(stats.warnings).yellow(),
            logging::log_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "log".to_string())
        );
    }
}

fn print_apps<'a>(apps: impl Iterator<Item = &'a Application>, json: bool) -> fuzzmenu::Result<()> {
    let apps: Vec<&Application> = apps.collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&apps)?);
        return Ok(());
    }

    for app in &apps {
        let star = if app.favorite { "★" } else { " " };
        println!(
            "{} {:<32} {}",
            style(star).yellow(),
            style(&app.name).bold(),
            style(&app.filename).dim()
        );
    }
    println!();
    println!("{} applications", style(apps.len()).green());
    Ok(())
}

/// List command implementation
fn cmd_list(config: LauncherConfig, category: &str, json: bool) -> fuzzmenu::Result<()> {
    let mut session = open_session(config);
    session.open_category(category);
    print_apps(session.current_apps(), json)
}

/// Search command implementation
fn cmd_search(config: LauncherConfig, query: &str, json: bool) -> fuzzmenu::Result<()> {
    let mut session = open_session(config);
    session.search(query);
    print_apps(session.current_apps(), json)
}

/// Launch command implementation
fn cmd_launch(config: LauncherConfig, filename: &str) -> fuzzmenu::Result<()> {
    let session = open_session(config);
    session.launch_filename(filename)?;
    println!(
        "{} Launched {}",
        style("→").cyan().bold(),
        style(filename).yellow()
    );
    Ok(())
}

/// Favorite command implementation
fn cmd_favorite(config: LauncherConfig, filename: &str) -> fuzzmenu::Result<()> {
    let mut session = open_session(config);
    let favorite = session.toggle_favorite_by_filename(filename)?;
    println!(
        "{} {} {}",
        style("✓").green().bold(),
        style(filename).yellow(),
        if favorite {
            "added to favorites"
        } else {
            "removed from favorites"
        }
    );
    Ok(())
}

/// Rescan command implementation
fn cmd_rescan(config: LauncherConfig) -> fuzzmenu::Result<()> {
    let mut session = open_session(config);
    if matches!(session.source(), RegistrySource::Scan(_)) {
        return Ok(());
    }
    let pb = spinner("Rescanning applications...");
    let stats = session.reload();
    pb.finish_and_clear();
    print_scan_stats("Rescanned", &stats);
    Ok(())
}

/// Flush command implementation
fn cmd_flush(config: LauncherConfig) -> fuzzmenu::Result<()> {
    let mut session = open_session(config);
    let favorites = session.registry().favorite_count();
    let pb = spinner("Rebuilding registry...");
    let stats = session.flush();
    pb.finish_and_clear();
    print_scan_stats("Rebuilt", &stats);
    if favorites > 0 {
        println!("  {} favorites cleared", style(favorites).red());
    }
    Ok(())
}

/// Categories command implementation
fn cmd_categories(config: LauncherConfig, json: bool) -> fuzzmenu::Result<()> {
    let mut session = open_session(config);
    let keys: Vec<String> = session
        .category_entries()
        .iter()
        .filter_map(CategoryEntry::key)
        .map(String::from)
        .collect();

    let mut counts = Vec::with_capacity(keys.len());
    for key in &keys {
        session.open_category(key);
        counts.push(session.view_len());
    }

    if json {
        let rows: Vec<serde_json::Value> = keys
            .iter()
            .zip(&counts)
            .map(|(key, count)| serde_json::json!({ "key": key, "applications": count }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for entry in session.category_entries() {
        match entry {
            CategoryEntry::Spacer => println!(),
            CategoryEntry::Bucket { key } => {
                let count = keys
                    .iter()
                    .position(|k| k == key)
                    .map(|i| counts[i])
                    .unwrap_or(0);
                println!("  {:<32} {}", style(key).bold(), style(count).cyan());
            }
        }
    }
    Ok(())
}
