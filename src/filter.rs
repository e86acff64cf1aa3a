//! Category filter and search
//!
//! A view is either a category bucket or a free-text search; both produce an
//! ordered list of registry indices.

use crate::config::{ALL_APPLICATIONS, COMPOUND_SEPARATOR, FAVORITES};
use crate::registry::Registry;

/// What the application list currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// A configured bucket, possibly compound (`Multimedia:Audio:Video`)
    Category(String),
    /// Case-insensitive substring of the display name
    Search(String),
}

impl Filter {
    pub fn category(key: impl Into<String>) -> Self {
        Filter::Category(key.into())
    }

    pub fn search(query: impl Into<String>) -> Self {
        Filter::Search(query.into())
    }

    /// Registry indices matching this filter, in display order
    pub fn apply(&self, registry: &Registry) -> Vec<usize> {
        match self {
            Filter::Category(key) => filter_category(registry, key),
            Filter::Search(query) => search(registry, query),
        }
    }

    pub fn is_favorites(&self) -> bool {
        matches!(self, Filter::Category(key) if key == FAVORITES)
    }
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Category(ALL_APPLICATIONS.to_string())
    }
}

/// Registry indices in the bucket `key`.
///
/// Every sub-key of a compound key is matched on its own: an application
/// tagged with two of the sub-keys is listed twice, once per matching sub-key.
pub fn filter_category(registry: &Registry, key: &str) -> Vec<usize> {
    match key {
        ALL_APPLICATIONS => (0..registry.len()).collect(),
        FAVORITES => registry
            .iter()
            .enumerate()
            .filter(|(_, app)| app.favorite)
            .map(|(i, _)| i)
            .collect(),
        _ => {
            let wanted: Vec<&str> = key.split(COMPOUND_SEPARATOR).collect();
            let mut indices = Vec::new();
            for (i, app) in registry.iter().enumerate() {
                for tag in &wanted {
                    if app.has_category(tag) {
                        indices.push(i);
                    }
                }
            }
            indices
        }
    }
}

/// Registry indices whose name contains `query`, ignoring case.
/// Favorites come first; both groups keep registry order.
pub fn search(registry: &Registry, query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    let (favorites, others): (Vec<usize>, Vec<usize>) = registry
        .iter()
        .enumerate()
        .filter(|(_, app)| app.name.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .partition(|&i| registry.apps()[i].favorite);

    favorites.into_iter().chain(others).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::app;

    fn names(registry: &Registry, indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| registry.apps()[i].name.clone())
            .collect()
    }

    fn sample() -> Registry {
        Registry::new(vec![
            app("audacity.desktop", "Audacity", &["AudioVideo", "Audio"], false),
            app("firefox.desktop", "Firefox", &["Network", "WebBrowser"], false),
            app("discord.desktop", "Discord", &["Network", "Chat"], true),
            app("mpv.desktop", "mpv", &["AudioVideo", "Video", "Audio"], true),
            app("gimp.desktop", "GIMP", &["Graphics"], false),
        ])
    }

    #[test]
    fn all_applications_is_identity() {
        let reg = sample();
        assert_eq!(filter_category(&reg, ALL_APPLICATIONS), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn favorites_in_registry_order() {
        let reg = sample();
        assert_eq!(
            names(&reg, &filter_category(&reg, FAVORITES)),
            vec!["Discord", "mpv"]
        );
    }

    #[test]
    fn single_category() {
        let reg = sample();
        assert_eq!(
            names(&reg, &filter_category(&reg, "Network")),
            vec!["Firefox", "Discord"]
        );
        assert!(filter_category(&reg, "Office").is_empty());
    }

    #[test]
    fn compound_key_lists_each_matching_sub_key() {
        let reg = sample();
        // mpv carries both Audio and Video
        assert_eq!(
            names(&reg, &filter_category(&reg, "Multimedia:Audio:Video")),
            vec!["Audacity", "mpv", "mpv"]
        );
        assert_eq!(
            names(&reg, &filter_category(&reg, "Graphics:Chat")),
            vec!["Discord", "GIMP"]
        );
    }

    #[test]
    fn compound_rows_stay_grouped_by_application() {
        let reg = Registry::new(vec![
            app("vlc.desktop", "VLC", &["AudioVideo", "Audio", "Video"], false),
            app("gimp.desktop", "GIMP", &["Graphics"], false),
            app("cheese.desktop", "Cheese", &["Video"], false),
        ]);
        assert_eq!(filter_category(&reg, "Multimedia:Audio:Video"), vec![0, 0, 2]);
        // Sub-key order does not reorder applications
        assert_eq!(filter_category(&reg, "Video:Audio"), vec![0, 0, 2]);
        assert_eq!(filter_category(&reg, "Video:Video"), vec![0, 0, 2, 2]);
    }

    #[test]
    fn duplicate_registry_entries_are_not_collapsed() {
        let reg = Registry::new(vec![
            app("a.desktop", "A", &["Game"], false),
            app("a.desktop", "A", &["Game"], false),
        ]);
        assert_eq!(filter_category(&reg, "Game"), vec![0, 1]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let reg = sample();
        assert_eq!(names(&reg, &search(&reg, "fire")), vec!["Firefox"]);
        assert_eq!(names(&reg, &search(&reg, "GIM")), vec!["GIMP"]);
        assert!(search(&reg, "ffx").is_empty());
    }

    #[test]
    fn search_ranks_favorites_first() {
        let reg = sample();
        let hits = names(&reg, &search(&reg, "i"));
        assert_eq!(hits, vec!["Discord", "Audacity", "Firefox", "GIMP"]);
    }

    #[test]
    fn empty_search_matches_everything_favorites_first() {
        let reg = sample();
        assert_eq!(search(&reg, ""), vec![2, 3, 0, 1, 4]);
    }

    #[test]
    fn filter_dispatch() {
        let reg = sample();
        assert_eq!(Filter::default().apply(&reg).len(), 5);
        assert_eq!(Filter::search("MPV").apply(&reg), vec![3]);
        assert!(Filter::category(FAVORITES).is_favorites());
        assert!(!Filter::search(FAVORITES).is_favorites());
    }
}
