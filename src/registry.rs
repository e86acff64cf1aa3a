//! Application registry
//!
//! The ordered, in-memory list of launchable applications. Order is the
//! scanner's display-name order and every view preserves it.

use crate::desktop_entry::DesktopEntry;
use crate::error::{FuzzMenuError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One launchable application, built from one descriptor file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Descriptor file name, unique across the registry
    pub filename: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub exec: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub icon_path: Option<PathBuf>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub favorite: bool,
}

impl Application {
    pub fn from_entry(filename: &str, entry: DesktopEntry, icon_path: Option<PathBuf>) -> Self {
        Self {
            filename: filename.to_string(),
            name: entry.name,
            categories: entry.categories,
            exec: entry.exec,
            icon: entry.icon,
            icon_path,
            comment: entry.comment,
            favorite: false,
        }
    }

    pub fn has_category(&self, tag: &str) -> bool {
        self.categories.iter().any(|c| c == tag)
    }
}

/// Ordered collection of applications
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    apps: Vec<Application>,
}

impl Registry {
    pub fn new(apps: Vec<Application>) -> Self {
        Self { apps }
    }

    pub fn apps(&self) -> &[Application] {
        &self.apps
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Application> {
        self.apps.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Application> {
        self.apps.iter()
    }

    /// Index of the application with this descriptor file name
    pub fn position(&self, filename: &str) -> Option<usize> {
        self.apps.iter().position(|a| a.filename == filename)
    }

    pub fn find(&self, filename: &str) -> Option<&Application> {
        self.apps.iter().find(|a| a.filename == filename)
    }

    pub fn favorite_count(&self) -> usize {
        self.apps.iter().filter(|a| a.favorite).count()
    }

    /// Flip the favorite flag of one application; returns the new value
    pub fn toggle_favorite(&mut self, filename: &str) -> Result<bool> {
        let app = self
            .apps
            .iter_mut()
            .find(|a| a.filename == filename)
            .ok_or_else(|| FuzzMenuError::UnknownApplication(filename.to_string()))?;
        app.favorite = !app.favorite;
        Ok(app.favorite)
    }

    /// Carry favorite flags over from a previous registry by filename.
    /// Applications unknown to `previous` keep their current flag.
    pub fn merge_favorites(&mut self, previous: &Registry) {
        let flags: HashMap<&str, bool> = previous
            .apps
            .iter()
            .map(|a| (a.filename.as_str(), a.favorite))
            .collect();

        for app in &mut self.apps {
            if let Some(&favorite) = flags.get(app.filename.as_str()) {
                app.favorite = favorite;
            }
        }
    }

    /// Stable, case-sensitive ordinal sort by display name
    pub fn sort_by_name(&mut self) {
        self.apps.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

impl FromIterator<Application> for Registry {
    fn from_iter<I: IntoIterator<Item = Application>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Application;
    type IntoIter = std::slice::Iter<'a, Application>;

    fn into_iter(self) -> Self::IntoIter {
        self.apps.iter()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn app(filename: &str, name: &str, categories: &[&str], favorite: bool) -> Application {
        Application {
            filename: filename.to_string(),
            name: name.to_string(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            exec: name.to_lowercase(),
            icon: String::new(),
            icon_path: None,
            comment: String::new(),
            favorite,
        }
    }

    #[test]
    fn toggle_flips_only_one_entry() {
        let mut reg = Registry::new(vec![
            app("a.desktop", "A", &[], false),
            app("b.desktop", "B", &[], true),
        ]);
        assert_eq!(reg.toggle_favorite("a.desktop").unwrap(), true);
        assert!(reg.find("a.desktop").unwrap().favorite);
        assert!(reg.find("b.desktop").unwrap().favorite);

        assert_eq!(reg.toggle_favorite("b.desktop").unwrap(), false);
        assert_eq!(reg.favorite_count(), 1);
    }

    #[test]
    fn toggle_unknown_is_an_error() {
        let mut reg = Registry::default();
        assert!(matches!(
            reg.toggle_favorite("nope.desktop"),
            Err(FuzzMenuError::UnknownApplication(_))
        ));
    }

    #[test]
    fn merge_keeps_flags_by_filename() {
        let previous = Registry::new(vec![
            app("kept.desktop", "Kept", &[], true),
            app("gone.desktop", "Gone", &[], true),
        ]);
        let mut fresh = Registry::new(vec![
            app("kept.desktop", "Kept", &[], false),
            app("new.desktop", "New", &[], false),
        ]);
        fresh.merge_favorites(&previous);

        assert!(fresh.find("kept.desktop").unwrap().favorite);
        assert!(!fresh.find("new.desktop").unwrap().favorite);
        assert!(fresh.find("gone.desktop").is_none());
    }

    #[test]
    fn sort_is_case_sensitive_and_stable() {
        let mut reg = Registry::new(vec![
            app("1.desktop", "beta", &[], false),
            app("2.desktop", "Alpha", &[], false),
            app("3.desktop", "Zed", &[], false),
            app("4.desktop", "Alpha", &[], false),
        ]);
        reg.sort_by_name();
        let order: Vec<_> = reg.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(order, vec!["2.desktop", "4.desktop", "3.desktop", "1.desktop"]);
    }

    #[test]
    fn serializes_as_plain_list() {
        let reg = Registry::new(vec![app("a.desktop", "A", &["Utility"], true)]);
        let json = serde_json::to_value(&reg).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["filename"], "a.desktop");
        assert_eq!(json[0]["iconPath"], serde_json::Value::Null);
        assert_eq!(json[0]["favorite"], true);
    }

    #[test]
    fn old_records_without_new_fields_load() {
        let json = r#"[{"filename": "x.desktop", "name": "X", "unknownField": 1}]"#;
        let reg: Registry = serde_json::from_str(json).unwrap();
        let x = reg.find("x.desktop").unwrap();
        assert_eq!(x.name, "X");
        assert!(x.categories.is_empty());
        assert!(!x.favorite);
    }
}
