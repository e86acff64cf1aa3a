//! Desktop entry parser
//!
//! Reads the `[Desktop Entry]` group of a freedesktop descriptor file. The
//! parser never fails on content: bad lines are skipped and every missing
//! field is defaulted, and each such decision is reported as a
//! [`ParseWarning`] next to the parsed entry.

use crate::error::Result;
use std::fmt;
use std::path::Path;

/// The only group the launcher reads
pub const DESKTOP_ENTRY_GROUP: &str = "Desktop Entry";

/// `Type` value of launchable entries
pub const APPLICATION_TYPE: &str = "Application";

/// Fields the launcher consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Type,
    Name,
    Exec,
    Icon,
    Comment,
    Categories,
}

impl Field {
    pub fn key(&self) -> &'static str {
        match self {
            Field::Type => "Type",
            Field::Name => "Name",
            Field::Exec => "Exec",
            Field::Icon => "Icon",
            Field::Comment => "Comment",
            Field::Categories => "Categories",
        }
    }

    fn all() -> &'static [Field] {
        &[
            Field::Type,
            Field::Name,
            Field::Exec,
            Field::Icon,
            Field::Comment,
            Field::Categories,
        ]
    }
}

/// Something the parser skipped or filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A line that is neither a comment, a group header nor `key=value`
    MalformedLine { line: usize, text: String },
    /// The file has no `[Desktop Entry]` group
    MissingGroup,
    /// A key repeated inside the group; the later value replaces the earlier one
    DuplicateKey { line: usize, key: String },
    /// A field was absent and got its default
    Defaulted(Field),
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MalformedLine { line, text } => {
                write!(f, "line {}: malformed '{}'", line, text)
            }
            ParseWarning::MissingGroup => write!(f, "no [{}] group", DESKTOP_ENTRY_GROUP),
            ParseWarning::DuplicateKey { line, key } => {
                write!(f, "line {}: duplicate key '{}' overrides earlier value", line, key)
            }
            ParseWarning::Defaulted(field) => write!(f, "{} missing, defaulted", field.key()),
        }
    }
}

/// Fields of one `[Desktop Entry]` group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    pub entry_type: String,
    pub name: String,
    pub categories: Vec<String>,
    pub exec: String,
    pub icon: String,
    pub comment: String,
    pub no_display: bool,
    pub hidden: bool,
}

impl DesktopEntry {
    pub fn is_application(&self) -> bool {
        self.entry_type == APPLICATION_TYPE
    }

    /// Entries marked `NoDisplay` or `Hidden` are never listed
    pub fn is_listed(&self) -> bool {
        !self.no_display && !self.hidden
    }
}

/// Parse result: the entry plus everything that was defaulted or skipped
#[derive(Debug, Clone, Default)]
pub struct ParsedEntry {
    pub entry: DesktopEntry,
    pub warnings: Vec<ParseWarning>,
}

/// Read and parse a descriptor file. Invalid UTF-8 is replaced, not rejected.
pub fn parse_file(path: &Path) -> Result<ParsedEntry> {
    let bytes = std::fs::read(path)?;
    Ok(parse(&String::from_utf8_lossy(&bytes)))
}

/// Parse descriptor text
pub fn parse(text: &str) -> ParsedEntry {
    let mut entry = DesktopEntry::default();
    let mut warnings = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let mut in_group = false;
    let mut found_group = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            if line.ends_with(']') {
                let group = &line[1..line.len() - 1];
                // Only the first [Desktop Entry] group counts
                in_group = group == DESKTOP_ENTRY_GROUP && !found_group;
                found_group |= in_group;
            } else {
                warnings.push(ParseWarning::MalformedLine {
                    line: line_no,
                    text: line.to_string(),
                });
            }
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            warnings.push(ParseWarning::MalformedLine {
                line: line_no,
                text: line.to_string(),
            });
            continue;
        };

        if !in_group {
            if !found_group {
                warnings.push(ParseWarning::MalformedLine {
                    line: line_no,
                    text: line.to_string(),
                });
            }
            continue;
        }

        let key = key.trim();
        let value = unescape(value.trim());

        // Localized variants (Name[de]) are not used
        if key.contains('[') {
            continue;
        }

        if seen.iter().any(|k| k == key) {
            warnings.push(ParseWarning::DuplicateKey {
                line: line_no,
                key: key.to_string(),
            });
        } else {
            seen.push(key.to_string());
        }

        match key {
            "Type" => entry.entry_type = value,
            "Name" => entry.name = value,
            "Exec" => entry.exec = value,
            "Icon" => entry.icon = value,
            "Comment" => entry.comment = value,
            "Categories" => entry.categories = split_list(&value),
            "NoDisplay" => entry.no_display = parse_bool(&value),
            "Hidden" => entry.hidden = parse_bool(&value),
            _ => {}
        }
    }

    if !found_group {
        warnings.push(ParseWarning::MissingGroup);
    }

    for field in Field::all() {
        if !seen.iter().any(|k| k == field.key()) {
            warnings.push(ParseWarning::Defaulted(*field));
        }
    }

    ParsedEntry { entry, warnings }
}

/// Split a `;` separated list, dropping empty items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

/// Expand the string escapes `\s \n \t \r \\`
fn unescape(value: &str) -> String {
    if !value.contains('\\') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIREFOX: &str = "\
[Desktop Entry]
Version=1.0
Name=Firefox
Name[de]=Firefox Webbrowser
Comment=Browse the Web
Exec=firefox %u
Icon=firefox
Type=Application
Categories=Network;WebBrowser;

[Desktop Action new-window]
Name=New Window
Exec=firefox --new-window %u
";

    #[test]
    fn parses_complete_entry() {
        let parsed = parse(FIREFOX);
        let e = &parsed.entry;
        assert!(e.is_application());
        assert_eq!(e.name, "Firefox");
        assert_eq!(e.comment, "Browse the Web");
        assert_eq!(e.exec, "firefox %u");
        assert_eq!(e.icon, "firefox");
        assert_eq!(e.categories, vec!["Network", "WebBrowser"]);
        assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    }

    #[test]
    fn action_groups_do_not_override_main_group() {
        let parsed = parse(FIREFOX);
        assert_eq!(parsed.entry.name, "Firefox");
        assert_eq!(parsed.entry.exec, "firefox %u");
    }

    #[test]
    fn missing_fields_are_defaulted_with_warnings() {
        let parsed = parse("[Desktop Entry]\nType=Application\nName=Bare\n");
        assert_eq!(parsed.entry.exec, "");
        assert_eq!(parsed.entry.icon, "");
        assert!(parsed.entry.categories.is_empty());
        for field in [Field::Exec, Field::Icon, Field::Comment, Field::Categories] {
            assert!(parsed.warnings.contains(&ParseWarning::Defaulted(field)));
        }
        assert!(!parsed.warnings.contains(&ParseWarning::Defaulted(Field::Name)));
    }

    #[test]
    fn malformed_lines_are_reported_and_skipped() {
        let parsed = parse("[Desktop Entry]\nType=Application\nthis is junk\nName=Ok\n[broken\n");
        assert_eq!(parsed.entry.name, "Ok");
        let malformed = parsed
            .warnings
            .iter()
            .filter(|w| matches!(w, ParseWarning::MalformedLine { .. }))
            .count();
        assert_eq!(malformed, 2);
    }

    #[test]
    fn missing_group_yields_empty_entry() {
        let parsed = parse("Name=Orphan\n");
        assert!(parsed.warnings.contains(&ParseWarning::MissingGroup));
        assert_eq!(parsed.entry.name, "");
        assert!(!parsed.entry.is_application());
    }

    #[test]
    fn last_duplicate_wins() {
        let parsed = parse("[Desktop Entry]\nName=First\nName=Second\nExec=a\nName=Third\n");
        assert_eq!(parsed.entry.name, "Third");
        assert!(parsed
            .warnings
            .contains(&ParseWarning::DuplicateKey { line: 3, key: "Name".into() }));
        assert!(parsed
            .warnings
            .contains(&ParseWarning::DuplicateKey { line: 5, key: "Name".into() }));
        assert!(!parsed.warnings.contains(&ParseWarning::Defaulted(Field::Name)));
    }

    #[test]
    fn repeated_flag_uses_last_value() {
        let parsed = parse("[Desktop Entry]\nType=Application\nNoDisplay=true\nNoDisplay=false\n");
        assert!(parsed.entry.is_listed());
    }

    #[test]
    fn hidden_flags() {
        let parsed = parse("[Desktop Entry]\nType=Application\nNoDisplay=true\n");
        assert!(!parsed.entry.is_listed());
        let parsed = parse("[Desktop Entry]\nType=Application\nHidden=false\n");
        assert!(parsed.entry.is_listed());
    }

    #[test]
    fn escapes_are_expanded() {
        let parsed = parse("[Desktop Entry]\nComment=Line\\sone\\\\two\n");
        assert_eq!(parsed.entry.comment, "Line one\\two");
    }

    #[test]
    fn link_type_is_not_application() {
        let parsed = parse("[Desktop Entry]\nType=Link\nName=Docs\nURL=https://example.org\n");
        assert!(!parsed.entry.is_application());
    }
}
