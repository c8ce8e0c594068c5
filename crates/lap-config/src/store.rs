use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::defaults::DEFAULT_SETTINGS;
use crate::error::ConfigError;

/// Sectioned key-value store that keeps every line of the source file
///
/// Section and key lookups are case-insensitive. Updating a key rewrites only
/// that key's line; comments, blank lines, unknown keys and section order are
/// written back exactly as they were read.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: Option<PathBuf>,
    lines: Vec<String>,
    values: HashMap<String, HashMap<String, String>>,
    trailing_newline: bool,
}

enum Line<'a> {
    Blank,
    Comment,
    Section(&'a str),
    Entry(&'a str, &'a str),
    Invalid,
}

fn classify(line: &str) -> Line<'_> {
    let stripped = line.trim();
    if stripped.is_empty() {
        Line::Blank
    } else if stripped.starts_with('#') || stripped.starts_with(';') {
        Line::Comment
    } else if stripped.starts_with('[') && stripped.ends_with(']') {
        Line::Section(stripped[1..stripped.len() - 1].trim())
    } else if let Some((key, value)) = stripped.split_once('=') {
        Line::Entry(key.trim(), value.trim())
    } else {
        Line::Invalid
    }
}

impl SettingsStore {
    /// Parse settings text
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut values: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut section: Option<String> = None;

        for (idx, line) in text.lines().enumerate() {
            match classify(line) {
                Line::Blank | Line::Comment => {}
                Line::Section(name) => {
                    let name = name.to_uppercase();
                    values.entry(name.clone()).or_default();
                    section = Some(name);
                }
                Line::Entry(key, value) => {
                    let Some(section) = &section else {
                        return Err(ConfigError::Parse {
                            line: idx + 1,
                            reason: format!("key '{key}' appears before any [SECTION] header"),
                        });
                    };
                    values
                        .entry(section.clone())
                        .or_default()
                        .insert(key.to_uppercase(), value.to_string());
                }
                Line::Invalid => {
                    return Err(ConfigError::Parse {
                        line: idx + 1,
                        reason: format!("expected 'KEY = value', found '{}'", line.trim()),
                    });
                }
            }
        }

        Ok(Self {
            path: None,
            lines: text.lines().map(str::to_string).collect(),
            values,
            trailing_newline: text.is_empty() || text.ends_with('\n'),
        })
    }

    /// Load settings from `path`, creating the commented default file if it does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let text = if path.exists() {
            fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            tracing::warn!("Settings file {} not found, creating defaults", path.display());
            write_file(path, DEFAULT_SETTINGS)?;
            DEFAULT_SETTINGS.to_string()
        };

        let mut store = Self::parse(&text)?;
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    /// The default settings, not bound to any file
    pub fn defaults() -> Self {
        Self::parse(DEFAULT_SETTINGS).unwrap_or_else(|_| Self::empty())
    }

    fn empty() -> Self {
        Self {
            path: None,
            lines: Vec::new(),
            values: HashMap::new(),
            trailing_newline: true,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_str(&self, section: &str, key: &str) -> Option<&str> {
        self.values
            .get(&section.to_uppercase())
            .and_then(|s| s.get(&key.to_uppercase()))
            .map(String::as_str)
    }

    /// Parse a value, falling back to `default` when it is missing or malformed
    pub fn get_or<T>(&self, section: &str, key: &str, default: T) -> T
    where
        T: FromStr,
    {
        match self.get_str(section, key) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid value '{raw}' for {section}.{key}, using default");
                default
            }),
            None => default,
        }
    }

    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.get_str(section, key) {
            Some(raw) => parse_bool(raw).unwrap_or_else(|| {
                tracing::warn!("Invalid boolean '{raw}' for {section}.{key}, using default");
                default
            }),
            None => default,
        }
    }

    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.get_str(section, key).unwrap_or(default).to_string()
    }

    /// Set a value and rewrite only the line holding it
    pub fn set(&mut self, section: &str, key: &str, value: impl Display) {
        let section = section.to_uppercase();
        let key = key.to_uppercase();
        let value = value.to_string();

        self.values
            .entry(section.clone())
            .or_default()
            .insert(key.clone(), value.clone());

        match self.find_entry(&section, &key) {
            Some(idx) => {
                let line = &self.lines[idx];
                let indent = &line[..line.len() - line.trim_start().len()];
                let written_key = match classify(line) {
                    Line::Entry(k, _) => k,
                    _ => key.as_str(),
                };
                let updated = format!("{indent}{written_key} = {value}");
                self.lines[idx] = updated;
            }
            None => self.append_key(&section, &key, &value),
        }
    }

    fn find_entry(&self, section: &str, key: &str) -> Option<usize> {
        let mut current: Option<String> = None;
        for (idx, line) in self.lines.iter().enumerate() {
            match classify(line) {
                Line::Section(name) => current = Some(name.to_uppercase()),
                Line::Entry(line_key, _)
                    if current.as_deref() == Some(section) && line_key.to_uppercase() == key =>
                {
                    return Some(idx);
                }
                _ => {}
            }
        }
        None
    }

    fn append_key(&mut self, section: &str, key: &str, value: &str) {
        let header = self
            .lines
            .iter()
            .position(|l| matches!(classify(l), Line::Section(name) if name.to_uppercase() == section));

        let entry = format!("{key} = {value}");
        match header {
            Some(start) => {
                let end = self.lines[start + 1..]
                    .iter()
                    .position(|l| matches!(classify(l), Line::Section(_)))
                    .map(|offset| start + 1 + offset)
                    .unwrap_or(self.lines.len());

                // Keep the new key above the blank lines that separate sections
                let mut insert_at = end;
                while insert_at > start + 1 && self.lines[insert_at - 1].trim().is_empty() {
                    insert_at -= 1;
                }
                self.lines.insert(insert_at, entry);
            }
            None => {
                if self.lines.last().is_some_and(|l| !l.trim().is_empty()) {
                    self.lines.push(String::new());
                }
                self.lines.push(format!("[{section}]"));
                self.lines.push(entry);
            }
        }
    }

    /// Render the store back to text
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Write back to the file this store was loaded from
    pub fn save(&self) -> Result<(), ConfigError> {
        match &self.path {
            Some(path) => write_file(path, &self.render()),
            None => Err(ConfigError::Unbound),
        }
    }

    pub fn save_to(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        write_file(path, &self.render())?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn write_file(path: &Path, text: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[DETECTION]
# row to scan
CHECK_ROW_PERCENTAGE = 74.17
  TOLERANCE = 10

[custom]
; kept as-is
something = else

[TIMING]
CHECK_INTERVAL = 1.0
";

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = SettingsStore::parse(SAMPLE).unwrap();
        assert_eq!(store.get_str("detection", "tolerance"), Some("10"));
        assert_eq!(store.get_str("CUSTOM", "SOMETHING"), Some("else"));
        assert_eq!(store.get_or("DETECTION", "CHECK_ROW_PERCENTAGE", 0.0), 74.17);
    }

    #[test]
    fn test_missing_or_malformed_values_fall_back() {
        let store = SettingsStore::parse("[DETECTION]\nTOLERANCE = lots\nFLAG = maybe\n").unwrap();
        assert_eq!(store.get_or("DETECTION", "TOLERANCE", 10i64), 10);
        assert_eq!(store.get_or("DETECTION", "MISSING", 50u32), 50);
        assert!(store.get_bool("DETECTION", "FLAG", true));
        assert!(!store.get_bool("NOPE", "FLAG", false));
    }

    #[test]
    fn test_set_rewrites_only_target_line() {
        let mut store = SettingsStore::parse(SAMPLE).unwrap();
        store.set("detection", "tolerance", 12);

        let expected = SAMPLE.replace("  TOLERANCE = 10", "  TOLERANCE = 12");
        assert_eq!(store.render(), expected);
        assert_eq!(store.get_str("DETECTION", "TOLERANCE"), Some("12"));
    }

    #[test]
    fn test_set_unknown_key_appends_to_section() {
        let mut store = SettingsStore::parse(SAMPLE).unwrap();
        store.set("DETECTION", "SEARCH_AREA_SIZE", 40);

        let rendered = store.render();
        let expected = SAMPLE.replace(
            "  TOLERANCE = 10\n",
            "  TOLERANCE = 10\nSEARCH_AREA_SIZE = 40\n",
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_set_unknown_section_appends_section() {
        let mut store = SettingsStore::parse(SAMPLE).unwrap();
        store.set("GUI", "DARK_MODE", true);

        assert!(store.render().ends_with("CHECK_INTERVAL = 1.0\n\n[GUI]\nDARK_MODE = true\n"));
        assert!(store.get_bool("GUI", "DARK_MODE", false));
    }

    #[test]
    fn test_key_outside_section_is_rejected() {
        let err = SettingsStore::parse("TOLERANCE = 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");

        let store = SettingsStore::load(&path).unwrap();
        assert!(path.exists());
        assert_eq!(store.get_str("DETECTION", "TARGET_COLOR_R"), Some("59"));
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_SETTINGS);
    }

    #[test]
    fn test_save_round_trips_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        fs::write(&path, SAMPLE).unwrap();

        let mut store = SettingsStore::load(&path).unwrap();
        store.set("TIMING", "CHECK_INTERVAL", 2.5);
        store.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("# row to scan"));
        assert!(text.contains("; kept as-is"));
        assert!(text.contains("CHECK_INTERVAL = 2.5"));
    }

    #[test]
    fn test_unbound_store_cannot_save() {
        let store = SettingsStore::defaults();
        assert!(matches!(store.save(), Err(ConfigError::Unbound)));
    }
}
