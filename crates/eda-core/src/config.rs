//! Injected configuration tables.
//!
//! Both the publisher alias table and the market-event calendar ship with
//! built-in defaults but are supplied to the analyses as explicit values,
//! so callers can extend them from JSON files without code changes.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EdaError, Result};

// ── AliasTable ────────────────────────────────────────────────────────────────

/// Maps lowercased publisher display names to canonical domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let mut aliases = HashMap::new();
        for (name, domain) in [
            ("benzinga", "benzinga.com"),
            ("benzinga insights", "benzinga.com"),
            ("benzinga newsdesk", "benzinga.com"),
            ("reuters", "reuters.com"),
            ("marketwatch", "marketwatch.com"),
            ("zacks", "zacks.com"),
            ("zacks investment research", "zacks.com"),
            ("seeking alpha", "seekingalpha.com"),
            ("the motley fool", "fool.com"),
            ("motley fool", "fool.com"),
            ("gurufocus", "gurufocus.com"),
            ("investopedia", "investopedia.com"),
        ] {
            aliases.insert(name.to_string(), domain.to_string());
        }
        Self { aliases }
    }
}

impl AliasTable {
    /// Look up a canonical domain for an already lowercased, trimmed name.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Load extra aliases from a JSON object (`{"name": "domain", ...}`) and
    /// merge them over the built-in defaults; file entries win on conflict.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| EdaError::FileNotFound(path.to_path_buf()))?;
        let extra: HashMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| EdaError::Config(format!("invalid alias file {}: {}", path.display(), e)))?;

        let mut table = Self::default();
        for (name, domain) in extra {
            table
                .aliases
                .insert(name.trim().to_lowercase(), domain.trim().to_lowercase());
        }
        Ok(table)
    }

    /// Built-in defaults, or defaults merged with `path` when one is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Ok(Self::default()),
        }
    }
}

// ── EventCalendar ─────────────────────────────────────────────────────────────

/// Named market-event dates used by the time-series volume analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCalendar {
    events: BTreeMap<NaiveDate, String>,
}

impl Default for EventCalendar {
    fn default() -> Self {
        // Key 2020-2021 macro events.
        let mut events = BTreeMap::new();
        for (date, label) in [
            ("2020-03-23", "Fed $2T Stimulus Announcement"),
            ("2020-06-10", "Fed Holds Rates, QE Extended"),
            ("2020-08-27", "Powell: Avg Inflation Targeting"),
            ("2020-11-09", "Pfizer Vaccine Efficacy (90%)"),
            ("2021-01-27", "Fed Meeting (Post-GameStop Volatility)"),
            ("2021-03-17", "Fed Raises Dot Plot, Yields Spike"),
        ] {
            if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
                events.insert(d, label.to_string());
            }
        }
        Self { events }
    }
}

impl EventCalendar {
    /// Calendar with no events.
    pub fn empty() -> Self {
        Self {
            events: BTreeMap::new(),
        }
    }

    /// Add one event; replaces any existing label for the date.
    pub fn insert(&mut self, date: NaiveDate, label: impl Into<String>) {
        self.events.insert(date, label.into());
    }

    /// Events in date order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &str)> {
        self.events.iter().map(|(d, l)| (d, l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Replace the calendar with events from a JSON object
    /// (`{"YYYY-MM-DD": "label", ...}`).
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| EdaError::FileNotFound(path.to_path_buf()))?;
        let raw: BTreeMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| EdaError::Config(format!("invalid event file {}: {}", path.display(), e)))?;

        let mut events = BTreeMap::new();
        for (date_str, label) in raw {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|_| EdaError::Config(format!("invalid event date: {}", date_str)))?;
            events.insert(date, label);
        }
        Ok(Self { events })
    }

    /// Built-in defaults, or the file contents when a path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => Ok(Self::default()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_json(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    // ── AliasTable ────────────────────────────────────────────────────────────

    #[test]
    fn test_alias_table_default_resolves_benzinga() {
        let table = AliasTable::default();
        assert_eq!(table.resolve("benzinga insights"), Some("benzinga.com"));
    }

    #[test]
    fn test_alias_table_unknown_name_is_none() {
        let table = AliasTable::default();
        assert_eq!(table.resolve("random blog"), None);
    }

    #[test]
    fn test_alias_table_load_merges_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_json(
            dir.path(),
            "aliases.json",
            r#"{"My Wire": "mywire.com", "benzinga": "override.com"}"#,
        );

        let table = AliasTable::load_from(&path).unwrap();
        // New entry lowercased on load.
        assert_eq!(table.resolve("my wire"), Some("mywire.com"));
        // File entry wins over the built-in.
        assert_eq!(table.resolve("benzinga"), Some("override.com"));
        // Untouched defaults survive.
        assert_eq!(table.resolve("reuters"), Some("reuters.com"));
    }

    #[test]
    fn test_alias_table_missing_file_errors() {
        let err = AliasTable::load_from(Path::new("/nope/aliases.json")).unwrap_err();
        assert!(matches!(err, EdaError::FileNotFound(_)));
    }

    #[test]
    fn test_alias_table_invalid_json_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_json(dir.path(), "aliases.json", "{broken");
        let err = AliasTable::load_from(&path).unwrap_err();
        assert!(matches!(err, EdaError::Config(_)));
    }

    // ── EventCalendar ─────────────────────────────────────────────────────────

    #[test]
    fn test_event_calendar_default_has_known_events() {
        let cal = EventCalendar::default();
        assert_eq!(cal.len(), 6);
        let first = cal.iter().next().unwrap();
        assert_eq!(*first.0, NaiveDate::from_ymd_opt(2020, 3, 23).unwrap());
    }

    #[test]
    fn test_event_calendar_load_replaces_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_json(
            dir.path(),
            "events.json",
            r#"{"2022-05-04": "Fed 50bp Hike"}"#,
        );

        let cal = EventCalendar::load_from(&path).unwrap();
        assert_eq!(cal.len(), 1);
        let (date, label) = cal.iter().next().unwrap();
        assert_eq!(*date, NaiveDate::from_ymd_opt(2022, 5, 4).unwrap());
        assert_eq!(label, "Fed 50bp Hike");
    }

    #[test]
    fn test_event_calendar_bad_date_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = write_json(dir.path(), "events.json", r#"{"05/04/2022": "x"}"#);
        let err = EventCalendar::load_from(&path).unwrap_err();
        assert!(matches!(err, EdaError::Config(_)));
    }
}
