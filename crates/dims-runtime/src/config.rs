#![forbid(unsafe_code)]

//! Configuration as data for breakpoint tables and trackers.
//!
//! Captures the threshold table and the tracker options as a single
//! [`DimsConfig`] loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # dims.toml
//! [table]
//! sizes = ["phone", "tablet", "desktop"]
//! widths = [0, 600, 1024]
//!
//! [tracker]
//! breakpoints = ["tablet", "desktop"]
//! watch_window_size = true
//! ```
//!
//! ```rust,ignore
//! let config = DimsConfig::from_toml_file("dims.toml")?;
//! let (context, tracker_config) = config.into_parts()?;
//! ```
//!
//! # Defaults
//!
//! Missing sections fall back to the standard six-tier table and a tracker
//! with no allow-list that only follows the tier.

use std::fmt;
use std::path::Path;

use dims_core::{Breakpoint, DEFAULT_WIDTHS, TableError, ThresholdTable};
use serde::{Deserialize, Serialize};

use crate::context::BreakpointContext;
use crate::tracker::TrackerConfig;

// ---------------------------------------------------------------------------
// Top-level DimsConfig
// ---------------------------------------------------------------------------

/// Table plus tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DimsConfig {
    /// Canonical label order and thresholds.
    pub table: TableConfig,
    /// Tracker options.
    pub tracker: TrackerConfig,
}

/// Unvalidated threshold table, as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Labels, smallest first.
    pub sizes: Vec<Breakpoint>,
    /// Minimum width of each label.
    pub widths: Vec<u32>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sizes: Breakpoint::STANDARD.to_vec(),
            widths: DEFAULT_WIDTHS.to_vec(),
        }
    }
}

impl TableConfig {
    /// Build the validated table.
    pub fn to_table(&self) -> Result<ThresholdTable, TableError> {
        ThresholdTable::new(self.sizes.iter().cloned(), self.widths.iter().copied())
    }
}

impl DimsConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid. An allow-list naming labels the table does not have is
    /// legal and not reported here.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(err) = self.table.to_table() {
            errors.push(format!("table: {err}"));
        }

        errors
    }

    /// Whether the allow-list is non-empty yet admits no tier of the table.
    ///
    /// Such a tracker never leaves its initial tier.
    #[must_use]
    pub fn allow_list_is_disjoint(&self) -> bool {
        match &self.tracker.breakpoints {
            Some(list) => {
                !list.is_empty() && !list.iter().any(|bp| self.table.sizes.contains(bp))
            }
            None => false,
        }
    }

    /// Validate and split into a shared context and the tracker options.
    pub fn into_parts(self) -> Result<(BreakpointContext, TrackerConfig), ConfigError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        if self.allow_list_is_disjoint() {
            tracing::warn!(
                breakpoints = ?self.tracker.breakpoints,
                "tracker.breakpoints shares no label with table.sizes; tier is frozen"
            );
        }
        let table = self.table.to_table().map_err(ConfigError::Table)?;
        tracing::debug!(%table, "configuration loaded");
        Ok((BreakpointContext::new(table), self.tracker))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading or validating a [`DimsConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// The threshold table is malformed.
    Table(TableError),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Table(e) => write!(f, "invalid table: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Table(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl From<TableError> for ConfigError {
    fn from(err: TableError) -> Self {
        Self::Table(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_validates_clean() {
        assert!(DimsConfig::default().validate().is_empty());
    }

    #[test]
    fn default_table_matches_threshold_table_default() {
        let table = DimsConfig::default().table.to_table().unwrap();
        assert_eq!(table, ThresholdTable::default());
    }

    #[test]
    fn toml_custom_table_and_allow_list() {
        let config = DimsConfig::from_toml_str(
            r#"
            [table]
            sizes = ["phone", "tablet", "desktop"]
            widths = [0, 600, 1024]

            [tracker]
            breakpoints = ["tablet", "desktop"]
            watch_window_size = true
            "#,
        )
        .unwrap();

        assert_eq!(config.table.sizes.len(), 3);
        assert!(config.tracker.watch_window_size);
        let (ctx, tracker) = config.into_parts().unwrap();
        assert_eq!(ctx.with_table(|t| t.resolve(700).clone()).as_str(), "tablet");
        assert_eq!(
            tracker.breakpoints,
            Some(vec![Breakpoint::new("tablet"), Breakpoint::new("desktop")])
        );
    }

    #[test]
    fn partial_override_preserves_defaults() {
        let config = DimsConfig::from_toml_str("[tracker]\nwatch_window_size = true\n").unwrap();
        assert_eq!(config.table, TableConfig::default());
        assert!(config.tracker.watch_window_size);
        assert_eq!(config.tracker.breakpoints, None);
    }

    #[test]
    fn json_loading() {
        let config = DimsConfig::from_json_str(
            r#"{"table":{"sizes":["s","l"],"widths":[0,900]},"tracker":{"breakpoints":[]}}"#,
        )
        .unwrap();
        assert_eq!(config.tracker.breakpoints, Some(Vec::new()));
        assert!(!config.tracker.watch_window_size);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_catches_bad_table() {
        let mut config = DimsConfig::default();
        config.table.widths = vec![0, 10];
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("table:"));
    }

    #[test]
    fn disjoint_allow_list_is_legal() {
        let config = DimsConfig::from_toml_str(
            r#"
            [table]
            sizes = ["phone", "desktop"]
            widths = [0, 1024]

            [tracker]
            breakpoints = ["xs", "sm"]
            "#,
        )
        .unwrap();
        assert!(config.validate().is_empty());
        assert!(config.allow_list_is_disjoint());

        let (ctx, tracker) = config.into_parts().unwrap();
        assert_eq!(ctx.with_table(|t| t.len()), 2);
        assert!(!tracker.allows(&Breakpoint::new("phone")));
    }

    #[test]
    fn partially_known_allow_list_is_valid() {
        let config = DimsConfig {
            tracker: TrackerConfig::default()
                .with_breakpoints([Breakpoint::new("tablet"), Breakpoint::MD]),
            ..DimsConfig::default()
        };
        assert!(config.validate().is_empty());
        assert!(!config.allow_list_is_disjoint());
    }

    #[test]
    fn empty_allow_list_is_not_disjoint() {
        let config = DimsConfig {
            tracker: TrackerConfig::default().with_breakpoints([]),
            ..DimsConfig::default()
        };
        assert!(!config.allow_list_is_disjoint());
    }

    #[test]
    fn into_parts_reports_validation() {
        let mut config = DimsConfig::default();
        config.table.sizes.clear();
        config.table.widths.clear();
        let err = config.into_parts().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
        assert!(err.to_string().contains("no tiers"));
        assert!(!err.to_string().contains("tracker.breakpoints"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DimsConfig::from_toml_str("[table\nsizes = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn loads_from_files() {
        let mut toml_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(toml_file, "[tracker]\nbreakpoints = [\"xs\", \"sm\"]").unwrap();
        let config = DimsConfig::from_toml_file(toml_file.path()).unwrap();
        assert_eq!(
            config.tracker.breakpoints,
            Some(vec![Breakpoint::XS, Breakpoint::SM])
        );

        let mut json_file = tempfile::NamedTempFile::new().unwrap();
        write!(json_file, "{{\"tracker\":{{\"watch_window_size\":true}}}}").unwrap();
        let config = DimsConfig::from_json_file(json_file.path()).unwrap();
        assert!(config.tracker.watch_window_size);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DimsConfig::from_toml_file("/definitely/not/here/dims.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
