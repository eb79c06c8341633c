//! Analysis configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the user override in the data dir
//!    (~/.local/share/finsight/config/analysis.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Missing keys keep their defaults and unknown keys are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analysis.toml");

/// Ordering applied to the transaction snapshot before order-sensitive stages
///
/// The pattern trend slope and the "most recent 30 expenses" anomaly window
/// both read transactions positionally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    /// Keep the caller's order
    #[default]
    Input,
    /// Stable sort by transaction date
    Date,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Date => "date",
        }
    }
}

impl std::str::FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "input" => Ok(Self::Input),
            "date" => Ok(Self::Date),
            _ => Err(format!("Unknown order: {}. Available: input, date", s)),
        }
    }
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub order_by: OrderBy,
}

impl AnalysisConfig {
    /// Resolve config from the user override location or embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Resolve config from an explicit path, falling back to embedded defaults
    /// when the file does not exist
    pub fn from_path(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finsight").join("config").join("analysis.toml"))
}

fn load_config(override_path: Option<&Path>) -> Result<AnalysisConfig> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading analysis config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    analysis: Option<RawAnalysis>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    order_by: Option<String>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<AnalysisConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalysisConfig::default();

    if let Some(analysis) = raw.analysis {
        if let Some(order_by) = analysis.order_by {
            config.order_by = order_by.parse().map_err(Error::Config)?;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_default_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.order_by, OrderBy::Input);
    }

    #[test]
    fn test_parse_order_by_date() {
        let config = parse_config("[analysis]\norder_by = \"date\"\n").unwrap();
        assert_eq!(config.order_by, OrderBy::Date);
    }

    #[test]
    fn test_missing_section_keeps_defaults() {
        let config = parse_config("[other]\nkey = 1\n").unwrap();
        assert_eq!(config.order_by, OrderBy::Input);
    }

    #[test]
    fn test_invalid_order_by_is_config_error() {
        let err = parse_config("[analysis]\norder_by = \"random\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            parse_config("not = [valid"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_from_path_reads_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis]\norder_by = \"date\"").unwrap();

        let config = AnalysisConfig::from_path(file.path()).unwrap();
        assert_eq!(config.order_by, OrderBy::Date);
    }

    #[test]
    fn test_from_missing_path_uses_embedded_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.order_by, OrderBy::Input);
    }
}
