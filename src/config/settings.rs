//! Settings structures for the search composition layer

use crate::DEFAULT_PAGE_SIZE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Composition layer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default number of entries per provider page
    pub default_limit: u32,
    /// Provider IDs skipped at discovery time
    pub disabled_providers: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_SIZE,
            disabled_providers: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (UNIFIED_SEARCH_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("UNIFIED_SEARCH_DEFAULT_LIMIT") {
            if let Ok(limit) = val.parse() {
                self.default_limit = limit;
            }
        }
        if let Ok(val) = std::env::var("UNIFIED_SEARCH_DISABLED_PROVIDERS") {
            self.disabled_providers = val
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }
    }

    /// Load settings from the first file found in the default locations
    ///
    /// Falls back to defaults when no file exists; the environment always
    /// gets the last word.
    pub fn discover() -> Result<Self> {
        if let Ok(path) = std::env::var("UNIFIED_SEARCH_SETTINGS_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                let mut settings = Self::from_file(&path)?;
                settings.merge_env();
                return Ok(settings);
            }
        }

        let paths = [
            PathBuf::from("unified-search.yml"),
            PathBuf::from("config/unified-search.yml"),
            dirs::config_dir()
                .map(|p| p.join("unified-search-rs/settings.yml"))
                .unwrap_or_default(),
        ];

        for path in paths.iter() {
            if path.exists() {
                let mut settings = Self::from_file(path)?;
                settings.merge_env();
                return Ok(settings);
            }
        }

        let mut settings = Self::default();
        settings.merge_env();
        Ok(settings)
    }
}
