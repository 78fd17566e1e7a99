//! Site configuration from site.toml
//!
//! Display-name tables and UI labels are immutable configuration loaded
//! once at process start, never reconstructed per request. The levels
//! table must cover every `LevelId` variant; an incomplete table is a
//! configuration error surfaced at load time, not at render time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::guide::LevelId;

/// Site-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Display names per reader level, keyed by the lowercase level id
    pub levels: BTreeMap<String, String>,

    /// Display names per category; an open key set, categories missing
    /// here degrade to their raw id at read time
    pub categories: BTreeMap<String, String>,

    /// UI labels
    #[serde(default)]
    pub labels: Labels,
}

/// Localizable UI labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Labels {
    /// Title of the implicit section before the first heading
    #[serde(default = "default_intro_title")]
    pub intro_title: String,
}

fn default_intro_title() -> String {
    "소개".to_string()
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            intro_title: default_intro_title(),
        }
    }
}

impl Default for SiteConfig {
    /// Stock configuration so the tool works without a site.toml
    fn default() -> Self {
        let levels = [
            ("beginner", "초급자"),
            ("intermediate", "중급자"),
            ("advanced", "고급자"),
        ];
        let categories = [
            ("exterior", "외관 튜닝"),
            ("interior", "내부 튜닝"),
            ("performance", "성능 튜닝"),
            ("audio", "오디오 튜닝"),
            ("lighting", "조명 튜닝"),
        ];

        Self {
            levels: levels
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            categories: categories
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            labels: Labels::default(),
        }
    }
}

impl SiteConfig {
    /// Load and validate configuration from a site.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the site.toml configuration file
    ///
    /// # Returns
    /// * `Ok(SiteConfig)` - Loaded configuration with a complete levels table
    /// * `Err(SiteConfigError)` - Read, parse or validation error
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SiteConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SiteConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: SiteConfig =
            toml::from_str(&content).map_err(|source| SiteConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Check that the levels table covers every level variant
    pub fn validate(&self) -> Result<(), SiteConfigError> {
        for level in LevelId::ALL {
            if !self.levels.contains_key(level.as_str()) {
                return Err(SiteConfigError::MissingLevelName(level));
            }
        }
        Ok(())
    }

    /// Display name for a level; validation guarantees a hit, the raw id
    /// only shows for a config constructed without `load`
    pub fn level_name(&self, level: LevelId) -> &str {
        self.levels
            .get(level.as_str())
            .map(String::as_str)
            .unwrap_or_else(|| level.as_str())
    }

    /// Display name for a category, if configured
    pub fn category_name(&self, category_id: &str) -> Option<&str> {
        self.categories.get(category_id).map(String::as_str)
    }
}

/// Errors that can occur when loading site configuration
#[derive(Error, Debug)]
pub enum SiteConfigError {
    #[error("failed to read {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}", path = .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no display name configured for level `{0}`")]
    MissingLevelName(LevelId),
}
