use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FaqError, Result};

pub const DEFAULT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_LOCATION: usize = 0;
pub const DEFAULT_DISTANCE: usize = 100;
pub const DEFAULT_MAX_PATTERN_CHUNK: usize = 32;
pub const DEFAULT_FEATURED_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum accepted fuzzy score; 0 requires an exact match, 1 accepts anything.
    pub threshold: f64,
    /// Where in a field a match is expected to start.
    pub location: usize,
    /// How far from `location` a match may drift before it costs a full point.
    pub distance: usize,
    pub max_pattern_chunk: usize,
    pub featured_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            location: DEFAULT_LOCATION,
            distance: DEFAULT_DISTANCE,
            max_pattern_chunk: DEFAULT_MAX_PATTERN_CHUNK,
            featured_limit: DEFAULT_FEATURED_LIMIT,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(FaqError::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.max_pattern_chunk == 0 {
            return Err(FaqError::InvalidConfig(
                "max_pattern_chunk must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_threshold(mut self, threshold: f64) -> Result<Self> {
        self.threshold = threshold;
        self.validate()?;
        Ok(self)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("faq").join("config.toml"))
    }

    /// Reads the per-user config file when present, defaults otherwise.
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}
