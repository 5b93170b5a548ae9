use crate::pileup::{DecodeOptions, PHRED_OFFSET};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_quality_offset")]
    pub quality_offset: u8,
    #[serde(default)]
    pub placeholder_quality: u8,
    /// Passed to `samtools mpileup -Q`.
    #[serde(default = "default_min_qual")]
    pub min_qual: u8,
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default = "default_samtools")]
    pub samtools: String,
}

fn default_quality_offset() -> u8 {
    PHRED_OFFSET
}

fn default_min_qual() -> u8 {
    25
}

fn default_max_depth() -> u32 {
    100_000
}

fn default_samtools() -> String {
    "samtools".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality_offset: default_quality_offset(),
            placeholder_quality: 0,
            min_qual: default_min_qual(),
            max_depth: default_max_depth(),
            samtools: default_samtools(),
        }
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("com", "refpos-stats", "refpos-stats")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the user config, falling back to defaults when it is missing or broken.
    pub fn load() -> Self {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                warn!("ignoring config {}: {:#}", path.display(), e);
                Config::default()
            }),
            _ => Config::default(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            quality_offset: self.quality_offset,
            placeholder_quality: self.placeholder_quality,
        }
    }
}
