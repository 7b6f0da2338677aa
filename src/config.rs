//! Configuration loading from TOML files and command-line overrides

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use crate::data::aggregate::DEFAULT_TOP_TITLES;
use crate::data::labels::Vocabulary;

/// Public salary dataset the dashboard reads by default.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/guilhermeonrails/data-jobs/refs/heads/main/salaries.csv";

const LOCAL_CONFIG: &str = "salary-dashboard.toml";

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to a configuration TOML file.
    #[arg(short, long, value_name = "CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Salary data location: an http(s) URL or a local .csv/.json/.parquet file.
    #[arg(short, long, value_name = "URL_OR_PATH")]
    pub source: Option<String>,

    /// Label language.
    #[arg(long, value_enum)]
    pub vocabulary: Option<Vocabulary>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub dashboard: DashboardConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub location: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub vocabulary: Vocabulary,
    /// How many job titles the top-paying ranking shows.
    pub top_titles: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            top_titles: DEFAULT_TOP_TITLES,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 860.0,
        }
    }
}

impl Config {
    /// Resolve the configuration for this run.
    ///
    /// Search order:
    /// 1. `--config <path>`
    /// 2. ./salary-dashboard.toml (current directory)
    /// 3. ~/.config/salary-dashboard/config.toml
    ///
    /// Falls back to defaults, then applies `--source` / `--vocabulary`.
    pub fn load(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::discover()?,
        };
        config.apply_args(args);
        Ok(config)
    }

    fn discover() -> Result<Self> {
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "salary-dashboard") {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_args(&mut self, args: &Args) {
        if let Some(source) = &args.source {
            self.source.location = source.clone();
        }
        if let Some(vocabulary) = args.vocabulary {
            self.dashboard.vocabulary = vocabulary;
        }
    }
}
