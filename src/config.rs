use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strand::catalog::BeadId;
use strand::presets::{Design, PresetError};
use strand::PatternConfig;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub design: Design,
    /// Replaces the preset focal cluster when set.
    pub custom_focal: Option<Vec<BeadId>>,
    pub jitter_seed: u64,
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            design: Design::default(),
            custom_focal: None,
            jitter_seed: 0,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn pattern(&self) -> Result<PatternConfig, ConfigError> {
        let mut pattern = self.design.pattern()?;
        if let Some(custom) = &self.custom_focal
            && !custom.is_empty()
        {
            pattern.focal = custom.clone();
        }
        Ok(pattern)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Design error: {0}")]
    Preset(#[from] PresetError),
    #[error("Failed to write config: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the design is read from: the user's config file, or a file named on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    User,
    Explicit(PathBuf),
}

impl ConfigSource {
    pub fn from_arg(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::Explicit(p.to_path_buf()),
            None => Self::User,
        }
    }

    pub fn path(&self) -> Result<PathBuf, ConfigError> {
        match self {
            Self::User => {
                let dirs = ProjectDirs::from("org", "strand", "bracelet")
                    .ok_or(ConfigError::ConfigDirNotFound)?;
                Ok(dirs.config_dir().join("config.toml"))
            }
            Self::Explicit(p) => Ok(p.clone()),
        }
    }

    /// A named file must exist and parse. The user file is optional.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let required = matches!(self, Self::Explicit(_));
        let s = config::Config::builder()
            .add_source(config::File::from(self.path()?).required(required))
            .add_source(
                config::Environment::with_prefix("BRACELET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Falls back to the default design only for the implicit user file.
    pub fn load_or_default(&self) -> Result<Config, ConfigError> {
        match (self, self.load()) {
            (_, Ok(c)) => Ok(c),
            (Self::User, Err(e)) => {
                log::warn!("Using default design, user config not loaded: {}", e);
                Ok(Config::default())
            }
            (Self::Explicit(_), Err(e)) => Err(e),
        }
    }

    /// Writes the bundled default config unless a file is already there.
    pub fn write_default(&self) -> Result<PathBuf, ConfigError> {
        let path = self.path()?;
        if path.exists() {
            log::info!("{} already exists, leaving it alone", path.display());
            return Ok(path);
        }
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        fs_err::write(&path, DEFAULT_CONFIG)?;
        Ok(path)
    }
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
