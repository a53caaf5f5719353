use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("powersnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which high scores should be stored: the file
    /// given in the configuration or, if that is not set, a file in the local
    /// data directory.  If the data directory can't be determined either,
    /// fall back to a file in the current directory.
    pub(crate) fn high_scores_file(&self) -> PathBuf {
        self.files
            .high_scores_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|p| p.join("powersnake").join("high_scores.json")))
            .unwrap_or_else(|| PathBuf::from("high_scores.json"))
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which high scores should be stored
    high_scores_file: Option<PathBuf>,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    high_scores_file: Option<String>,
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = NoHomeError;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, NoHomeError> {
        Ok(FileConfig {
            high_scores_file: value.high_scores_file.map(expand_tilde).transpose()?,
        })
    }
}

/// Replace a leading `~` path component with the user's home directory
fn expand_tilde(path: String) -> Result<PathBuf, NoHomeError> {
    let rest = if path == "~" {
        ""
    } else if let Some(rest) = path.strip_prefix("~/") {
        rest
    } else {
        return Ok(PathBuf::from(path));
    };
    let home = dirs::home_dir().ok_or(NoHomeError)?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("cannot expand \"~\": home directory could not be determined")]
pub(crate) struct NoHomeError;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
