//! Configuration management module.
//!
//! This module handles loading and saving the dashboard configuration: service
//! endpoints, credentials, weather location, storage and playback settings.
//! Credentials are only ever read at run time from this file or from the
//! environment.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/dashboard-tui";
const DATA_DIRECTORY_NAME: &str = "dashboard-tui";

const WEATHER_KEY_ENV: &str = "WEATHER_API_KEY";
const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

/// One week.
const MAX_REFRESH_MINUTES: u64 = 7 * 24 * 60;

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub weather_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub weather_base_url: String,
    pub openai_base_url: String,
    pub location: String,
    pub units: String,
    pub language: String,
    pub weather_refresh_minutes: u64,
    pub data_dir: Option<PathBuf>,
    pub player_command: Vec<String>,
    pub log_level: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_weather_refresh_minutes")]
    pub weather_refresh_minutes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_player_command")]
    pub player_command: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_location() -> String {
    "Seoul".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_language() -> String {
    "kr".to_string()
}

fn default_weather_refresh_minutes() -> u64 {
    30
}

fn default_player_command() -> Vec<String> {
    vec![
        "mpv".to_string(),
        "--no-video".to_string(),
        "--really-quiet".to_string(),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding default values.
    ///
    pub fn new() -> Config {
        Config {
            weather_api_key: None,
            openai_api_key: None,
            weather_base_url: default_weather_base_url(),
            openai_base_url: default_openai_base_url(),
            location: default_location(),
            units: default_units(),
            language: default_language(),
            weather_refresh_minutes: default_weather_refresh_minutes(),
            data_dir: None,
            player_command: default_player_command(),
            log_level: default_log_level(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. When no file exists yet, one is written with
    /// default values so the user has something to edit.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        self.file_path = Some(file_path.clone());

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.apply(data);
        } else {
            self.save()?;
        }

        self.validate()?;
        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let content = serde_yaml::to_string(&self.to_file_spec())
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Return the weather credential, preferring the environment over the
    /// configuration file.
    ///
    pub fn weather_api_key(&self) -> Option<String> {
        resolve_credential(env::var(WEATHER_KEY_ENV).ok(), self.weather_api_key.as_deref())
    }

    /// Return the text and speech credential, preferring the environment over
    /// the configuration file.
    ///
    pub fn openai_api_key(&self) -> Option<String> {
        resolve_credential(env::var(OPENAI_KEY_ENV).ok(), self.openai_api_key.as_deref())
    }

    /// Return the weather polling period.
    ///
    pub fn weather_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.weather_refresh_minutes.saturating_mul(60))
    }

    /// Return the directory holding the persisted to-do list.
    ///
    pub fn data_dir(&self) -> Result<PathBuf, AppError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        match dirs::data_dir() {
            Some(dir) => Ok(dir.join(DATA_DIRECTORY_NAME)),
            None => Err(ConfigError::DataDirectoryNotFound.into()),
        }
    }

    fn apply(&mut self, data: FileSpec) {
        self.weather_api_key = data.weather_api_key;
        self.openai_api_key = data.openai_api_key;
        self.weather_base_url = data.weather_base_url;
        self.openai_base_url = data.openai_base_url;
        self.location = data.location;
        self.units = data.units;
        self.language = data.language;
        self.weather_refresh_minutes = data.weather_refresh_minutes;
        self.data_dir = data.data_dir;
        self.player_command = data.player_command;
        self.log_level = data.log_level;
    }

    fn to_file_spec(&self) -> FileSpec {
        FileSpec {
            weather_api_key: self.weather_api_key.clone(),
            openai_api_key: self.openai_api_key.clone(),
            weather_base_url: self.weather_base_url.clone(),
            openai_base_url: self.openai_base_url.clone(),
            location: self.location.clone(),
            units: self.units.clone(),
            language: self.language.clone(),
            weather_refresh_minutes: self.weather_refresh_minutes,
            data_dir: self.data_dir.clone(),
            player_command: self.player_command.clone(),
            log_level: self.log_level.clone(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.weather_refresh_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "weather_refresh_minutes",
                message: "must be at least 1".to_string(),
            });
        }
        if self.weather_refresh_minutes > MAX_REFRESH_MINUTES {
            return Err(ConfigError::InvalidValue {
                field: "weather_refresh_minutes",
                message: format!("must be at most {}", MAX_REFRESH_MINUTES),
            });
        }
        if self.player_command.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "player_command",
                message: "must name a program".to_string(),
            });
        }
        if self.location.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "location",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

/// Pick the first non-blank credential.
///
fn resolve_credential(from_env: Option<String>, from_file: Option<&str>) -> Option<String> {
    from_env
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            from_file
                .filter(|key| !key.trim().is_empty())
                .map(str::to_owned)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        env::temp_dir().join(format!("dashboard-tui-config-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn load_writes_defaults_when_missing() {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();

        assert!(dir.join(FILE_NAME).exists());
        assert_eq!(config.location, "Seoul");
        assert_eq!(config.weather_refresh_interval(), Duration::from_secs(1800));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn load_reads_existing_file() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(FILE_NAME),
            "weather_api_key: abc\nlocation: Busan\nweather_refresh_minutes: 5\n",
        )
        .unwrap();

        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        assert_eq!(config.weather_api_key.as_deref(), Some("abc"));
        assert_eq!(config.location, "Busan");
        assert_eq!(config.units, "metric");
        assert_eq!(config.weather_refresh_interval(), Duration::from_secs(300));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn load_rejects_zero_refresh() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "weather_refresh_minutes: 0\n").unwrap();

        let mut config = Config::new();
        assert!(config.load(dir.to_str()).is_err());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn load_rejects_oversized_refresh() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(FILE_NAME),
            format!("weather_refresh_minutes: {}\n", u64::MAX / 2),
        )
        .unwrap();

        let mut config = Config::new();
        let error = config.load(dir.to_str()).unwrap_err();
        assert!(error.to_string().contains("weather_refresh_minutes"));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn refresh_interval_accepts_upper_bound() {
        let mut config = Config::new();
        config.weather_refresh_minutes = MAX_REFRESH_MINUTES;
        assert!(config.validate().is_ok());
        assert_eq!(
            config.weather_refresh_interval(),
            Duration::from_secs(7 * 24 * 3600)
        );

        config.weather_refresh_minutes = u64::MAX;
        assert!(config.validate().is_err());
        assert_eq!(
            config.weather_refresh_interval(),
            Duration::from_secs(u64::MAX)
        );
    }

    #[test]
    fn save_without_path_fails() {
        assert!(Config::new().save().is_err());
    }

    #[test]
    fn resolve_credential_prefers_environment() {
        assert_eq!(
            resolve_credential(Some("env".to_string()), Some("file")),
            Some("env".to_string())
        );
        assert_eq!(
            resolve_credential(Some("  ".to_string()), Some("file")),
            Some("file".to_string())
        );
        assert_eq!(resolve_credential(None, Some("")), None);
        assert_eq!(resolve_credential(None, None), None);
    }

    #[test]
    fn data_dir_uses_override() {
        let mut config = Config::new();
        config.data_dir = Some(PathBuf::from("/tmp/todos"));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/todos"));
    }
}
