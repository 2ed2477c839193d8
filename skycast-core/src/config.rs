use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Coordinate;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
///
/// [home]
/// latitude = 51.5072
/// longitude = -0.1276
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Fixed coordinates the CLI location tracker hands out in place of
    /// device geolocation.
    pub home: Option<Coordinate>,
}

impl Config {
    /// Return the configured API key, with a hint when it is missing.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `skycast configure` and enter your OpenWeather API key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn set_home(&mut self, home: Coordinate) {
        self.home = Some(home);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.api_key().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `skycast configure`"));
    }

    #[test]
    fn set_and_read_api_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        assert_eq!(cfg.api_key().expect("api key must exist"), "KEY");
    }

    #[test]
    fn parses_home_coordinates_from_toml() {
        let cfg: Config = toml::from_str(
            "api_key = \"KEY\"\n\n[home]\nlatitude = 51.5072\nlongitude = -0.1276\n",
        )
        .expect("config must parse");

        let home = cfg.home.expect("home must be set");
        assert_eq!(home.latitude, 51.5072);
        assert_eq!(home.longitude, -0.1276);
    }

    #[test]
    fn round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_home(Coordinate {
            latitude: 48.8566,
            longitude: 2.3522,
        });

        let serialized = toml::to_string_pretty(&cfg).expect("config must serialize");
        let parsed: Config = toml::from_str(&serialized).expect("config must parse back");

        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
        assert_eq!(parsed.home, cfg.home);
    }
}
