/// Runtime configuration for the binaries, read from the environment.
///
/// | Variable          | Default       |
/// |-------------------|---------------|
/// | `HOST`            | `127.0.0.1`   |
/// | `PORT`            | `8080`        |
/// | `TRENDBOARD_DATA` | `youtube.csv` |

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "youtube.csv";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        Ok(Config {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            data_path: Self::data_path_from_lookup(&lookup),
        })
    }

    /// The dataset path alone, for tools that never bind a port.
    pub fn data_path_from_env() -> PathBuf {
        Self::data_path_from_lookup(|key: &str| std::env::var(key).ok())
    }

    pub fn data_path_from_lookup<F>(lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("TRENDBOARD_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("TRENDBOARD_DATA", "/data/trending.csv"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_path, PathBuf::from("/data/trending.csv"));
    }

    #[test]
    fn test_data_path_ignores_invalid_port() {
        let lookup = lookup_from(&[("PORT", "abc"), ("TRENDBOARD_DATA", "trending.csv")]);
        assert!(Config::from_lookup(&lookup).is_err());
        assert_eq!(Config::data_path_from_lookup(&lookup), PathBuf::from("trending.csv"));

        let path = Config::data_path_from_lookup(lookup_from(&[("PORT", "abc")]));
        assert_eq!(path, PathBuf::from(DEFAULT_DATA_PATH));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("eighty".to_string()));

        let err = Config::from_lookup(lookup_from(&[("PORT", "70000")])).unwrap_err();
        assert!(err.to_string().contains("70000"));
    }
}
