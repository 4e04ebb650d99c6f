//! Podium configuration.
//!
//! Loaded from `~/.podium/config.toml` unless another path is given.
//! Every key is optional; a missing default file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Where the prediction service listens when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict_winner";

/// Podium configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Full URL of the prediction endpoint.
    pub endpoint: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Load config from `explicit`, or from `~/.podium/config.toml`.
    ///
    /// An explicit path must exist. The default path may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(format!("no config file found at {}", path.display()));
                }
                path.to_path_buf()
            }
            None => match Self::path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        config
            .endpoint_url()
            .map_err(|e| format!("{e} (in {})", path.display()))?;

        Ok(config)
    }

    /// The endpoint as a URL. Only http and https are accepted.
    pub fn endpoint_url(&self) -> Result<Url, String> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| format!("invalid endpoint '{}': {e}", self.endpoint))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(format!(
                "invalid endpoint '{}': unsupported scheme '{other}'",
                self.endpoint
            )),
        }
    }

    /// Podium's home: `~/.podium/`.
    pub fn dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".podium"))
    }

    /// The default config file path: `~/.podium/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        let url = config.endpoint_url().unwrap();
        assert_eq!(url.origin().ascii_serialization(), "http://127.0.0.1:5000");
    }

    #[test]
    fn loads_endpoint_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "endpoint = \"http://models.local:8080/predict_winner\"\n");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.endpoint, "http://models.local:8080/predict_winner");
    }

    #[test]
    fn empty_file_means_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.contains("no config file found"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "endpoint = ");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.starts_with("invalid config at"));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "endpiont = \"http://x\"\n");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "endpoint = \"ftp://127.0.0.1/predict\"\n");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn unparseable_endpoint_is_rejected() {
        let config = Config {
            endpoint: "not a url".to_string(),
        };
        assert!(config.endpoint_url().is_err());
    }
}
