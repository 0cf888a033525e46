//! Service configuration

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen address
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            static_dir: default_static_dir(),
        }
    }
}

/// Which content store backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// In-process tables, optionally seeded from a JSON file
    #[default]
    Memory,
    /// PostgREST-compatible HTTP backend
    Rest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub kind: StoreKind,

    /// Seed file for the memory store
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Project URL of the REST backend
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key for the REST backend
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds; requests wait indefinitely when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            seed_path: None,
            base_url: None,
            api_key: None,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

// Defaults
fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_filter() -> String {
    "advocacy_cms=info,tower_http=info".to_string()
}

impl Config {
    /// Load from a TOML file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Runs before logging is initialised, so the caller reports this
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.kind == StoreKind::Rest {
            match self.store.base_url.as_deref() {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some(url) => {
                    return Err(ConfigError::Invalid(format!(
                        "store.base_url must be an http(s) URL, got `{url}`"
                    )))
                }
                None => {
                    return Err(ConfigError::Invalid(
                        "store.kind = \"rest\" requires store.base_url".to_string(),
                    ))
                }
            }
        }
        if self.store.timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "store.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen.port(), 8080);
        assert_eq!(config.store.kind, StoreKind::Memory);
        assert_eq!(config.store.timeout_secs, None);
        assert!(!config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[store]
kind = "rest"
base_url = "https://example.supabase.co"
"#,
        )
        .unwrap();
        assert_eq!(config.store.kind, StoreKind::Rest);
        assert_eq!(config.store.timeout_secs, None);
        assert_eq!(config.server.listen.port(), 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rest_without_url_is_invalid() {
        let mut config = Config::default();
        config.store.kind = StoreKind::Rest;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.store.base_url = Some("example.supabase.co".into());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_timeout_is_opt_in() {
        let mut config = Config::default();
        config.store.timeout_secs = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.store.timeout_secs = Some(15);
        assert!(config.validate().is_ok());
    }
}
