//! Configuration for the loader.
//!
//! Read from `~/.config/seedposter/config.toml` unless a path is given. If the
//! default file doesn't exist, one with comments is created.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub loader: LoaderConfig,
    pub http: HttpConfig,
    pub layout: LayoutConfig,
}

/// Where `posts.json` lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub site_url: String,
    pub posts_path: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:8000/".to_string(),
            posts_path: "/assets/js/newsletter/posts.json".to_string(),
        }
    }
}

impl SourceConfig {
    /// `posts_path` resolved against `site_url`.
    pub fn posts_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.site_url)?.join(&self.posts_path)
    }
}

/// Retry and deadline timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Total fetch attempts, including the first (default: 3)
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds (default: 2000)
    pub retry_delay_ms: u64,
    /// Time before the empty fallback is shown in milliseconds (default: 10000)
    pub deadline_ms: u64,
    /// How long `render` keeps waiting for a late fetch once a fallback is
    /// showing, in milliseconds (default: 5000)
    pub fallback_grace_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 2000,
            deadline_ms: 10_000,
            fallback_grace_ms: 5000,
        }
    }
}

impl LoaderConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    pub fn fallback_grace(&self) -> Duration {
        Duration::from_millis(self.fallback_grace_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Per-request timeout. Unset means attempts are never cut short.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("seedposter/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
        }
    }
}

/// Shape of the generated page skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Highest sidebar slot id; slots `p0..=pN` are generated (default: 4)
    pub last_sidebar_slot: u32,
    /// Number of `img.imgposts` grid images (default: 6)
    pub grid_images: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            last_sidebar_slot: 4,
            grid_images: 6,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// Only the default location gets a commented config created on first
    /// use. An explicit path that doesn't exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::default_config_path()?;
                if !config_path.exists() {
                    Self::create_default_config(&config_path)?;
                    return Ok(Self::default());
                }
                Self::load_from(&config_path)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loader.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "loader.max_attempts must be at least 1".into(),
            ));
        }
        self.source
            .posts_url()
            .map_err(|e| ConfigError::Invalid(format!("source URL: {}", e)))?;
        Ok(())
    }

    /// Get the default config file path: `~/.config/seedposter/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("seedposter").join("config.toml"))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# Seedposter Configuration

[source]
# Site that serves the posts document
site_url = "http://localhost:8000/"
# Path of the posts document, resolved against site_url
posts_path = "/assets/js/newsletter/posts.json"

[loader]
# Total fetch attempts, including the first
max_attempts = 3
# Fixed delay between attempts (milliseconds)
retry_delay_ms = 2000
# Show the "no featured post" fallback after this long (milliseconds)
deadline_ms = 10000
# Once a fallback is showing, give up on the fetch and write the page after
# this long (milliseconds)
fallback_grace_ms = 5000

[http]
user_agent = "seedposter/0.1.0"
# Per-request timeout in seconds. Leave unset to let attempts run until
# the server answers.
# request_timeout_secs = 30

[layout]
# Sidebar slots p0..pN (p0 is reserved for the featured post)
last_sidebar_slot = 4
# Number of grid images
grid_images = 6
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.loader, LoaderConfig::default());
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.http.request_timeout_secs, None);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[loader]
deadline_ms = 5000
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.loader.deadline(), Duration::from_secs(5));
        assert_eq!(config.loader.max_attempts, 3);
        assert_eq!(config.loader.retry_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_posts_url_resolution() {
        let source = SourceConfig {
            site_url: "https://seedscribe.example/blog/".into(),
            ..SourceConfig::default()
        };
        assert_eq!(
            source.posts_url().unwrap().as_str(),
            "https://seedscribe.example/assets/js/newsletter/posts.json"
        );
    }

    #[test]
    fn test_load_from_file_rejects_zero_attempts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[loader]\nmax_attempts = 0\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_to_toml_round_trips_defaults() {
        let rendered = Config::default().to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
