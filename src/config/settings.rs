use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use toml_edit::{DocumentMut, Item, Table};

use crate::api::MessageWallEndpoints;
use crate::rsvp::FlowTiming;
use crate::util::data_paths;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api: ApiConfig,
    pub message_wall: MessageWallConfig,
    pub timing: TimingConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Origin serving the `/api/*` routes
    pub base_url: String,
    /// Per-request timeout; None waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageWallConfig {
    pub form_url: String,
    pub script_url: String,
    pub name_field: String,
    pub message_field: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub rsvp_refresh_delay_ms: u64,
    pub entourage_refresh_delay_ms: u64,
    pub notice_dismiss_ms: u64,
    pub modal_close_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub show_entourage: bool,
    pub show_message_wall: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_API_BASE_URL.to_string(),
                request_timeout_secs: None,
            },
            message_wall: MessageWallConfig::default(),
            timing: TimingConfig {
                rsvp_refresh_delay_ms: 2000,
                entourage_refresh_delay_ms: 1000,
                notice_dismiss_ms: 5000,
                modal_close_ms: 3000,
            },
            display: DisplayConfig {
                show_entourage: true,
                show_message_wall: true,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlApiConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlMessageWallConfig {
    pub form_url: Option<String>,
    pub script_url: Option<String>,
    pub name_field: Option<String>,
    pub message_field: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlTimingConfig {
    pub rsvp_refresh_delay_ms: Option<u64>,
    pub entourage_refresh_delay_ms: Option<u64>,
    pub notice_dismiss_ms: Option<u64>,
    pub modal_close_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlDisplayConfig {
    pub show_entourage: Option<bool>,
    pub show_message_wall: Option<bool>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub api: Option<TomlApiConfig>,
    pub message_wall: Option<TomlMessageWallConfig>,
    pub timing: Option<TomlTimingConfig>,
    pub display: Option<TomlDisplayConfig>,
}

impl Config {
    /// Load configuration from the data directory, merging with defaults.
    ///
    /// Writes the example config on first run. A broken file is logged and ignored.
    pub fn load() -> Self {
        let config_file = data_paths().config_file();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Using default configuration");
                Config::default()
            }
        }
    }

    /// Load a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse TOML text and merge it over the defaults
    pub fn parse(contents: &str) -> Result<Self, String> {
        let toml_config = toml::from_str::<TomlConfig>(contents).map_err(|e| e.to_string())?;
        let mut config = Config::default();
        config.merge(toml_config);
        Ok(config)
    }

    fn merge(&mut self, toml_config: TomlConfig) {
        if let Some(api) = toml_config.api {
            if let Some(base_url) = api.base_url {
                self.api.base_url = base_url;
            }
            if api.request_timeout_secs.is_some() {
                self.api.request_timeout_secs = api.request_timeout_secs;
            }
        }

        if let Some(wall) = toml_config.message_wall {
            if let Some(form_url) = wall.form_url {
                self.message_wall.form_url = form_url;
            }
            if let Some(script_url) = wall.script_url {
                self.message_wall.script_url = script_url;
            }
            if let Some(name_field) = wall.name_field {
                self.message_wall.name_field = name_field;
            }
            if let Some(message_field) = wall.message_field {
                self.message_wall.message_field = message_field;
            }
        }

        if let Some(timing) = toml_config.timing {
            if let Some(ms) = timing.rsvp_refresh_delay_ms {
                self.timing.rsvp_refresh_delay_ms = ms;
            }
            if let Some(ms) = timing.entourage_refresh_delay_ms {
                self.timing.entourage_refresh_delay_ms = ms;
            }
            if let Some(ms) = timing.notice_dismiss_ms {
                self.timing.notice_dismiss_ms = ms;
            }
            if let Some(ms) = timing.modal_close_ms {
                self.timing.modal_close_ms = ms;
            }
        }

        if let Some(display) = toml_config.display {
            if let Some(show) = display.show_entourage {
                self.display.show_entourage = show;
            }
            if let Some(show) = display.show_message_wall {
                self.display.show_message_wall = show;
            }
        }
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, "Failed to create config directory");
                    return;
                }
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn flow_timing(&self) -> FlowTiming {
        FlowTiming {
            notice_dismiss: Duration::from_millis(self.timing.notice_dismiss_ms),
            modal_close: Duration::from_millis(self.timing.modal_close_ms),
        }
    }

    pub fn rsvp_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.timing.rsvp_refresh_delay_ms)
    }

    pub fn entourage_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.timing.entourage_refresh_delay_ms)
    }

    /// Wall endpoints, or None when no script URL is configured
    pub fn message_wall_endpoints(&self) -> Option<MessageWallEndpoints> {
        let wall = &self.message_wall;
        if wall.script_url.trim().is_empty() {
            return None;
        }
        Some(MessageWallEndpoints {
            form_url: wall.form_url.clone(),
            script_url: wall.script_url.clone(),
            name_field: wall.name_field.clone(),
            message_field: wall.message_field.clone(),
        })
    }
}

/// Persist `[api] base_url` in the default config file, keeping everything else intact
pub fn save_api_base_url(url: &str) -> Result<(), ConfigError> {
    save_api_base_url_to(&data_paths().config_file(), url)
}

pub fn save_api_base_url_to(config_file: &Path, url: &str) -> Result<(), ConfigError> {
    let contents = if config_file.exists() {
        fs::read_to_string(config_file).map_err(|source| ConfigError::Read {
            path: config_file.to_path_buf(),
            source,
        })?
    } else {
        String::new()
    };

    let mut doc: DocumentMut = contents.parse().map_err(|e: toml_edit::TomlError| {
        ConfigError::Parse {
            path: config_file.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    if !doc.contains_key("api") {
        doc["api"] = Item::Table(Table::new());
    }
    doc["api"]["base_url"] = toml_edit::value(url);

    let write_err = |source| ConfigError::Write {
        path: config_file.to_path_buf(),
        source,
    };
    if let Some(parent) = config_file.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(config_file, doc.to_string()).map_err(write_err)?;

    Ok(())
}
