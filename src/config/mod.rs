mod settings;

pub use settings::{
    save_api_base_url, save_api_base_url_to, ApiConfig, Config, ConfigError, DisplayConfig,
    MessageWallConfig, TimingConfig, DEFAULT_API_BASE_URL, EXAMPLE_CONFIG,
};
