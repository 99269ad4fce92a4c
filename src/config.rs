use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Top-level service configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GenieConfig {
    /// Generation backend settings
    #[serde(default)]
    pub model: ModelConfig,
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for the completion backend serving the fine-tuned model
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Base URL of an OpenAI-compatible completion server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier as known to the backend
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus sampling threshold
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Top-k sampling cutoff
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Bearer token, if the backend requires one
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_tokens: default_max_tokens(),
            api_key: None,
            timeout: default_timeout(),
        }
    }
}

/// Configuration for the HTTP listener
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "recipe-genie".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.95
}

fn default_top_k() -> u32 {
    50
}

fn default_max_tokens() -> u32 {
    1536
}

fn default_timeout() -> u64 {
    120
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

impl GenieConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with GENIE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: GENIE__MODEL__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`GenieConfig::load`] for the priority order.
pub fn load_config() -> Result<GenieConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: GENIE__SERVER__PORT
        .add_source(
            Environment::with_prefix("GENIE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_base_url(), "http://localhost:11434");
        assert_eq!(default_temperature(), 0.7);
        assert_eq!(default_top_p(), 0.95);
        assert_eq!(default_top_k(), 50);
        assert_eq!(default_max_tokens(), 1536);
        assert_eq!(default_port(), 5001);
    }

    #[test]
    fn test_server_address() {
        let server = ServerConfig::default();
        assert_eq!(server.address(), "0.0.0.0:5001");
    }

    #[test]
    fn test_partial_model_section_uses_defaults() {
        let settings = Config::builder()
            .add_source(config::File::from_str(
                "[model]\nbase_url = \"http://gpu-box:8000\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: GenieConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.model.base_url, "http://gpu-box:8000");
        assert_eq!(config.model.max_tokens, 1536);
        assert!(config.model.api_key.is_none());
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn test_load_config_without_file() {
        // Every field has a default, so an empty environment still loads
        let result = load_config();
        assert!(result.is_ok());
    }
}
