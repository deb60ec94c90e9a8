//! Configuration schema for the concierge backend.

use serde::{Deserialize, Serialize};

/// Root config for the concierge backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConciergeConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

impl ConciergeConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> ConciergeConfigBuilder {
        ConciergeConfigBuilder::new()
    }
}

/// Builder for assembling a `ConciergeConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct ConciergeConfigBuilder {
    config: ConciergeConfig,
}

impl ConciergeConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: ConciergeConfig::default(),
        }
    }

    /// Replace the completion provider configuration.
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.config.provider = provider;
        self
    }

    /// Replace the HTTP server configuration.
    pub fn server(mut self, server: ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Replace the system prompt configuration.
    pub fn prompt(mut self, prompt: PromptConfig) -> Self {
        self.config.prompt = prompt;
        self
    }

    /// Replace the session persistence configuration.
    pub fn sessions(mut self, sessions: SessionsConfig) -> Self {
        self.config.sessions = sessions;
        self
    }

    /// Finalize and return the built `ConciergeConfig`.
    pub fn build(self) -> ConciergeConfig {
        self.config
    }
}

/// Connection settings for the chat completion provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key sent as a bearer token. Usually filled from the environment.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on a single completion request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Default OpenAI-compatible API root.
fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

/// Default completion model identifier.
fn default_model() -> String {
    "openai/gpt-oss-20b".to_string()
}

/// Default completion token cap.
fn default_max_tokens() -> u32 {
    2048
}

/// Default sampling temperature.
fn default_temperature() -> f32 {
    0.2
}

/// Default request timeout in seconds.
fn default_timeout_secs() -> u64 {
    60
}

/// Bind address settings for the HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Default listen host.
fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default listen port.
fn default_port() -> u16 {
    5000
}

/// System prompt settings for the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Instructions sent as the system message on every turn.
    #[serde(default = "default_base_instructions")]
    pub base_instructions: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            base_instructions: default_base_instructions(),
        }
    }
}

/// Default assistant persona instructions.
fn default_base_instructions() -> String {
    "You are a helpful, polite customer support assistant. \
     Always reply in English in a friendly tone. \
     Remember the conversation context and greet users politely."
        .to_string()
}

/// Where session transcripts are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionsConfig {
    /// Directory holding one JSON document per session.
    #[serde(default = "default_sessions_path")]
    pub path: String,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            path: default_sessions_path(),
        }
    }
}

/// Default session storage directory.
fn default_sessions_path() -> String {
    "./memory".to_string()
}
