//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::fmt;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Storage configuration
    pub storage: StorageConfig,
    /// Provider default credentials
    pub providers: ProvidersConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    pub database_path: String,
}

/// Process-wide fallback API keys
///
/// Only OpenAI and Gemini support a server-side default; the other
/// providers take their key from each request.
#[derive(Clone, Default)]
pub struct ProvidersConfig {
    /// Fallback key for OpenAI requests without an explicit key
    pub openai_api_key: Option<String>,
    /// Fallback key for Gemini requests without an explicit key
    pub gemini_api_key: Option<String>,
}

// Keys never appear in logs; Debug only shows whether they are set
impl fmt::Debug for ProvidersConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvidersConfig")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "***"))
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            storage: StorageConfig {
                database_path: env::var("DATABASE_PATH")
                    .unwrap_or_else(|_| "data/chat.db".to_string()),
            },
            providers: ProvidersConfig {
                openai_api_key: non_empty_env("OPENAI_API_KEY"),
                gemini_api_key: non_empty_env("GEMINI_API_KEY"),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Read an environment variable, treating empty values as unset
fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
