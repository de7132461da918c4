use std::{collections::HashMap, env};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub resources: ResourceConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            upstream: UpstreamConfig::from_env()?,
            resources: ResourceConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| "SERVER_PORT must be a valid port number")?,
        })
    }
}

/// Upstream chat-completion API configuration.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Required. There is deliberately no hardcoded fallback key.
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl UpstreamConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            base_url: env::var("DEEPSEEK_BASE_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com".to_string()),
            api_key: env::var("DEEPSEEK_API_KEY").map_err(|_| "DEEPSEEK_API_KEY not set")?,
            model: env::var("DEEPSEEK_MODEL").unwrap_or_else(|_| "deepseek-chat".to_string()),
            temperature: env::var("DEEPSEEK_TEMPERATURE")
                .unwrap_or_else(|_| "0.2".to_string())
                .parse()
                .map_err(|_| "DEEPSEEK_TEMPERATURE must be a valid number")?,
        })
    }
}

/// Paths of the resource files loaded at startup.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    pub system_prompt_path: String,
    pub doc_schemas_path: String,
}

impl ResourceConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            system_prompt_path: env::var("SYSTEM_PROMPT_PATH")
                .unwrap_or_else(|_| "system_prompt.jinja".to_string()),
            doc_schemas_path: env::var("DOC_SCHEMAS_PATH")
                .unwrap_or_else(|_| "doc_schemas.json".to_string()),
        })
    }
}

/// Logging Configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, String> {
        let mut modules = HashMap::new();

        // Load module-specific log levels
        if let Ok(level) = env::var("LOG_MODULE_API") {
            modules.insert("api".to_string(), level);
        }
        if let Ok(level) = env::var("LOG_MODULE_INFERENCE") {
            modules.insert("inference".to_string(), level);
        }
        if let Ok(level) = env::var("LOG_MODULE_DOCUMENT") {
            modules.insert("document".to_string(), level);
        }

        Ok(Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            modules,
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            modules: HashMap::new(),
        }
    }
}
