// Configuration Management
//
// This crate handles configuration loading for the drafting API:
// - Environment-driven configuration structs
// - Startup resource loading (system prompt template, document type schemas)
//
// Credentials are never defaulted: a missing upstream API key is a startup
// error, not a silent fallback.

use std::path::Path;
use thiserror::Error;

pub mod types;

// Re-export all configuration types
pub use types::*;

/// Placeholder the system prompt template must contain. The merged user
/// input is substituted at its first occurrence.
pub const USER_INPUT_PLACEHOLDER: &str = "{{ user_input }}";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read resource file: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse resource file: {source}")]
    ParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("System prompt template is missing the {USER_INPUT_PLACEHOLDER} placeholder")]
    MissingPlaceholder,

    #[error("Document schema file must be a non-empty JSON object")]
    EmptySchemas,
}

/// System prompt template with a single user-input substitution point.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        if !template.contains(USER_INPUT_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder);
        }
        Ok(Self { template })
    }

    /// Load and validate the template from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let template = std::fs::read_to_string(path)?;
        Self::new(template)
    }

    /// Substitute the merged user input at the first placeholder occurrence.
    pub fn render(&self, merged_input: &str) -> String {
        self.template.replacen(USER_INPUT_PLACEHOLDER, merged_input, 1)
    }
}

/// Document type schemas loaded at startup. `doc_types` preserves the key
/// order of the schema file (serde_json `preserve_order`).
#[derive(Debug, Clone)]
pub struct DocSchemas {
    pub doc_types: Vec<String>,
    pub schemas: serde_json::Value,
}

impl DocSchemas {
    pub fn from_value(schemas: serde_json::Value) -> Result<Self, ConfigError> {
        let doc_types: Vec<String> = schemas
            .as_object()
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();
        if doc_types.is_empty() {
            return Err(ConfigError::EmptySchemas);
        }
        Ok(Self { doc_types, schemas })
    }

    /// Load the schema file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let schemas: serde_json::Value = serde_json::from_str(&content)?;
        Self::from_value(schemas)
    }
}
