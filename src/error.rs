use thiserror::Error;

pub type Result<T> = std::result::Result<T, ErrorPageError>;

#[derive(Debug, Error)]
pub enum ErrorPageError {
    #[error("Dependency not found: {type_name}")]
    DependencyNotFound { type_name: String },

    #[error("Failed to downcast type: {type_name}")]
    DowncastFailed { type_name: String },

    #[error("Plugin {plugin} missing dependency {dependency}")]
    MissingDependency {
        plugin: &'static str,
        dependency: &'static str,
    },

    #[error("Plugin {plugin} already registered")]
    DuplicatePlugin { plugin: &'static str },

    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

impl ErrorPageError {
    /// Create a missing plugin dependency error
    pub fn missing_dependency(plugin: &'static str, dependency: &'static str) -> Self {
        Self::MissingDependency { plugin, dependency }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }
}
