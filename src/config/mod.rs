use crate::error::{ErrorPageError, Result};
use crate::negotiation::NegotiationPolicy;
use dashmap::DashMap;
use serde::Deserialize;
use std::env;
use std::sync::Arc;

pub const TEMPLATE_KEY: &str = "ERROR_PAGE_TEMPLATE";
pub const NEGOTIATION_KEY: &str = "ERROR_PAGE_NEGOTIATION";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service pre-filled with the process environment.
    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Settings of the error page plugin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorPageOptions {
    /// Name of the template rendered for error pages
    pub template: String,
    pub negotiation: NegotiationPolicy,
}

impl Default for ErrorPageOptions {
    fn default() -> Self {
        Self {
            template: "error".to_string(),
            negotiation: NegotiationPolicy::default(),
        }
    }
}

impl ErrorPageOptions {
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn negotiation(mut self, policy: NegotiationPolicy) -> Self {
        self.negotiation = policy;
        self
    }

    /// Read options from `config`, falling back to defaults for missing keys.
    pub fn from_config(config: &ConfigService) -> Result<Self> {
        let mut options = Self::default();

        if let Some(template) = config.get(TEMPLATE_KEY) {
            if template.trim().is_empty() {
                return Err(ErrorPageError::invalid_config(
                    TEMPLATE_KEY,
                    "template name is empty",
                ));
            }
            options.template = template;
        }

        if let Some(policy) = config.get(NEGOTIATION_KEY) {
            options.negotiation = policy
                .trim()
                .parse()
                .map_err(|e| ErrorPageError::invalid_config(NEGOTIATION_KEY, format!("{e}: {policy}")))?;
        }

        Ok(options)
    }
}
