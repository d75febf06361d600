//! # Tax Configuration
//!
//! Loads named tax templates for document assembly.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ERP_TAX_DEFAULT_TEMPLATE=in-gst-cess                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, else $ERP_TAX_CONFIG, else                          │
//! │     ~/.config/erp-tax/tax.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.erp.erp-tax/tax.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     No templates, no default template                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [defaults]
//! template = "in-gst-cess"
//!
//! [[templates]]
//! name = "in-gst-cess"
//! description = "GST 18% with 1% CESS on GST"
//!
//! [[templates.rows]]
//! charge_type = "on_net_total"
//! rate = "0.18"
//! rounding_method = "half_up"
//!
//! [[templates.rows]]
//! charge_type = "on_previous_row_amount"
//! rate = "0.01"
//! rounding_method = "half_up"
//! ```
//!
//! Rates are written as strings so they never pass through a float.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use erp_tax_core::{DocumentTaxes, TaxTemplate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "ERP_TAX_CONFIG";

/// Env var overriding `[defaults] template`.
pub const DEFAULT_TEMPLATE_ENV: &str = "ERP_TAX_DEFAULT_TEMPLATE";

// =============================================================================
// Defaults
// =============================================================================

/// Settings applied when a document does not pick a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSettings {
    /// Template used by `TaxConfig::default_template`.
    #[serde(default)]
    pub template: Option<String>,
}

// =============================================================================
// Main Tax Configuration
// =============================================================================

/// Complete tax template configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    #[serde(default)]
    pub defaults: DefaultSettings,

    #[serde(default)]
    pub templates: Vec<TaxTemplate>,
}

impl TaxConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tax.toml)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an unreadable or invalid one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::env_config_path).or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading tax config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Tax config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        info!(
            templates = config.templates.len(),
            default_template = ?config.defaults.template,
            "Tax config loaded"
        );
        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load tax config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config document without touching the environment.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        info!(?path, "Tax config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();

        for template in &self.templates {
            if template.name.trim().is_empty() {
                return Err(ConfigError::InvalidConfig(
                    "template name must not be empty".into(),
                ));
            }

            if !seen.insert(template.name.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "duplicate template name: '{}'",
                    template.name
                )));
            }

            template.validate().map_err(|source| ConfigError::Template {
                template: template.name.clone(),
                source,
            })?;
        }

        if let Some(ref name) = self.defaults.template {
            if !seen.contains(name.as_str()) {
                return Err(ConfigError::UnknownTemplate(name.clone()));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(DEFAULT_TEMPLATE_ENV) {
            let name = name.trim();
            if name.is_empty() {
                debug!("Clearing default tax template from environment");
                self.defaults.template = None;
            } else {
                debug!(template = %name, "Overriding default tax template from environment");
                self.defaults.template = Some(name.to_string());
            }
        }
    }

    fn env_config_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "erp", "erp-tax")
            .map(|dirs| dirs.config_dir().join("tax.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Looks up a template by name.
    pub fn template(&self, name: &str) -> ConfigResult<&TaxTemplate> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ConfigError::UnknownTemplate(name.to_string()))
    }

    /// Returns the default template, if one is configured.
    pub fn default_template(&self) -> ConfigResult<Option<&TaxTemplate>> {
        self.defaults
            .template
            .as_deref()
            .map(|name| self.template(name))
            .transpose()
    }

    /// Resolves a document's taxes with a named template.
    pub fn apply_template(&self, name: &str, net_total_minor: i64) -> ConfigResult<DocumentTaxes> {
        Ok(self.template(name)?.apply(net_total_minor)?)
    }
}
