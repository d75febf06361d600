//! # Config Error Types

use erp_tax_core::TaxError;
use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything that can go wrong loading, validating or saving tax templates.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse tax config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be written back as TOML.
    #[error("Failed to serialize tax config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Structurally invalid configuration (duplicate names, ...).
    #[error("Invalid tax configuration: {0}")]
    InvalidConfig(String),

    /// A template name that is not defined.
    #[error("Unknown tax template: '{0}'")]
    UnknownTemplate(String),

    /// A template failed engine validation.
    #[error("Tax template '{template}' is invalid: {source}")]
    Template {
        template: String,
        #[source]
        source: TaxError,
    },

    /// Applying a template to a document failed.
    #[error(transparent)]
    Tax(#[from] TaxError),
}
