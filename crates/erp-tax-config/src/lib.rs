//! # erp-tax-config: Tax Template Configuration
//!
//! Loads the named tax templates that document assembly hands to the
//! engine. This crate owns all file and environment access so that
//! `erp-tax-core` stays pure.
//!
//! ## Usage
//! ```rust,no_run
//! use erp_tax_config::TaxConfig;
//!
//! let config = TaxConfig::load(None).unwrap();
//! let taxes = config.apply_template("in-gst-cess", 1_000_000).unwrap();
//! println!("total tax: {}", taxes.total_tax_minor());
//! ```

pub mod config;
pub mod error;

pub use config::{DefaultSettings, TaxConfig, CONFIG_PATH_ENV, DEFAULT_TEMPLATE_ENV};
pub use error::{ConfigError, ConfigResult};
