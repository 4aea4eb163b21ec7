//! Configuration for the Reverie agent.
//!
//! Settings come from up to four JSON5 files plus command-line overrides,
//! merged in that order, checked against the known keys, and validated.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Layer discovery, overrides, and load results.
pub use loader::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigLayer, ConfigOverrides, ConfigSource, LayeredConfig,
    LoadOptions,
};
/// Configuration schema models.
pub use model::*;
