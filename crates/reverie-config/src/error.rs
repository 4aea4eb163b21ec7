//! Errors raised while assembling the agent configuration.

use thiserror::Error;

/// Failure to produce a usable `ReverieConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config layer exists but could not be read.
    #[error("cannot read {layer} config: {source}")]
    Read {
        layer: String,
        #[source]
        source: std::io::Error,
    },
    /// A config layer is not valid JSON5.
    #[error("cannot parse {layer} config: {source}")]
    Parse {
        layer: String,
        #[source]
        source: json5::Error,
    },
    /// The merged layers could not be decoded into the config model.
    #[error("config does not match the expected shape: {0}")]
    Decode(#[from] serde_json::Error),
    /// A setting has the wrong type, an unknown key, or an unusable value.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            path: path.into(),
            message: message.into(),
        }
    }
}
