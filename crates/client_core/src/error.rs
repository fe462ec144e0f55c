use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid prediction endpoint '{url}': {source}")]
    Endpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The service answered with a non-success status and a JSON body.
    /// `message` is its `error` field when that holds anything to show.
    #[error("prediction rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },
    /// Connection failures and bodies that are not the expected JSON.
    #[error("prediction request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}
