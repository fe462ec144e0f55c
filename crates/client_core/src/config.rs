use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, PredictError};

pub const DEFAULT_CONFIG_FILE: &str = "predictor.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub predict_path: String,
    pub results_scroll_delay_ms: u64,
    /// `None` leaves the timeout to the transport.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            predict_path: "/api/predict".into(),
            results_scroll_delay_ms: 100,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    predict_path: Option<String>,
    results_scroll_delay_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `config_path` (or `predictor.toml` in the working directory
/// when it exists), then environment overrides.
pub fn load_settings(config_path: Option<&Path>) -> Result<ClientSettings, ConfigError> {
    let mut settings = ClientSettings::default();

    match config_path {
        Some(path) => settings.apply_file(path)?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                settings.apply_file(path)?;
            }
        }
    }

    settings.apply_env(|key| std::env::var(key).ok())?;
    Ok(settings)
}

impl ClientSettings {
    pub fn apply_toml(&mut self, raw: &str) -> Result<(), toml::de::Error> {
        let file_cfg: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file_cfg.server_url {
            self.server_url = v;
        }
        if let Some(v) = file_cfg.predict_path {
            self.predict_path = v;
        }
        if let Some(v) = file_cfg.results_scroll_delay_ms {
            self.results_scroll_delay_ms = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = (v > 0).then_some(v);
        }
        Ok(())
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: PathBuf::from(path),
            source,
        })?;
        self.apply_toml(&raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })
    }

    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(v) = lookup("PREDICTOR_SERVER_URL") {
            self.server_url = v;
        }
        if let Some(v) = lookup("APP__SERVER_URL") {
            self.server_url = v;
        }

        if let Some(v) = lookup("APP__PREDICT_PATH") {
            self.predict_path = v;
        }

        if let Some(v) = lookup("APP__RESULTS_SCROLL_DELAY_MS") {
            self.results_scroll_delay_ms = parse_u64("APP__RESULTS_SCROLL_DELAY_MS", &v)?;
        }

        if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
            let secs = parse_u64("APP__REQUEST_TIMEOUT_SECS", &v)?;
            self.request_timeout_secs = (secs > 0).then_some(secs);
        }

        Ok(())
    }

    pub fn endpoint(&self) -> Result<Url, PredictError> {
        Url::parse(self.server_url.trim())
            .and_then(|base| base.join(&self.predict_path))
            .map_err(|source| PredictError::Endpoint {
                url: format!("{}{}", self.server_url, self.predict_path),
                source,
            })
    }

    pub fn results_scroll_delay(&self) -> Duration {
        Duration::from_millis(self.results_scroll_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
