use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::InputRecord, error::ErrorBody, protocol::PredictionResponse};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod controller;
pub mod error;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use controller::{FormController, PanelState, SubmitOutcome};
pub use error::{ConfigError, PredictError};
pub use view::{FormView, StatusLine, StatusTone};

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, input: &InputRecord) -> Result<PredictionResponse, PredictError>;
}

#[async_trait]
impl<S: PredictionService + ?Sized> PredictionService for Arc<S> {
    async fn predict(&self, input: &InputRecord) -> Result<PredictionResponse, PredictError> {
        (**self).predict(input).await
    }
}

/// HTTP client for `POST /api/predict`.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    endpoint: Url,
}

impl PredictionClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, PredictError> {
        let endpoint = settings.endpoint()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(PredictError::Client)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for PredictionClient {
    async fn predict(&self, input: &InputRecord) -> Result<PredictionResponse, PredictError> {
        debug!(endpoint = %self.endpoint, "posting prediction request");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(input)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<ErrorBody>().await.map_err(|err| {
                warn!(status = status.as_u16(), "unreadable error body: {err}");
                PredictError::Transport(err)
            })?;
            return Err(PredictError::Rejected {
                status: status.as_u16(),
                message: body.message(),
            });
        }

        Ok(response.json::<PredictionResponse>().await?)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
