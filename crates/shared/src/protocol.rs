use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `POST /api/predict`.
///
/// Missing `placed`/`salary` decode as `false`/`0`, which renders the same
/// as an explicit negative prediction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub placed: bool,
    #[serde(default)]
    pub salary: f64,
    /// Not shown for a success status; decoded loosely so an odd type here
    /// does not fail the whole response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

impl PredictionResponse {
    pub fn placed(salary: f64) -> Self {
        Self {
            placed: true,
            salary,
            ..Self::default()
        }
    }

    pub fn not_placed() -> Self {
        Self::default()
    }

    pub fn with_confidence(mut self, confidence: impl Into<String>) -> Self {
        self.confidence = Some(confidence.into());
        self
    }

    /// Salary worth showing: only for a positive placement with a positive amount.
    pub fn displayed_salary(&self) -> Option<f64> {
        (self.placed && self.salary > 0.0).then_some(self.salary)
    }
}
