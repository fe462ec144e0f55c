//! Form controller: submit, render, reset.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, PoisonError,
    },
    time::Duration,
};

use shared::{
    domain::{FormField, InputRecord},
    protocol::PredictionResponse,
    salary,
};
use tracing::{debug, error, info, warn};

use crate::{
    config::ClientSettings,
    error::PredictError,
    view::{FormView, StatusLine, StatusTone},
    PredictionService,
};

pub const PLACED_MESSAGE: &str = "Likely to be Placed! 🎉";
pub const NOT_PLACED_MESSAGE: &str = "Needs Improvement";
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

pub const PLACED_ICON: &str = "✅";
pub const NOT_PLACED_ICON: &str = "📚";
pub const ERROR_ICON: &str = "❌";

pub const FOCUSED_FIELD_SCALE: f32 = 1.02;
pub const RESTING_FIELD_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Hidden,
    Result,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Displayed,
    Failed,
    /// Another submit was still in flight.
    Ignored,
}

pub struct FormController<V, S> {
    view: V,
    service: S,
    results_scroll_delay: Duration,
    in_flight: AtomicBool,
    panel: Mutex<PanelState>,
}

impl<V: FormView, S: PredictionService> FormController<V, S> {
    pub fn new(view: V, service: S, settings: &ClientSettings) -> Self {
        Self {
            view,
            service,
            results_scroll_delay: settings.results_scroll_delay(),
            in_flight: AtomicBool::new(false),
            panel: Mutex::new(PanelState::Hidden),
        }
    }

    pub fn panel_state(&self) -> PanelState {
        *self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Collects the form, asks the service for a prediction and renders the
    /// outcome. Loading state is cleared on every exit path, including when
    /// the returned future is dropped before completion.
    pub async fn submit(&self) -> SubmitOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("submit ignored: prediction already in flight");
            return SubmitOutcome::Ignored;
        }
        let _loading = LoadingGuard::enter(&self.view, &self.in_flight);

        let input = InputRecord::collect(|field| self.view.field_value(field));
        debug!("submitting prediction request");

        match self.service.predict(&input).await {
            Ok(response) => {
                self.display_results(&response);
                SubmitOutcome::Displayed
            }
            Err(PredictError::Rejected { status, message }) => {
                warn!(status, error_body = ?message, "prediction rejected by service");
                let message = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| PREDICTION_FAILED_MESSAGE.to_string());
                self.show_error(&message);
                SubmitOutcome::Failed
            }
            Err(err) => {
                error!(error = %err, "prediction request failed");
                self.show_error(NETWORK_ERROR_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }

    pub fn display_results(&self, response: &PredictionResponse) {
        let (text, icon, tone) = if response.placed {
            (PLACED_MESSAGE, PLACED_ICON, StatusTone::Success)
        } else {
            (NOT_PLACED_MESSAGE, NOT_PLACED_ICON, StatusTone::Warning)
        };
        self.view.set_status(&StatusLine {
            text: text.to_string(),
            icon,
            tone,
            detail: response
                .confidence
                .as_ref()
                .map(|confidence| format!("Confidence: {confidence}")),
        });

        let salary_text = response.displayed_salary().map(salary::format_salary);
        self.view.set_salary(salary_text.as_deref());

        info!(
            placed = response.placed,
            salary = response.salary,
            "prediction displayed"
        );
        self.reveal(PanelState::Result, self.results_scroll_delay);
    }

    pub fn show_error(&self, message: &str) {
        self.view.set_status(&StatusLine {
            text: message.to_string(),
            icon: ERROR_ICON,
            tone: StatusTone::Error,
            detail: None,
        });
        self.view.set_salary(None);
        self.reveal(PanelState::Error, Duration::ZERO);
    }

    pub fn reset(&self) {
        self.view.set_results_visible(false);
        self.set_panel(PanelState::Hidden);
        self.view.reset_fields();
        self.view.scroll_to_top();
        debug!("form reset");
    }

    pub fn focus_field(&self, field: FormField) {
        self.view.set_field_scale(field, FOCUSED_FIELD_SCALE);
    }

    pub fn blur_field(&self, field: FormField) {
        self.view.set_field_scale(field, RESTING_FIELD_SCALE);
    }

    fn reveal(&self, state: PanelState, scroll_delay: Duration) {
        self.set_panel(state);
        self.view.set_results_visible(true);
        self.view.scroll_results_into_view(scroll_delay);
    }

    fn set_panel(&self, state: PanelState) {
        *self.panel.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

struct LoadingGuard<'a> {
    view: &'a dyn FormView,
    in_flight: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn enter(view: &'a dyn FormView, in_flight: &'a AtomicBool) -> Self {
        view.set_submit_loading(true);
        Self { view, in_flight }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.set_submit_loading(false);
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
