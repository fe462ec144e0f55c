//! Terminal rendition of the prediction form.

use std::{
    fmt::Write as _,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use client_core::{FormView, StatusLine, StatusTone};
use shared::domain::{FormField, InputRecord};

#[derive(Debug, Default)]
struct TerminalState {
    fields: InputRecord,
    loading: bool,
    status: Option<StatusLine>,
    salary: Option<String>,
    results_visible: bool,
}

/// Fields come from the command line; the results panel is rendered as text
/// once the controller is done.
#[derive(Debug, Default)]
pub struct TerminalView {
    state: Mutex<TerminalState>,
}

impl TerminalView {
    pub fn new(fields: InputRecord) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                fields,
                ..TerminalState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, TerminalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Text of the results panel, or `None` while it is hidden or a request
    /// is still pending.
    pub fn render(&self) -> Option<String> {
        let state = self.state();
        if !state.results_visible || state.loading {
            return None;
        }
        let status = state.status.as_ref()?;

        let mut out = String::new();
        let tag = match status.tone {
            StatusTone::Success => "success",
            StatusTone::Warning => "warning",
            StatusTone::Error => "error",
        };
        let _ = writeln!(out, "{} {} [{tag}]", status.icon, status.text);
        if let Some(detail) = &status.detail {
            let _ = writeln!(out, "   {detail}");
        }
        if let Some(salary) = &state.salary {
            let _ = writeln!(out, "   Expected salary: {salary}");
        }
        Some(out)
    }
}

impl FormView for TerminalView {
    fn field_value(&self, field: FormField) -> String {
        self.state().fields.get(field).to_string()
    }

    fn reset_fields(&self) {
        self.state().fields = InputRecord::default();
    }

    fn set_submit_loading(&self, loading: bool) {
        self.state().loading = loading;
        if loading {
            tracing::info!("requesting prediction...");
        }
    }

    fn set_status(&self, status: &StatusLine) {
        self.state().status = Some(status.clone());
    }

    fn set_salary(&self, salary: Option<&str>) {
        self.state().salary = salary.map(str::to_string);
    }

    fn set_results_visible(&self, visible: bool) {
        self.state().results_visible = visible;
    }

    fn scroll_results_into_view(&self, _delay: Duration) {}

    fn scroll_to_top(&self) {}

    fn set_field_scale(&self, _field: FormField, _scale: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(text: &str, icon: &'static str, tone: StatusTone) -> StatusLine {
        StatusLine {
            text: text.to_string(),
            icon,
            tone,
            detail: None,
        }
    }

    #[test]
    fn hidden_panel_renders_nothing() {
        let view = TerminalView::default();
        view.set_status(&status("Needs Improvement", "📚", StatusTone::Warning));
        assert_eq!(view.render(), None);
    }

    #[test]
    fn pending_request_renders_nothing() {
        let view = TerminalView::default();
        view.set_status(&status("Needs Improvement", "📚", StatusTone::Warning));
        view.set_results_visible(true);
        view.set_submit_loading(true);
        assert_eq!(view.render(), None);

        view.set_submit_loading(false);
        assert!(view.render().is_some());
    }

    #[test]
    fn renders_status_and_salary() {
        let view = TerminalView::default();
        view.set_status(&StatusLine {
            detail: Some("Confidence: High".to_string()),
            ..status("Likely to be Placed! 🎉", "✅", StatusTone::Success)
        });
        view.set_salary(Some("₹12.50 LPA"));
        view.set_results_visible(true);

        assert_eq!(
            view.render().as_deref(),
            Some(
                "✅ Likely to be Placed! 🎉 [success]\n   Confidence: High\n   Expected salary: ₹12.50 LPA\n"
            )
        );
    }

    #[test]
    fn reads_fields_from_record_and_resets_them() {
        let view = TerminalView::new(InputRecord {
            iq: "101".into(),
            ..InputRecord::default()
        });
        assert_eq!(view.field_value(FormField::Iq), "101");

        view.reset_fields();
        assert_eq!(view.field_value(FormField::Iq), "");
    }
}
