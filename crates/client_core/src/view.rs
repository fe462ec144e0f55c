//! The markup contract of the prediction form.
//!
//! A [`FormView`] is handed to the controller at construction and stands in
//! for every element the controller touches: the eight inputs, the submit
//! button with its label, icon and loader, the results panel with its
//! status line, icon and salary row, and the page scroll position.

use std::{sync::Arc, time::Duration};

use shared::domain::FormField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Success,
    Warning,
    Error,
}

/// Content of the placement status line and its icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub icon: &'static str,
    pub tone: StatusTone,
    /// Secondary text under the status, e.g. the service's confidence.
    pub detail: Option<String>,
}

pub trait FormView: Send + Sync {
    /// Current value of an input, verbatim.
    fn field_value(&self, field: FormField) -> String;

    /// Restores every input to its default (empty) value.
    fn reset_fields(&self);

    /// Disables the submit button and swaps its label and icon for the
    /// loader, or restores it.
    fn set_submit_loading(&self, loading: bool);

    fn set_status(&self, status: &StatusLine);

    /// `Some` shows the salary row with the given text, `None` hides it.
    fn set_salary(&self, salary: Option<&str>);

    fn set_results_visible(&self, visible: bool);

    /// Smoothly brings the results panel into view once `delay` has elapsed.
    fn scroll_results_into_view(&self, delay: Duration);

    fn scroll_to_top(&self);

    /// Scales the element containing `field`; `1.0` is the resting size.
    fn set_field_scale(&self, field: FormField, scale: f32);
}

impl<V: FormView + ?Sized> FormView for Arc<V> {
    fn field_value(&self, field: FormField) -> String {
        (**self).field_value(field)
    }

    fn reset_fields(&self) {
        (**self).reset_fields()
    }

    fn set_submit_loading(&self, loading: bool) {
        (**self).set_submit_loading(loading)
    }

    fn set_status(&self, status: &StatusLine) {
        (**self).set_status(status)
    }

    fn set_salary(&self, salary: Option<&str>) {
        (**self).set_salary(salary)
    }

    fn set_results_visible(&self, visible: bool) {
        (**self).set_results_visible(visible)
    }

    fn scroll_results_into_view(&self, delay: Duration) {
        (**self).scroll_results_into_view(delay)
    }

    fn scroll_to_top(&self) {
        (**self).scroll_to_top()
    }

    fn set_field_scale(&self, field: FormField, scale: f32) {
        (**self).set_field_scale(field, scale)
    }
}
