//! Widget state of the prediction form and its `FormView` binding.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant},
};

use client_core::{FormView, StatusLine};
use shared::domain::{FormField, InputRecord};

/// Everything the window renders. Written by the controller through
/// [`GuiFormView`], read by the UI thread every frame.
#[derive(Debug, Clone, Default)]
pub struct FormModel {
    pub fields: InputRecord,
    pub field_scales: HashMap<FormField, f32>,
    pub submit_loading: bool,
    pub status: Option<StatusLine>,
    pub salary: Option<String>,
    pub results_visible: bool,
    pub scroll_results_at: Option<Instant>,
    pub scroll_to_top: bool,
}

impl FormModel {
    pub fn field_scale(&self, field: FormField) -> f32 {
        self.field_scales.get(&field).copied().unwrap_or(1.0)
    }
}

pub type SharedFormModel = Arc<Mutex<FormModel>>;

pub fn lock_model(model: &SharedFormModel) -> MutexGuard<'_, FormModel> {
    model.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
pub struct GuiFormView {
    model: SharedFormModel,
    ctx: egui::Context,
}

impl GuiFormView {
    pub fn new(model: SharedFormModel, ctx: egui::Context) -> Self {
        Self { model, ctx }
    }

    fn update(&self, apply: impl FnOnce(&mut FormModel)) {
        apply(&mut lock_model(&self.model));
        self.ctx.request_repaint();
    }
}

impl FormView for GuiFormView {
    fn field_value(&self, field: FormField) -> String {
        lock_model(&self.model).fields.get(field).to_string()
    }

    fn reset_fields(&self) {
        self.update(|model| {
            model.fields = InputRecord::default();
            model.field_scales.clear();
        });
    }

    fn set_submit_loading(&self, loading: bool) {
        self.update(|model| model.submit_loading = loading);
    }

    fn set_status(&self, status: &StatusLine) {
        self.update(|model| model.status = Some(status.clone()));
    }

    fn set_salary(&self, salary: Option<&str>) {
        self.update(|model| model.salary = salary.map(str::to_string));
    }

    fn set_results_visible(&self, visible: bool) {
        self.update(|model| {
            model.results_visible = visible;
            if !visible {
                model.scroll_results_at = None;
            }
        });
    }

    fn scroll_results_into_view(&self, delay: Duration) {
        self.update(|model| model.scroll_results_at = Some(Instant::now() + delay));
        if !delay.is_zero() {
            self.ctx.request_repaint_after(delay);
        }
    }

    fn scroll_to_top(&self) {
        self.update(|model| model.scroll_to_top = true);
    }

    fn set_field_scale(&self, field: FormField, scale: f32) {
        self.update(|model| {
            model.field_scales.insert(field, scale);
        });
    }
}
