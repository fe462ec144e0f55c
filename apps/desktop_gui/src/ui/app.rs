use std::{collections::BTreeSet, sync::Arc, time::Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{FieldKind, FormField};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::ui::{
    theme,
    view::{lock_model, FormModel, SharedFormModel},
    GuiController,
};

const CARD_MAX_WIDTH: f32 = 620.0;
const MAX_FIELD_GROW: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Reset,
    Focus(FormField),
    Blur(FormField),
}

/// Focus/blur actions for the difference between two frames' focused fields.
pub fn focus_transitions(
    previous: &BTreeSet<FormField>,
    current: &BTreeSet<FormField>,
) -> Vec<FormAction> {
    previous
        .difference(current)
        .map(|field| FormAction::Blur(*field))
        .chain(
            current
                .difference(previous)
                .map(|field| FormAction::Focus(*field)),
        )
        .collect()
}

pub struct PredictorApp {
    model: SharedFormModel,
    controller: Arc<GuiController>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    endpoint: String,
    status: String,
    status_is_error: bool,
    focused: BTreeSet<FormField>,
}

impl PredictorApp {
    pub fn new(
        model: SharedFormModel,
        controller: Arc<GuiController>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        endpoint: String,
    ) -> Self {
        Self {
            model,
            controller,
            cmd_tx,
            ui_rx,
            endpoint,
            status: "Backend worker starting...".to_string(),
            status_is_error: false,
            focused: BTreeSet::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if event.is_error() {
                tracing::warn!("backend: {}", event.message());
            }
            self.status_is_error = event.is_error();
            self.status = event.message().to_string();
        }
    }

    fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::Submit => {
                dispatch_backend_command(&self.cmd_tx, BackendCommand::Submit, &mut self.status)
            }
            FormAction::Reset => {
                dispatch_backend_command(&self.cmd_tx, BackendCommand::Reset, &mut self.status)
            }
            FormAction::Focus(field) => self.controller.focus_field(field),
            FormAction::Blur(field) => self.controller.blur_field(field),
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                let text = egui::RichText::new(&self.status).small();
                if self.status_is_error {
                    ui.label(text.color(theme::ERROR));
                } else {
                    ui.label(text.weak());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.endpoint).weak());
                });
            });
        });
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        let mut actions = Vec::new();
        let mut focused_now = BTreeSet::new();
        let model = Arc::clone(&self.model);
        {
            let mut model = lock_model(&model);
            let now = Instant::now();
            let scroll_results = match model.scroll_results_at {
                Some(at) if at <= now => {
                    model.scroll_results_at = None;
                    true
                }
                Some(at) => {
                    ctx.request_repaint_after(at - now);
                    false
                }
                None => false,
            };
            let scroll_top = std::mem::take(&mut model.scroll_to_top);

            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.set_width(ui.available_width().min(CARD_MAX_WIDTH));
                            ui.add_space(16.0);
                            let header = ui.heading("🎓 Placement Predictor");
                            if scroll_top {
                                header.scroll_to_me(Some(egui::Align::TOP));
                            }
                            ui.weak("Enter academic details to predict placement and expected salary.");
                            ui.add_space(10.0);

                            form_card(ui, &mut model, &mut actions, &mut focused_now);

                            if model.results_visible {
                                ui.add_space(14.0);
                                let card = results_card(ui, &model, &mut actions);
                                if scroll_results {
                                    card.scroll_to_me(Some(egui::Align::Center));
                                }
                            }
                            ui.add_space(24.0);
                        });
                    });
            });
        }

        actions.extend(focus_transitions(&self.focused, &focused_now));
        self.focused = focused_now;
        for action in actions {
            self.apply(action);
        }
    }
}

fn form_card(
    ui: &mut egui::Ui,
    model: &mut FormModel,
    actions: &mut Vec<FormAction>,
    focused: &mut BTreeSet<FormField>,
) {
    egui::Frame::NONE
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(14.0)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .inner_margin(egui::Margin::symmetric(20, 18))
        .show(ui, |ui| {
            ui.columns(2, |columns| {
                for (index, field) in FormField::ALL.into_iter().enumerate() {
                    let column = &mut columns[index % 2];
                    if field_editor(column, field, model, actions) {
                        focused.insert(field);
                    }
                    column.add_space(6.0);
                }
            });

            ui.add_space(8.0);
            submit_button(ui, model.submit_loading, actions);
        });
}

/// Renders one input inside its scalable container. Returns whether it holds focus.
fn field_editor(
    ui: &mut egui::Ui,
    field: FormField,
    model: &mut FormModel,
    actions: &mut Vec<FormAction>,
) -> bool {
    let scale = ui.ctx().animate_value_with_time(
        egui::Id::new(("field_scale", field.id())),
        model.field_scale(field),
        0.15,
    );
    let grow = ((scale - 1.0) * ui.available_width() / 2.0)
        .round()
        .clamp(0.0, MAX_FIELD_GROW) as i8;

    let mut has_focus = false;
    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(10.0)
        .inner_margin(egui::Margin::same(10 + grow))
        .outer_margin(egui::Margin::same(-grow))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(field.label()).strong());
            let value = model.fields.get_mut(field);
            match field.kind() {
                FieldKind::Numeric => {
                    let edit = egui::TextEdit::singleline(value)
                        .id_salt(field.id())
                        .hint_text(field.hint())
                        .desired_width(f32::INFINITY);
                    let response = ui.add_sized([ui.available_width(), 30.0], edit);
                    has_focus = response.has_focus();
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        actions.push(FormAction::Submit);
                    }
                }
                FieldKind::Choice(options) => {
                    let selected = if value.is_empty() {
                        field.hint().to_string()
                    } else {
                        value.clone()
                    };
                    let combo = egui::ComboBox::from_id_salt(field.id())
                        .selected_text(selected)
                        .width(ui.available_width())
                        .show_ui(ui, |ui| {
                            for option in options {
                                ui.selectable_value(value, option.to_string(), *option);
                            }
                        });
                    has_focus = combo.inner.is_some() || combo.response.has_focus();
                }
            }
        });
    has_focus
}

fn submit_button(ui: &mut egui::Ui, loading: bool, actions: &mut Vec<FormAction>) {
    let size = egui::vec2(ui.available_width(), 42.0);
    if loading {
        ui.add_enabled_ui(false, |ui| {
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 10.0, theme::ACCENT.gamma_multiply(0.45));
            ui.put(
                rect,
                egui::Spinner::new().size(20.0).color(egui::Color32::WHITE),
            );
        });
        return;
    }

    let button = egui::Button::new(
        egui::RichText::new("🔮  Predict Placement")
            .strong()
            .size(16.0)
            .color(egui::Color32::WHITE),
    )
    .fill(theme::ACCENT)
    .corner_radius(10.0)
    .min_size(size);
    if ui.add(button).clicked() {
        actions.push(FormAction::Submit);
    }
}

fn results_card(
    ui: &mut egui::Ui,
    model: &FormModel,
    actions: &mut Vec<FormAction>,
) -> egui::Response {
    egui::Frame::NONE
        .fill(ui.visuals().extreme_bg_color)
        .corner_radius(14.0)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .inner_margin(egui::Margin::symmetric(20, 18))
        .show(ui, |ui| {
            ui.label(egui::RichText::new("Prediction Results").strong().size(18.0));
            ui.add_space(6.0);

            if let Some(status) = &model.status {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(status.icon).size(28.0));
                    ui.vertical(|ui| {
                        ui.weak("Placement Status");
                        ui.label(
                            egui::RichText::new(&status.text)
                                .strong()
                                .size(18.0)
                                .color(theme::tone_color(status.tone)),
                        );
                        if let Some(detail) = &status.detail {
                            ui.small(egui::RichText::new(detail).weak());
                        }
                    });
                });
            }

            if let Some(salary) = &model.salary {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("💰").size(28.0));
                    ui.vertical(|ui| {
                        ui.weak("Expected Salary");
                        ui.label(
                            egui::RichText::new(salary)
                                .strong()
                                .size(18.0)
                                .color(theme::SUCCESS),
                        );
                    });
                });
            }

            ui.add_space(10.0);
            if ui
                .add(
                    egui::Button::new("🔄  Try Again")
                        .min_size(egui::vec2(ui.available_width(), 34.0)),
                )
                .clicked()
            {
                actions.push(FormAction::Reset);
            }
        })
        .response
}
