//! Colors shared by the form and results panel.

use client_core::StatusTone;
use egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(99, 102, 241);
pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11);
pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);

pub fn tone_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Success => SUCCESS,
        StatusTone::Warning => WARNING,
        StatusTone::Error => ERROR,
    }
}

pub fn apply(ctx: &egui::Context) {
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.visuals.selection.bg_fill = ACCENT;
        style.visuals.hyperlink_color = ACCENT;
    });
}
