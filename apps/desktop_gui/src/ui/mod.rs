//! UI layer for the desktop predictor: app shell, form view binding and theme.

pub mod app;
pub mod theme;
pub mod view;

use client_core::{FormController, PredictionClient};

pub use app::PredictorApp;
pub use view::{GuiFormView, SharedFormModel};

pub type GuiController = FormController<GuiFormView, PredictionClient>;
