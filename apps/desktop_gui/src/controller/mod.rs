//! Controller layer: backend status events and command orchestration.

pub mod events;
pub mod orchestration;
