//! Bridge from the UI thread to the backend worker that owns the async runtime.

pub mod commands;
pub mod runtime;
