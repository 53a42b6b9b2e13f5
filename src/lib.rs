//! Company ratings, reviews and hiring dashboard.
//!
//! The `data` layer loads and cleans a company file and derives filtered
//! views; `state` holds the UI state; `app` and `ui` render it with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
