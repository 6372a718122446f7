//! Main window: headless controller, egui front-end and dialogs.

pub mod app;
pub mod controller;
pub mod dialogs;
