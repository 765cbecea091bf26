//! Employee performance dashboard: an egui front-end over a static HR table
//! and a pre-trained performance regressor.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod insights;
pub mod predictor;
pub mod state;
pub mod ui;
