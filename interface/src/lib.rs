//! egui shell of the digital logic lab: a dashboard of experiments, the
//! interactive bench and the step tutor side by side.

pub mod app;
pub mod bench_ui;
pub mod config;
pub mod consts;
pub mod tutor_panel;
pub mod update_ops;
pub mod utils;

pub use app::LabApp;
pub use config::LabConfig;
