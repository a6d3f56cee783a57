pub const APP_TITLE: &str = "Digital Logic Lab";

pub const DASHBOARD_WIDTH: f32 = 230.0;
pub const TUTOR_PANEL_WIDTH: f32 = 340.0;
pub const MIN_WINDOW_SIZE: [f32; 2] = [900.0, 560.0];

pub const TOGGLE_SIZE: egui::Vec2 = egui::vec2(44.0, 28.0);
pub const LAMP_SIZE: egui::Vec2 = egui::vec2(64.0, 36.0);
pub const PULSE_SIZE: egui::Vec2 = egui::vec2(120.0, 32.0);

pub const RED_COL: egui::Color32 = egui::Color32::from_rgb(139, 0, 0);
pub const GREEN_COL: egui::Color32 = egui::Color32::from_rgb(34, 139, 34);
pub const HINT_COL: egui::Color32 = egui::Color32::from_rgb(200, 160, 60);
pub const MUTED_COL: egui::Color32 = egui::Color32::GRAY;
