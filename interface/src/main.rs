use lab_interface::{consts, LabApp, LabConfig};

fn main() -> eframe::Result {
    tracing_subscriber::fmt::init();

    let config = LabConfig::from_env();
    log::info!(
        "starting {} at {}x{}",
        consts::APP_TITLE,
        config.window_width,
        config.window_height
    );
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(consts::APP_TITLE)
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size(consts::MIN_WINDOW_SIZE),
        ..Default::default()
    };
    eframe::run_native(
        consts::APP_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(LabApp::new(cc, config)))),
    )
}
