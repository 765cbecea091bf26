use eframe::egui;
use employee_dashboard::app::EmployeeDashboardApp;
use employee_dashboard::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::from_env();
    log::info!(
        "starting with data {} and model {}",
        config.data_path.display(),
        config.model_path.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "📊 Employee Performance Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(EmployeeDashboardApp::new(&config)))),
    )
}
