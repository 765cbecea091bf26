use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EmployeeDashboardApp {
    pub state: AppState,
}

impl EmployeeDashboardApp {
    /// Build the app and load the configured dataset and model. Missing
    /// files are reported in the top bar; the app still starts.
    pub fn new(config: &AppConfig) -> Self {
        let mut state = AppState::default();
        state.load_dataset_file(&config.data_path);

        // Keep a dataset error visible if the model loads fine.
        let dataset_error = state.status_message.take();
        state.load_model_file(&config.model_path);
        if let Some(err) = dataset_error {
            state.status_message = Some(match state.status_message.take() {
                Some(model_err) => format!("{err}  |  {model_err}"),
                None => err,
            });
        }

        Self { state }
    }
}

impl eframe::App for EmployeeDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selectors ----
        egui::SidePanel::left("selection_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and details ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &self.state);
        });
    }
}
