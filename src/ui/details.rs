use eframe::egui::{self, Color32, Margin, RichText, Stroke, Ui};

use crate::data::model::Employee;
use crate::insights::{self, format_amount};
use crate::predictor::{PerformanceModel, predict_performance};

const SUCCESS_FILL: Color32 = Color32::from_rgb(0xd4, 0xed, 0xda);
const SUCCESS_STROKE: Color32 = Color32::from_rgb(0x28, 0xa7, 0x45);
const SUCCESS_TEXT: Color32 = Color32::from_rgb(0x15, 0x57, 0x24);

/// Green banner with the predicted score, or a warning when no score can be
/// produced.
pub fn prediction_banner(ui: &mut Ui, model: Option<&PerformanceModel>, employee: &Employee) {
    let Some(model) = model else {
        ui.colored_label(
            Color32::from_rgb(0xb3, 0x6b, 0x00),
            "No performance model loaded (File → Open model…)",
        );
        return;
    };

    match predict_performance(model, employee) {
        Ok(score) => {
            egui::Frame::default()
                .fill(SUCCESS_FILL)
                .stroke(Stroke::new(1.0, SUCCESS_STROKE))
                .inner_margin(Margin::same(10))
                .show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(score.to_string()).color(SUCCESS_TEXT).strong());
                });
        }
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Prediction failed: {e}"));
        }
    }
}

pub fn employee_details(ui: &mut Ui, employee: &Employee) {
    ui.heading("Employee Details:");
    for (label, value) in insights::employee_details(employee) {
        ui.monospace(format!("{label}: {value}"));
    }
}

pub fn salary_details(ui: &mut Ui, employee: &Employee) {
    let salary = insights::salary_details(employee);
    ui.heading("Salary Details:");
    ui.monospace(format!("Monthly Salary: ${}", format_amount(salary.monthly)));
    ui.monospace(format!("Annual Salary: ${}", format_amount(salary.annual)));
}
