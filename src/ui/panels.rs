use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::insights;
use crate::state::AppState;
use crate::ui::{charts, details};

// ---------------------------------------------------------------------------
// Left side panel – department / employee selection
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Employees");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state after the widgets.
    let departments = dataset.departments().to_vec();
    let options: Vec<(usize, String)> = state
        .employee_options()
        .into_iter()
        .map(|(row, name)| (row, name.to_string()))
        .collect();

    let mut picked_department: Option<String> = None;
    let mut picked_row: Option<usize> = None;

    // ---- Department selector ----
    ui.strong("Select Department");
    let current_dept = state.selected_department.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("department")
        .selected_text(
            RichText::new(&current_dept).color(state.department_colors.color_for(&current_dept)),
        )
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for dept in &departments {
                let text = RichText::new(dept).color(state.department_colors.color_for(dept));
                if ui.selectable_label(current_dept == *dept, text).clicked() {
                    picked_department = Some(dept.clone());
                }
            }
        });
    ui.add_space(8.0);

    // ---- Employee selector ----
    ui.strong("Select Employee");
    let current_name = state
        .selected_employee()
        .map(|e| e.name.clone())
        .unwrap_or_default();
    egui::ComboBox::from_id_salt("employee")
        .selected_text(&current_name)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (row, name) in &options {
                if ui
                    .selectable_label(state.selected_row == Some(*row), name)
                    .clicked()
                {
                    picked_row = Some(*row);
                }
            }
        });
    ui.separator();

    // ---- Department roster ----
    ui.strong(format!("Department roster ({})", options.len()));
    if let Some(row) = department_roster(ui, state) {
        picked_row = Some(row);
    }

    if let Some(dept) = picked_department {
        log::debug!("department selected: {dept}");
        state.select_department(&dept);
    } else if let Some(row) = picked_row {
        state.select_employee(row);
    }
}

/// Table of the selected department's employees. Returns the row that was
/// clicked, if any.
fn department_roster(ui: &mut Ui, state: &AppState) -> Option<usize> {
    let dataset = state.dataset.as_ref()?;
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(320.0)
        .column(Column::remainder())
        .column(Column::auto())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Name");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Position");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Productivity");
            });
        })
        .body(|mut body| {
            for &row in &state.department_rows {
                let Some(emp) = dataset.get(row) else {
                    continue;
                };
                body.row(18.0, |mut table_row| {
                    table_row.col(|ui: &mut Ui| {
                        if ui
                            .selectable_label(state.selected_row == Some(row), &emp.name)
                            .clicked()
                        {
                            clicked = Some(row);
                        }
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(&emp.position);
                    });
                    table_row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.1}%", emp.productivity));
                    });
                });
            }
        });

    clicked
}

// ---------------------------------------------------------------------------
// Central panel – charts and details for the selected employee
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(employee)) = (&state.dataset, state.selected_employee()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = if state.dataset.is_none() {
                "Open an employee dataset to begin  (File → Open dataset…)"
            } else {
                "Select a department and an employee"
            };
            ui.heading(hint);
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let name = employee.name.as_str();
            ui.heading(format!("Performance Insights for {name}"));
            ui.add_space(8.0);

            charts::performance_pie(ui, name, &insights::performance_breakdown(employee));
            ui.separator();
            charts::metrics_chart(ui, name, &insights::performance_metrics(employee));
            ui.separator();
            charts::salary_vs_projects_chart(
                ui,
                name,
                &insights::salary_vs_projects(dataset, employee),
            );
            ui.separator();
            charts::peer_chart(ui, name, &insights::peer_comparison(dataset, employee));
            ui.separator();

            details::prediction_banner(ui, state.model.as_ref(), employee);
            ui.add_space(8.0);
            details::employee_details(ui, employee);
            ui.add_space(8.0);
            details::salary_details(ui, employee);
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_dataset_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open model…").clicked() {
                open_model_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} employees, {} departments",
                ds.len(),
                ds.departments().len()
            ));
            ui.separator();
        }

        match &state.model {
            Some(model) => ui.label(format!("Model: {}", model.describe())),
            None => ui.label("No model loaded"),
        };

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_dataset_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open employee data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_dataset_file(&path);
    }
}

pub fn open_model_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open performance model")
        .add_filter("Model (JSON)", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_model_file(&path);
    }
}
