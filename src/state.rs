use std::path::Path;

use crate::color::DepartmentColors;
use crate::data::filter::employee_rows;
use crate::data::loader;
use crate::data::model::{Employee, EmployeeDataset};
use crate::predictor::{self, PerformanceModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded employee table (None until a file is loaded).
    pub dataset: Option<EmployeeDataset>,

    /// Loaded performance model (None until a file is loaded).
    pub model: Option<PerformanceModel>,

    /// Department chosen in the side panel.
    pub selected_department: Option<String>,

    /// Rows of `selected_department`, in table order (cached).
    pub department_rows: Vec<usize>,

    /// Row index of the chosen employee; always one of `department_rows`.
    pub selected_row: Option<usize>,

    /// Colours for department labels.
    pub department_colors: DepartmentColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset and select its first department.
    pub fn set_dataset(&mut self, dataset: EmployeeDataset) {
        self.department_colors = DepartmentColors::new(dataset.departments());
        let first = dataset.departments().first().cloned();
        self.dataset = Some(dataset);
        self.status_message = None;

        match first {
            Some(dept) => self.select_department(&dept),
            None => {
                self.selected_department = None;
                self.department_rows.clear();
                self.selected_row = None;
            }
        }
    }

    pub fn set_model(&mut self, model: PerformanceModel) {
        self.model = Some(model);
        self.status_message = None;
    }

    /// Load a dataset file, reporting failures through `status_message`.
    pub fn load_dataset_file(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                if dataset.is_empty() {
                    log::warn!("{} contains no employees", path.display());
                }
                log::info!(
                    "Loaded {} employees in {} departments from {}",
                    dataset.len(),
                    dataset.departments().len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Load a model file, reporting failures through `status_message`.
    pub fn load_model_file(&mut self, path: &Path) {
        match predictor::load_model(path) {
            Ok(model) => {
                log::info!("Loaded {} from {}", model.describe(), path.display());
                self.set_model(model);
            }
            Err(e) => {
                log::error!("Failed to load model: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Switch department and select its first employee.
    pub fn select_department(&mut self, department: &str) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.department_rows = employee_rows(ds, department);
        self.selected_row = self.department_rows.first().copied();
        self.selected_department = Some(department.to_string());
    }

    /// Select an employee by row. Rows outside the current department are
    /// ignored; returns whether the selection changed.
    pub fn select_employee(&mut self, row: usize) -> bool {
        if !self.department_rows.contains(&row) || self.selected_row == Some(row) {
            return false;
        }
        self.selected_row = Some(row);
        true
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        let ds = self.dataset.as_ref()?;
        ds.get(self.selected_row?)
    }

    /// `(row, name)` pairs for the employee selector.
    pub fn employee_options(&self) -> Vec<(usize, &str)> {
        let Some(ds) = &self.dataset else {
            return Vec::new();
        };
        self.department_rows
            .iter()
            .filter_map(|&row| ds.get(row).map(|e| (row, e.name.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn new_dataset_selects_first_department_and_employee() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());

        assert_eq!(state.selected_department.as_deref(), Some("Sales"));
        assert_eq!(state.department_rows, vec![0, 2]);
        assert_eq!(state.selected_employee().unwrap().name, "Alice");
    }

    #[test]
    fn department_change_resets_employee() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        assert!(state.select_employee(2));

        state.select_department("IT");
        assert_eq!(state.selected_employee().unwrap().name, "Bob");
        assert_eq!(state.employee_options(), vec![(1, "Bob")]);
    }

    #[test]
    fn employee_outside_department_is_rejected() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());

        assert!(!state.select_employee(1));
        assert!(!state.select_employee(42));
        assert_eq!(state.selected_row, Some(0));
    }

    #[test]
    fn empty_department_has_no_selection() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        state.select_department("Legal");

        assert!(state.department_rows.is_empty());
        assert!(state.selected_employee().is_none());
    }

    #[test]
    fn empty_dataset() {
        let mut state = AppState::default();
        state.set_dataset(EmployeeDataset::default());
        assert!(state.selected_department.is_none());
        assert!(state.employee_options().is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        state.load_dataset_file(Path::new("/nonexistent/hr_dashboard_data.csv"));

        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(state.dataset.as_ref().unwrap().len(), 3);
        assert_eq!(state.selected_employee().unwrap().name, "Alice");
    }

    #[test]
    fn failed_model_load_reports_status() {
        let mut state = AppState::default();
        state.load_model_file(Path::new("/nonexistent/performance_model.json"));
        assert!(state.model.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn nothing_loaded() {
        let mut state = AppState::default();
        state.select_department("Sales");
        assert!(state.selected_department.is_none());
        assert!(state.selected_employee().is_none());
    }
}
