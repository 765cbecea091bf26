use super::model::EmployeeDataset;

// ---------------------------------------------------------------------------
// Department filter
// ---------------------------------------------------------------------------

/// Row indices of the employees whose department equals `department`,
/// in table order.
pub fn employee_rows(dataset: &EmployeeDataset, department: &str) -> Vec<usize> {
    dataset
        .department_members(department)
        .map(|(i, _)| i)
        .collect()
}
