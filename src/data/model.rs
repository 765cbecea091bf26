use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Employee – one row of the HR table
// ---------------------------------------------------------------------------

/// A single employee record. Field names follow the column headers of the
/// source table so CSV, JSON and Parquet share one mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Position")]
    pub position: String,
    /// Kept as the source text; only ever displayed.
    #[serde(rename = "Joining Date")]
    pub joining_date: String,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Productivity (%)")]
    pub productivity: f64,
    #[serde(rename = "Satisfaction Rate (%)")]
    pub satisfaction: f64,
    #[serde(rename = "Projects Completed")]
    pub projects_completed: u32,
    /// Monthly salary.
    #[serde(rename = "Salary")]
    pub salary: f64,
    #[serde(rename = "Feedback Score")]
    pub feedback_score: f64,
    #[serde(rename = "Gender", default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl Employee {
    pub fn annual_salary(&self) -> f64 {
        self.salary * 12.0
    }
}

/// Numeric columns that can be aggregated across a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Productivity,
    Satisfaction,
    ProjectsCompleted,
    Salary,
    FeedbackScore,
    Age,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::Productivity => "Productivity (%)",
            Metric::Satisfaction => "Satisfaction Rate (%)",
            Metric::ProjectsCompleted => "Projects Completed",
            Metric::Salary => "Salary",
            Metric::FeedbackScore => "Feedback Score",
            Metric::Age => "Age",
        }
    }

    pub fn value(self, employee: &Employee) -> f64 {
        match self {
            Metric::Productivity => employee.productivity,
            Metric::Satisfaction => employee.satisfaction,
            Metric::ProjectsCompleted => employee.projects_completed as f64,
            Metric::Salary => employee.salary,
            Metric::FeedbackScore => employee.feedback_score,
            Metric::Age => employee.age as f64,
        }
    }
}

// ---------------------------------------------------------------------------
// EmployeeDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with the department index pre-computed.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDataset {
    /// All rows, in file order.
    pub employees: Vec<Employee>,
    /// Unique departments in order of first appearance.
    departments: Vec<String>,
}

impl EmployeeDataset {
    pub fn from_employees(employees: Vec<Employee>) -> Self {
        let mut departments: Vec<String> = Vec::new();
        for emp in &employees {
            if !departments.contains(&emp.department) {
                departments.push(emp.department.clone());
            }
        }
        EmployeeDataset {
            employees,
            departments,
        }
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn departments(&self) -> &[String] {
        &self.departments
    }

    pub fn get(&self, row: usize) -> Option<&Employee> {
        self.employees.get(row)
    }

    /// Rows belonging to `department`, with their row index.
    pub fn department_members<'a>(
        &'a self,
        department: &'a str,
    ) -> impl Iterator<Item = (usize, &'a Employee)> + 'a {
        self.employees
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.department == department)
    }

    /// Arithmetic mean of `metric` over a department, `None` when it has no rows.
    pub fn department_mean(&self, department: &str, metric: Metric) -> Option<f64> {
        let (sum, count) = self
            .department_members(department)
            .fold((0.0, 0usize), |(sum, n), (_, e)| (sum + metric.value(e), n + 1));
        (count > 0).then(|| sum / count as f64)
    }

    /// Column maximum over the whole table, `None` when empty.
    pub fn column_max(&self, metric: Metric) -> Option<f64> {
        self.employees
            .iter()
            .map(|e| metric.value(e))
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
    }

    pub fn max_salary(&self) -> Option<f64> {
        self.column_max(Metric::Salary)
    }

    pub fn max_projects(&self) -> Option<f64> {
        self.column_max(Metric::ProjectsCompleted)
    }
}
