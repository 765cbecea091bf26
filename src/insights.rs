//! Chart and text data derived from one employee row.
//!
//! Everything here is pure so the UI layer only has to draw.

use crate::data::model::{Employee, EmployeeDataset, Metric};

/// One labelled bar with the text drawn above it.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricBar {
    pub label: String,
    pub value: f64,
    pub annotation: String,
}

/// One pie wedge. `share` is the wedge's percentage of the whole pie; a
/// negative `value` gets no wedge (share 0).
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeerMetric {
    pub label: String,
    pub employee: f64,
    pub department_average: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryDetails {
    pub monthly: f64,
    pub annual: f64,
}

/// Whole numbers print without a fractional part, everything else with the
/// shortest exact representation (`5100.5`).
pub fn format_amount(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

fn percent_label(v: f64) -> String {
    format!("{v:.1}%")
}

// ---------------------------------------------------------------------------
// Raw metrics bar chart
// ---------------------------------------------------------------------------

pub fn performance_metrics(employee: &Employee) -> Vec<MetricBar> {
    [
        Metric::Productivity,
        Metric::Satisfaction,
        Metric::ProjectsCompleted,
        Metric::Salary,
    ]
    .into_iter()
    .map(|metric| {
        let label = metric.label();
        let value = metric.value(employee);
        let annotation = if label.contains('%') {
            percent_label(value)
        } else {
            format_amount(value)
        };
        MetricBar {
            label: label.to_string(),
            value,
            annotation,
        }
    })
    .collect()
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

pub fn performance_breakdown(employee: &Employee) -> Vec<PieSlice> {
    let parts = [
        Metric::Productivity,
        Metric::Satisfaction,
        Metric::FeedbackScore,
    ]
    .map(|m| (m.label(), m.value(employee)));

    let weight = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let total: f64 = parts.iter().map(|&(_, v)| weight(v)).sum();
    parts
        .into_iter()
        .map(|(label, value)| PieSlice {
            label: label.to_string(),
            value,
            share: if total > 0.0 { weight(value) / total * 100.0 } else { 0.0 },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Salary vs. projects, normalized against the column maxima
// ---------------------------------------------------------------------------

pub fn salary_vs_projects(dataset: &EmployeeDataset, employee: &Employee) -> Vec<MetricBar> {
    let pct_of = |value: f64, max: Option<f64>| match max {
        Some(m) if m > 0.0 => value / m * 100.0,
        _ => 0.0,
    };

    let salary = pct_of(employee.salary, dataset.max_salary());
    let projects = pct_of(employee.projects_completed as f64, dataset.max_projects());

    [("Salary (%)", salary), ("Projects Completed (%)", projects)]
        .into_iter()
        .map(|(label, value)| MetricBar {
            label: label.to_string(),
            value,
            annotation: percent_label(value),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Peer benchmarking
// ---------------------------------------------------------------------------

pub fn peer_comparison(dataset: &EmployeeDataset, employee: &Employee) -> Vec<PeerMetric> {
    [Metric::Productivity, Metric::Satisfaction]
        .into_iter()
        .map(|metric| {
            let value = metric.value(employee);
            PeerMetric {
                label: metric.label().to_string(),
                employee: value,
                // The employee always counts toward their own department; an
                // employee outside the dataset is compared against themselves.
                department_average: dataset
                    .department_mean(&employee.department, metric)
                    .unwrap_or(value),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text blocks
// ---------------------------------------------------------------------------

pub fn salary_details(employee: &Employee) -> SalaryDetails {
    SalaryDetails {
        monthly: employee.salary,
        annual: employee.annual_salary(),
    }
}

pub fn employee_details(employee: &Employee) -> Vec<(&'static str, String)> {
    vec![
        ("Name", employee.name.clone()),
        ("Department", employee.department.clone()),
        ("Position", employee.position.clone()),
        ("Joining Date", employee.joining_date.clone()),
        ("Age", employee.age.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{employee, sample_dataset};

    #[test]
    fn metric_bars_format_percentages() {
        let mut e = employee("Jane", "HR");
        e.productivity = 57.0;
        e.satisfaction = 25.3;
        e.projects_completed = 11;
        e.salary = 63596.0;

        let bars = performance_metrics(&e);
        let labels: Vec<_> = bars.iter().map(|b| b.annotation.as_str()).collect();
        assert_eq!(labels, ["57.0%", "25.3%", "11", "63596"]);
        assert_eq!(bars[3].label, "Salary");
        assert_eq!(bars[3].value, 63596.0);
    }

    #[test]
    fn pie_shares_sum_to_hundred() {
        let mut e = employee("Jane", "HR");
        e.productivity = 60.0;
        e.satisfaction = 36.0;
        e.feedback_score = 4.0;

        let slices = performance_breakdown(&e);
        assert_eq!(slices.len(), 3);
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert!(close(slices[0].share, 60.0));
        assert!(close(slices[1].share, 36.0));
        assert!(close(slices[2].share, 4.0));
        assert!(close(slices.iter().map(|s| s.share).sum::<f64>(), 100.0));
        assert_eq!(slices[2].label, "Feedback Score");
    }

    #[test]
    fn pie_with_zero_total() {
        let mut e = employee("Jane", "HR");
        e.productivity = 0.0;
        e.satisfaction = 0.0;
        e.feedback_score = 0.0;
        assert!(performance_breakdown(&e).iter().all(|s| s.share == 0.0));
    }

    #[test]
    fn pie_ignores_negative_values() {
        let mut e = employee("Jane", "HR");
        e.productivity = 60.0;
        e.satisfaction = 40.0;
        e.feedback_score = -10.0;

        let slices = performance_breakdown(&e);
        assert_eq!(slices[2].value, -10.0);
        assert_eq!(slices[2].share, 0.0);
        assert!(slices.iter().all(|s| s.share >= 0.0));
        let sum: f64 = slices.iter().map(|s| s.share).sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((slices[0].share - 60.0).abs() < 1e-9);
    }

    #[test]
    fn pie_with_only_negative_values() {
        let mut e = employee("Jane", "HR");
        e.productivity = -5.0;
        e.satisfaction = 0.0;
        e.feedback_score = -1.0;
        assert!(performance_breakdown(&e).iter().all(|s| s.share == 0.0));
    }

    #[test]
    fn normalized_against_table_maxima() {
        let ds = sample_dataset();
        let alice = ds.get(0).unwrap();
        assert_eq!(alice.name, "Alice");
        let bars = salary_vs_projects(&ds, alice);

        assert_eq!(bars[0].label, "Salary (%)");
        assert_eq!(bars[0].value, 75.0);
        assert!((bars[1].value - 80.0).abs() < 1e-9);
        assert_eq!(bars[1].annotation, "80.0%");
    }

    #[test]
    fn normalized_zero_maximum() {
        let mut e = employee("Jane", "HR");
        e.projects_completed = 0;
        let ds = EmployeeDataset::from_employees(vec![e.clone()]);
        let bars = salary_vs_projects(&ds, &e);
        assert_eq!(bars[0].value, 100.0);
        assert_eq!(bars[1].value, 0.0);
    }

    #[test]
    fn peer_averages_use_own_department() {
        let ds = sample_dataset();
        let carol = ds.get(2).unwrap();
        assert_eq!(carol.name, "Carol");
        let peers = peer_comparison(&ds, carol);

        assert_eq!(peers[0].label, "Productivity (%)");
        assert_eq!(peers[0].employee, 60.0);
        assert_eq!(peers[0].department_average, 70.0);
        assert_eq!(peers[1].employee, 90.0);
        assert_eq!(peers[1].department_average, 75.0);
    }

    #[test]
    fn annual_salary_is_monthly_times_twelve() {
        let mut e = employee("Jane", "HR");
        e.salary = 63596.0;
        let s = salary_details(&e);
        assert_eq!(s.monthly, 63596.0);
        assert_eq!(s.annual, 763152.0);
        assert_eq!(format_amount(s.annual), "763152");
    }

    #[test]
    fn amounts() {
        assert_eq!(format_amount(5100.0), "5100");
        assert_eq!(format_amount(5100.5), "5100.5");
        assert_eq!(format_amount(5100.25), "5100.25");
    }

    #[test]
    fn details_rows() {
        let e = employee("Jane", "HR");
        let rows = employee_details(&e);
        assert_eq!(rows[0], ("Name", "Jane".to_string()));
        assert_eq!(rows[4], ("Age", "30".to_string()));
    }
}
