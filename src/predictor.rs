use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::data::model::{Employee, Metric};

/// Feature order the model was fitted with.
pub const FEATURES: [Metric; 5] = [
    Metric::Productivity,
    Metric::Satisfaction,
    Metric::Salary,
    Metric::ProjectsCompleted,
    Metric::Age,
];

/// Column names of [`FEATURES`], as stored alongside a fitted model.
pub const FEATURE_NAMES: [&str; 5] = [
    "Productivity (%)",
    "Satisfaction Rate (%)",
    "Salary",
    "Projects Completed",
    "Age",
];

pub const N_FEATURES: usize = FEATURE_NAMES.len();

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("reading model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Invalid(String),

    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

fn invalid(msg: impl Into<String>) -> ModelError {
    ModelError::Invalid(msg.into())
}

// ---------------------------------------------------------------------------
// Serialized model
// ---------------------------------------------------------------------------

/// A pre-trained regressor over the five employee features.
///
/// Stored as JSON, tagged by `kind`:
///
/// ```json
/// { "kind": "linear", "coefficients": [0.4, 0.3, 0.0001, 0.5, -0.05], "intercept": 2.0 }
/// { "kind": "forest", "trees": [ { "children_left": [...], ... } ] }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceModel {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    #[serde(flatten)]
    pub regressor: Regressor,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Forest {
        trees: Vec<DecisionTree>,
    },
}

/// One regression tree in flattened array form. Node `i` is a leaf when
/// `children_left[i] == -1`; otherwise samples with
/// `x[feature[i]] <= threshold[i]` go left.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl DecisionTree {
    fn validate(&self, idx: usize) -> Result<(), ModelError> {
        let n = self.children_left.len();
        if n == 0 {
            return Err(invalid(format!("tree {idx} has no nodes")));
        }
        let lens = [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ];
        if lens.iter().any(|&l| l != n) {
            return Err(invalid(format!("tree {idx} has arrays of unequal length")));
        }
        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == -1 {
                continue;
            }
            let in_range = |child: i64| child > node as i64 && (child as usize) < n;
            if !in_range(left) || !in_range(right) {
                return Err(invalid(format!(
                    "tree {idx} node {node} has out-of-range children ({left}, {right})"
                )));
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= N_FEATURES {
                return Err(invalid(format!(
                    "tree {idx} node {node} splits on unknown feature {feature}"
                )));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf. Children always have a larger index than
    /// their parent (checked in `validate`), so the walk terminates.
    fn predict(&self, x: &[f64; N_FEATURES]) -> f64 {
        let mut node = 0usize;
        while self.children_left[node] != -1 {
            let f = self.feature[node] as usize;
            node = if x[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }
}

impl PerformanceModel {
    /// Parse and validate a model from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let model: PerformanceModel = serde_json::from_str(text)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if let Some(names) = &self.feature_names {
            if names.len() != N_FEATURES {
                return Err(invalid(format!(
                    "expected {N_FEATURES} feature names, found {}",
                    names.len()
                )));
            }
            if names.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b) {
                log::warn!(
                    "model feature names {names:?} differ from {FEATURE_NAMES:?}; \
                     features are passed positionally"
                );
            }
        }

        match &self.regressor {
            Regressor::Linear { coefficients, .. } => {
                if coefficients.len() != N_FEATURES {
                    return Err(invalid(format!(
                        "expected {N_FEATURES} coefficients, found {}",
                        coefficients.len()
                    )));
                }
            }
            Regressor::Forest { trees } => {
                if trees.is_empty() {
                    return Err(invalid("forest has no trees"));
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(i)?;
                }
            }
        }
        Ok(())
    }

    /// Short human-readable description for the status bar.
    pub fn describe(&self) -> String {
        match &self.regressor {
            Regressor::Linear { .. } => "linear regression".to_string(),
            Regressor::Forest { trees } => format!("random forest ({} trees)", trees.len()),
        }
    }

    /// Raw (unclamped) prediction for one feature vector.
    pub fn predict(&self, x: &[f64; N_FEATURES]) -> Result<f64, ModelError> {
        let y = match &self.regressor {
            Regressor::Linear {
                coefficients,
                intercept,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(x.iter())
                        .map(|(c, v)| c * v)
                        .sum::<f64>()
            }
            Regressor::Forest { trees } => {
                trees.iter().map(|t| t.predict(x)).sum::<f64>() / trees.len() as f64
            }
        };
        if y.is_finite() {
            Ok(y)
        } else {
            Err(ModelError::NonFinite(y))
        }
    }
}

/// Read a model from disk.
pub fn load_model(path: &Path) -> Result<PerformanceModel, ModelError> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    PerformanceModel::from_json(&text)
}

// ---------------------------------------------------------------------------
// Employee scoring
// ---------------------------------------------------------------------------

/// Feature vector for an employee, in [`FEATURES`] order.
pub fn features(employee: &Employee) -> [f64; N_FEATURES] {
    FEATURES.map(|m| m.value(employee))
}

/// A prediction clamped into `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceScore(f64);

impl PerformanceScore {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for PerformanceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicted Performance Score: {:.2}", self.0)
    }
}

pub fn predict_performance(
    model: &PerformanceModel,
    employee: &Employee,
) -> Result<PerformanceScore, ModelError> {
    let raw = model.predict(&features(employee))?;
    Ok(PerformanceScore(raw.clamp(0.0, 100.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::employee;

    fn linear(coefficients: [f64; 5], intercept: f64) -> PerformanceModel {
        PerformanceModel {
            feature_names: None,
            regressor: Regressor::Linear {
                coefficients: coefficients.to_vec(),
                intercept,
            },
        }
    }

    #[test]
    fn feature_names_match_metric_labels() {
        assert_eq!(FEATURES.map(Metric::label), FEATURE_NAMES);
    }

    #[test]
    fn features_follow_model_order() {
        let mut e = employee("Jane", "HR");
        e.productivity = 1.0;
        e.satisfaction = 2.0;
        e.salary = 3.0;
        e.projects_completed = 4;
        e.age = 5;
        assert_eq!(features(&e), [1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn linear_prediction() {
        let model = linear([1.0, 0.5, 0.0, 2.0, -1.0], 3.0);
        let y = model.predict(&[10.0, 4.0, 999.0, 1.0, 2.0]).unwrap();
        assert_eq!(y, 3.0 + 10.0 + 2.0 + 2.0 - 2.0);
    }

    #[test]
    fn score_is_clamped() {
        let e = employee("Jane", "HR");
        let high = predict_performance(&linear([0.0; 5], 250.0), &e).unwrap();
        let low = predict_performance(&linear([0.0; 5], -3.0), &e).unwrap();
        let mid = predict_performance(&linear([0.0; 5], 42.125), &e).unwrap();
        assert_eq!(high.value(), 100.0);
        assert_eq!(low.value(), 0.0);
        assert_eq!(mid.value(), 42.125);
    }

    #[test]
    fn score_display() {
        let e = employee("Jane", "HR");
        let score = predict_performance(&linear([0.0; 5], 71.456), &e).unwrap();
        assert_eq!(score.to_string(), "Predicted Performance Score: 71.46");
    }

    #[test]
    fn non_finite_prediction_is_an_error() {
        let model = linear([f64::INFINITY, 0.0, 0.0, 0.0, 0.0], 0.0);
        let e = employee("Jane", "HR");
        assert!(matches!(
            predict_performance(&model, &e),
            Err(ModelError::NonFinite(_))
        ));
    }

    #[test]
    fn parse_linear_json() {
        let json = r#"{
            "kind": "linear",
            "feature_names": ["Productivity (%)", "Satisfaction Rate (%)", "Salary", "Projects Completed", "Age"],
            "coefficients": [0.5, 0.25, 0.0, 1.0, 0.0],
            "intercept": 1.0
        }"#;
        let model = PerformanceModel::from_json(json).unwrap();
        assert_eq!(model.describe(), "linear regression");
        assert_eq!(model.predict(&[10.0, 4.0, 0.0, 2.0, 0.0]).unwrap(), 9.0);
    }

    #[test]
    fn wrong_coefficient_count_rejected() {
        let json = r#"{ "kind": "linear", "coefficients": [1.0, 2.0], "intercept": 0.0 }"#;
        assert!(matches!(
            PerformanceModel::from_json(json),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn unknown_kind_rejected() {
        let json = r#"{ "kind": "svm", "support_vectors": [] }"#;
        assert!(matches!(
            PerformanceModel::from_json(json),
            Err(ModelError::Parse(_))
        ));
    }

    const FOREST: &str = r#"{
        "kind": "forest",
        "trees": [
            {
                "children_left":  [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature":        [0, -2, -2],
                "threshold":      [50.0, -2.0, -2.0],
                "value":          [0.0, 40.0, 80.0]
            },
            {
                "children_left":  [-1],
                "children_right": [-1],
                "feature":        [-2],
                "threshold":      [-2.0],
                "value":          [60.0]
            }
        ]
    }"#;

    #[test]
    fn forest_averages_tree_leaves() {
        let model = PerformanceModel::from_json(FOREST).unwrap();
        assert_eq!(model.describe(), "random forest (2 trees)");
        assert_eq!(model.predict(&[50.0, 0.0, 0.0, 0.0, 0.0]).unwrap(), 50.0);
        assert_eq!(model.predict(&[90.0, 0.0, 0.0, 0.0, 0.0]).unwrap(), 70.0);
    }

    #[test]
    fn forest_with_cyclic_children_rejected() {
        let json = r#"{
            "kind": "forest",
            "trees": [{
                "children_left":  [0, -1],
                "children_right": [1, -1],
                "feature":        [0, -2],
                "threshold":      [1.0, -2.0],
                "value":          [0.0, 1.0]
            }]
        }"#;
        assert!(matches!(
            PerformanceModel::from_json(json),
            Err(ModelError::Invalid(_))
        ));
    }

    #[test]
    fn forest_with_bad_feature_rejected() {
        let json = r#"{
            "kind": "forest",
            "trees": [{
                "children_left":  [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature":        [7, -2, -2],
                "threshold":      [1.0, -2.0, -2.0],
                "value":          [0.0, 1.0, 2.0]
            }]
        }"#;
        assert!(PerformanceModel::from_json(json).is_err());
    }

    #[test]
    fn missing_model_file() {
        let err = load_model(Path::new("/nonexistent/performance_model.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
