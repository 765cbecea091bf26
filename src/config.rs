use std::path::PathBuf;

pub const DATA_ENV: &str = "HR_DASHBOARD_DATA";
pub const MODEL_ENV: &str = "HR_DASHBOARD_MODEL";

pub const DEFAULT_DATA_PATH: &str = "data/hr_dashboard_data.csv";
pub const DEFAULT_MODEL_PATH: &str = "models/performance_model.json";

/// Files loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by `HR_DASHBOARD_DATA` / `HR_DASHBOARD_MODEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str, default: PathBuf| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };
        Self {
            data_path: path(DATA_ENV, defaults.data_path),
            model_path: path(MODEL_ENV, defaults.model_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.data_path, PathBuf::from("data/hr_dashboard_data.csv"));
    }

    #[test]
    fn env_overrides() {
        let cfg = AppConfig::from_lookup(|key| match key {
            DATA_ENV => Some("/tmp/staff.parquet".to_string()),
            MODEL_ENV => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/staff.parquet"));
        assert_eq!(cfg.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }
}
