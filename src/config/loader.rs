//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading planner
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ClosuresConfig, PlannerConfig, PlannerSettings, SchedulingPolicy, ServerSettings,
    ServiceMetadata,
};

/// Loads and provides access to planner configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── planner.yaml   # Service, scheduling policy and server settings
/// └── closures.yaml  # Venue closures
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_planner::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Listening on {}", loader.server().bind_address);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PlannerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<PlannerSettings>(&path.join("planner.yaml"))?;
        let closures = Self::load_yaml::<ClosuresConfig>(&path.join("closures.yaml"))?;

        Ok(Self {
            config: PlannerConfig::new(settings, closures.closures),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying planner configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Returns the service metadata.
    pub fn service(&self) -> &ServiceMetadata {
        self.config.service()
    }

    /// Returns the scheduling policy.
    pub fn scheduling(&self) -> &SchedulingPolicy {
        self.config.scheduling()
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerSettings {
        self.config.server()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_SPAN_DAYS;
    use crate::models::ConflictMode;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shift-planner-{}-{}", name, uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.service().name, "shift-planner");
        assert_eq!(loader.server().bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_scheduling_policy_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.scheduling().max_span_days, Some(366));
        assert_eq!(loader.scheduling().default_conflict_mode, ConflictMode::Skip);
    }

    #[test]
    fn test_closures_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let closures = loader.config().closures();

        assert!(closures.iter().any(|c| c.venue_id == "venue_city"
            && c.recurs_annually
            && c.start_date == NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
        assert!(closures.iter().any(|c| c.venue_id == "venue_harbour"
            && c.end_date == NaiveDate::from_ymd_opt(2025, 3, 14)));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("planner.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_closures_file_returns_error() {
        let dir = scratch_dir("missing-closures");
        fs::write(
            dir.join("planner.yaml"),
            "service:\n  name: test\nserver:\n  bind_address: 127.0.0.1:0\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.contains("closures.yaml")),
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad-yaml");
        fs::write(dir.join("planner.yaml"), "service: [unterminated\n").unwrap();
        fs::write(dir.join("closures.yaml"), "closures: []\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("planner.yaml"))
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_scheduling_section_is_optional() {
        let dir = scratch_dir("no-scheduling");
        fs::write(
            dir.join("planner.yaml"),
            "service:\n  name: test\nserver:\n  bind_address: 127.0.0.1:0\n",
        )
        .unwrap();
        fs::write(dir.join("closures.yaml"), "closures: []\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.scheduling(), &SchedulingPolicy::default());
        assert_eq!(loader.scheduling().max_span_days, Some(DEFAULT_MAX_SPAN_DAYS));
        assert_eq!(loader.service().environment, "local");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_null_span_limit_disables_ceiling() {
        let dir = scratch_dir("unbounded");
        fs::write(
            dir.join("planner.yaml"),
            "service:\n  name: test\nscheduling:\n  max_span_days: null\nserver:\n  bind_address: 127.0.0.1:0\n",
        )
        .unwrap();
        fs::write(dir.join("closures.yaml"), "closures: []\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.scheduling().max_span_days, None);
        fs::remove_dir_all(dir).unwrap();
    }
}
