//! Loading configuration files

use super::schema::ComparisonConfig;
use super::validate::validate_config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load and validate a comparison config from a YAML file
///
/// # Example
///
/// ```no_run
/// use comparar::config::load_config;
///
/// let config = load_config("comparison.yaml")?;
/// println!("{} folds x {} repetitions", config.folds, config.repetitions);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<ComparisonConfig> {
    let path = config_path.as_ref();
    let yaml_content = fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    let config = ComparisonConfig::from_yaml_str(&yaml_content)?;
    validate_config(&config)?;

    debug!(path = %path.display(), folds = config.folds, repetitions = config.repetitions, "config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Metric;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_config() {
        let yaml = r"
folds: 5
repetitions: 3
seed: 7
stratified: true
threshold: 0.01
metrics:
  - precision
  - recall
";
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.folds, 5);
        assert_eq!(config.repetitions, 3);
        assert_eq!(config.seed, 7);
        assert!(config.stratified);
        assert_eq!(config.threshold, 0.01);
        assert_eq!(config.metrics, vec![Metric::Precision, Metric::Recall]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("/nonexistent/comparison.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"folds: [unclosed").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"folds: 1\n").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.code(), "E003");
    }
}
