pub mod builtin;
pub mod schema;

use crate::error::LineaError;
use schema::ClusterConfig;
use std::path::Path;

/// Load a cluster config from a JSON file.
pub fn load_config(path: &Path) -> Result<ClusterConfig, LineaError> {
    let content = std::fs::read_to_string(path).map_err(|e| LineaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ClusterConfig =
        serde_json::from_str(&content).map_err(|e| LineaError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a cluster config from a JSON string.
pub fn parse_config_str(json: &str) -> Result<ClusterConfig, LineaError> {
    let config: ClusterConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config file describes a usable clustering run.
pub fn validate_config(config: &ClusterConfig) -> Result<(), LineaError> {
    if !config.tolerance.is_finite() || config.tolerance < 0.0 {
        return Err(LineaError::ConfigInvalid(format!(
            "tolerance must be a finite, non-negative number (got {})",
            config.tolerance
        )));
    }
    Ok(())
}

/// Reject tolerances the clustering engine cannot work with.
///
/// NaN fails the `>= 0.0` comparison and is rejected with negatives. An
/// infinite tolerance is accepted and merges every word on a page.
pub fn validate_tolerance(tolerance: f64) -> Result<(), LineaError> {
    if tolerance >= 0.0 {
        Ok(())
    } else {
        Err(LineaError::InvalidArgument(format!(
            "tolerance must be non-negative, got {}",
            tolerance
        )))
    }
}
