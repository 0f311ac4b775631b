//! Configuration validation.

use crate::error::{DoctorError, Result};

use super::schema::EngineConfig;

/// Reject values the engine cannot work with.
pub fn validate(config: &EngineConfig) -> Result<()> {
    if config.analysis.activation_overlap_threshold == 0 {
        return Err(DoctorError::ConfigValidation {
            message: "analysis.activation_overlap_threshold must be at least 1".to_string(),
        });
    }
    if config.logs.recent_error_limit == 0 {
        return Err(DoctorError::ConfigValidation {
            message: "logs.recent_error_limit must be at least 1".to_string(),
        });
    }
    Ok(())
}
