//! Configuration loading, parsing, and validation for extdoctor.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use extdoctor::config::{load_config, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join(CONFIG_FILE_NAME),
//!     "analysis:\n  activation_overlap_threshold: 3\n",
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.analysis.activation_overlap_threshold, 3);
//! assert!(config.remediation.auto_apply);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{discover_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{AnalysisSettings, EngineConfig, HostSettings, LogSettings, RemediationSettings};
pub use validator::validate;
