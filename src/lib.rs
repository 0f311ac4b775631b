//! extdoctor - Diagnostics for editor extensions.
//!
//! extdoctor inspects the manifests of installed extensions for
//! misconfiguration (colliding command ids and keybindings, crowded
//! activation events, commands that are declared but never registered or
//! never activate), patches missing activation events, suggests unused
//! keybindings, and surfaces recent errors from extension logs.
//!
//! # Modules
//!
//! - [`analysis`] - Conflict rules and the analyzer
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`engine`] - The [`DiagnosticsEngine`](engine::DiagnosticsEngine) facade
//! - [`error`] - Error types and result aliases
//! - [`host`] - Collaborator traits and their implementations
//! - [`logs`] - Log tail reading, parsing and aggregation
//! - [`manifest`] - Manifest data model and collection
//! - [`remediation`] - Manifest patching and manual fixes
//! - [`suggest`] - Unused keybinding search
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use extdoctor::engine::DiagnosticsEngine;
//! use extdoctor::host::memory::{
//!     InMemoryClipboard, InMemoryCommandTable, InMemoryFileEditor, InMemoryRegistry,
//! };
//! use extdoctor::host::ComponentDescriptor;
//! use serde_json::json;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let manifest = json!({
//!     "name": "tools",
//!     "contributes": { "commands": [{ "command": "tools.run" }] }
//! });
//! let engine = DiagnosticsEngine::builder(
//!     Arc::new(InMemoryRegistry::new(vec![ComponentDescriptor::new("acme.tools", manifest)])),
//!     Arc::new(InMemoryCommandTable::new(["tools.run"])),
//!     Arc::new(InMemoryFileEditor::new()),
//!     Arc::new(InMemoryClipboard::new()),
//! )
//! .build()
//! .unwrap();
//!
//! let conflicts = engine.run_full_analysis().await.unwrap();
//! assert_eq!(conflicts.len(), 1);
//! assert_eq!(conflicts[0].id, "tools.run");
//! # });
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod logs;
pub mod manifest;
pub mod remediation;
pub mod suggest;
pub mod ui;

pub use error::{DoctorError, Result};
