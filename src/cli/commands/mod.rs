//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! configuration, builds the engine once and routes the subcommand to its
//! implementation.

pub mod analyze;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod errors;
pub mod fix;
pub mod logs;
pub mod remediate;
pub mod suggest;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
