//! scaffold: create new projects from git templates
//!
//! # Modules
//!
//! - [`config`]: Constants, user configuration and data paths
//! - [`logging`]: Daily JSON log file in the data directory
//! - [`output`]: Terminal output helpers
//! - [`task`]: Retrying task runner with progress feedback
//! - [`template`]: Template registry, source resolution and cloning
//! - [`version`]: Version comparison and self-update checks

pub mod config;
pub mod logging;
pub mod output;
pub mod task;
pub mod template;
pub mod version;
