//! Template layer: where a project comes from and how it gets on disk
//!
//! # Modules
//!
//! - [`registry`]: Named templates loaded from `templates.json`
//! - [`source`]: Template reference resolution and branch selection
//! - [`project`]: Validated project names
//! - [`package_manager`]: Supported package managers
//! - [`clone`]: `Cloner` trait and the git-backed implementation
//! - [`fetch`]: Clone orchestration with retry or estimate feedback
//! - [`error`]: Error types for template and clone operations

pub mod clone;
pub mod error;
pub mod fetch;
pub mod package_manager;
pub mod project;
pub mod registry;
pub mod source;

pub use clone::{Cloner, GitCloner};
pub use error::{CloneError, TemplateError};
pub use fetch::TemplateFetcher;
pub use package_manager::PackageManager;
pub use project::ProjectName;
pub use registry::{TemplateEntry, TemplateRegistry};
pub use source::{TemplateRef, resolve_template};
