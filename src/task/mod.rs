//! Task execution with progress feedback
//!
//! # Modules
//!
//! - [`runner`]: Retrying task runner with per-run retry budgets
//! - [`indicator`]: Progress indicator trait and the terminal spinner
//! - [`estimate`]: Progress bar showing an approximate time to completion

pub mod estimate;
pub mod indicator;
pub mod runner;

pub use estimate::EstimateReporter;
pub use indicator::{ProgressIndicator, SpinnerIndicator, TaskColor};
pub use runner::{RetryPolicy, TaskOutcome, TaskSpec, run_task, run_task_with};
