//! Version layer for the self-update check
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Staleness  │◀────│   Compare   │
//! │  (fetch)    │     │  (advise)   │     │ (version >) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ Registries  │
//! │   (npm)     │
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`compare`]: Lenient fixed-length version comparison
//! - [`registry`]: Registry trait and the failure-absorbing lookup
//! - [`registries`]: Concrete registry implementations (npm)
//! - [`staleness`]: Update advisory for the running binary
//! - [`error`]: Error types for registry operations

pub mod compare;
pub mod error;
pub mod registries;
pub mod registry;
pub mod staleness;
