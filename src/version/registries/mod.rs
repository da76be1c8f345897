//! Registry implementations for looking up published versions

pub mod npm;

pub use npm::NpmRegistry;
