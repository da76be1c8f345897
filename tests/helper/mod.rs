pub mod cloner;

pub use cloner::FakeCloner;
