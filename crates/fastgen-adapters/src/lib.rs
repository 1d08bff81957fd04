//! Infrastructure adapters for fastgen.
//!
//! This crate implements the ports defined in `fastgen_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod tooling;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::SkeletonRenderer;
pub use tooling::{NoopToolRunner, PythonToolchain};
