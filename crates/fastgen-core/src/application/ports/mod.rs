//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fastgen-adapters` crate provides implementations.

use crate::domain::DecisionContext;
use crate::error::FastgenResult;
use std::path::{Path, PathBuf};

/// Port for filesystem operations.
///
/// Implemented by:
/// - `fastgen_adapters::filesystem::LocalFilesystem` (production)
/// - `fastgen_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - The pruner both writes and *deletes*, so this port carries removal and
///   traversal operations alongside the usual write operations
/// - `remove_dir` must fail on a non-empty directory; the pruner relies on
///   that to keep the empty-directory collapse honest
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> FastgenResult<()>;

    /// Write content to a file, creating parents as needed by the caller.
    fn write_file(&self, path: &Path, content: &str) -> FastgenResult<()>;

    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// List the immediate entries of a directory.
    fn read_dir(&self, path: &Path) -> FastgenResult<Vec<PathBuf>>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> FastgenResult<()>;

    /// Remove an *empty* directory.
    fn remove_dir(&self, path: &Path) -> FastgenResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> FastgenResult<()>;
}

/// Port for the external template engine.
///
/// The engine materializes the project tree under `output_root`, assuming
/// every conditional block renders — the pruner reconciles the result with
/// the decision context afterwards. The copy/substitution mechanics behind
/// this trait are not this core's concern.
///
/// Implemented by:
/// - `fastgen_adapters::renderer::SkeletonRenderer`
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, ctx: &DecisionContext, output_root: &Path) -> FastgenResult<()>;
}

/// Port for best-effort post-generation tooling.
///
/// Both operations are fire-and-forget from the pipeline's point of view: a
/// failure degrades output quality (no lockfile, unformatted sources) but
/// never invalidates the generated tree, so errors come back as plain
/// strings for the caller to log as warnings.
///
/// Implemented by:
/// - `fastgen_adapters::tooling::PythonToolchain`
pub trait ToolRunner: Send + Sync {
    /// Generate the dependency lockfile for the backend.
    fn generate_lockfile(&self, project_root: &Path) -> Result<(), String>;

    /// Format the generated sources.
    fn format_code(&self, project_root: &Path) -> Result<(), String>;
}
