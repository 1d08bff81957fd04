//! Application layer errors.
//!
//! These errors represent failures in orchestration, not decision logic.
//! Decision-logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during generation orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The external template engine failed to materialize the tree.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// A core filesystem operation failed. Path-scoped and fatal; local
    /// filesystem errors are not transient, so nothing is retried.
    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    /// Target directory already holds a project.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { reason } => vec![
                format!("Rendering failed: {reason}"),
                "Re-run with -v for the full error chain".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "The partially generated tree was left in place; remove it before retrying".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Or remove it: rm -rf {}", path.display()),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderingFailed { .. } | Self::Filesystem { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
        }
    }
}
