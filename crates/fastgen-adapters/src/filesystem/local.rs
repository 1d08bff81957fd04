//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use fastgen_core::{application::ports::Filesystem, error::FastgenResult};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }

    /// Sorted snapshot of every file under `root`, relative to it.
    ///
    /// Not part of the port — used by tests and by the CLI's dry-run
    /// summary to show the tree the pruner left behind.
    pub fn list_tree(&self, root: &Path) -> FastgenResult<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| map_walk_error(root, e))?;
            if entry.file_type().is_file() {
                let rel = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                paths.push(rel);
            }
        }
        Ok(paths)
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> FastgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> FastgenResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_dir(&self, path: &Path) -> FastgenResult<Vec<PathBuf>> {
        let entries =
            std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "read directory entry"))?;
            paths.push(entry.path());
        }
        paths.sort();
        Ok(paths)
    }

    fn remove_file(&self, path: &Path) -> FastgenResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir(&self, path: &Path) -> FastgenResult<()> {
        std::fs::remove_dir(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> FastgenResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory tree"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> fastgen_core::error::FastgenError {
    use fastgen_core::application::ApplicationError;

    ApplicationError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> fastgen_core::error::FastgenError {
    use fastgen_core::application::ApplicationError;

    ApplicationError::Filesystem {
        path: e
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf()),
        reason: format!("Failed to walk tree: {e}"),
    }
    .into()
}
