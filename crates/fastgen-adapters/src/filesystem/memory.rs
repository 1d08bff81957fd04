//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use fastgen_core::{
    application::{ApplicationError, ports::Filesystem},
    error::FastgenResult,
};

/// In-memory filesystem for testing.
///
/// Cloning shares the underlying store, so the same instance can back both
/// the renderer and the pruner in a test.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// All file paths, sorted (testing helper).
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        let mut files: Vec<_> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
    }

    fn lock_error(path: &Path) -> fastgen_core::error::FastgenError {
        ApplicationError::Filesystem {
            path: path.to_path_buf(),
            reason: "memory filesystem lock poisoned".into(),
        }
        .into()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> FastgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_error(path))?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> FastgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_error(path))?;

        // Mirror std::fs::write: the parent must already exist.
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> FastgenResult<Vec<PathBuf>> {
        let inner = self.inner.read().map_err(|_| Self::lock_error(path))?;
        if !inner.directories.contains(path) {
            return Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let mut entries = BTreeSet::new();
        for file in inner.files.keys() {
            if file.parent() == Some(path) {
                entries.insert(file.clone());
            }
        }
        for dir in &inner.directories {
            if dir.parent() == Some(path) {
                entries.insert(dir.clone());
            }
        }
        Ok(entries.into_iter().collect())
    }

    fn remove_file(&self, path: &Path) -> FastgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_error(path))?;
        inner.files.remove(path).map(|_| ()).ok_or_else(|| {
            ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "no such file".into(),
            }
            .into()
        })
    }

    fn remove_dir(&self, path: &Path) -> FastgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_error(path))?;

        let occupied = inner.files.keys().any(|f| f.parent() == Some(path))
            || inner.directories.iter().any(|d| d.parent() == Some(path));
        if occupied {
            return Err(ApplicationError::Filesystem {
                path: path.to_path_buf(),
                reason: "directory not empty".into(),
            }
            .into());
        }

        inner.directories.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> FastgenResult<()> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_error(path))?;

        inner.directories.retain(|d| !d.starts_with(path));
        inner.files.retain(|f, _| !f.starts_with(path));

        Ok(())
    }
}
