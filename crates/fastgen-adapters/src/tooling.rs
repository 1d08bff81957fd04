//! Best-effort post-generation tooling.
//!
//! Runs the Python toolchain over a freshly generated project: `uv lock`
//! for the dependency lockfile and `ruff format` for source formatting.
//! Everything here is fire-and-forget from the pipeline's perspective —
//! errors come back as strings and the caller logs them as warnings; a
//! missing tool never fails a generation run.

use std::path::{Path, PathBuf};
use std::process::Command;

use fastgen_core::application::ports::ToolRunner;
use tracing::debug;

/// Locate a binary on `PATH`.
fn find_in_path(binary: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

fn run(program: &Path, args: &[&str], cwd: &Path) -> Result<(), String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|e| format!("failed to spawn {}: {e}", program.display()))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(format!(
            "{} {} exited with {}",
            program.display(),
            args.join(" "),
            output.status
        ))
    }
}

/// Production tool runner using `uv` and `ruff` from `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonToolchain;

impl PythonToolchain {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for PythonToolchain {
    fn generate_lockfile(&self, project_root: &Path) -> Result<(), String> {
        let backend = project_root.join("backend");
        if !backend.is_dir() {
            debug!("no backend directory, skipping lockfile");
            return Ok(());
        }
        let Some(uv) = find_in_path(uv_binary()) else {
            return Err("uv not found on PATH; run 'uv lock' in backend/ yourself".into());
        };
        debug!(uv = %uv.display(), "generating lockfile");
        run(&uv, &["lock"], &backend)
    }

    fn format_code(&self, project_root: &Path) -> Result<(), String> {
        let backend = project_root.join("backend");
        if !backend.is_dir() {
            return Ok(());
        }
        let Some(ruff) = find_in_path(ruff_binary()) else {
            return Err("ruff not found on PATH; run 'ruff format' in backend/ yourself".into());
        };
        debug!(ruff = %ruff.display(), "formatting sources");
        run(&ruff, &["check", "--fix", "--quiet", "."], &backend)?;
        run(&ruff, &["format", "--quiet", "."], &backend)
    }
}

const fn uv_binary() -> &'static str {
    if cfg!(windows) { "uv.exe" } else { "uv" }
}

const fn ruff_binary() -> &'static str {
    if cfg!(windows) { "ruff.exe" } else { "ruff" }
}

/// Tool runner that does nothing. Used in tests and by `--no-tooling`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopToolRunner;

impl NoopToolRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for NoopToolRunner {
    fn generate_lockfile(&self, _project_root: &Path) -> Result<(), String> {
        Ok(())
    }

    fn format_code(&self, _project_root: &Path) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_backend_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let toolchain = PythonToolchain::new();
        assert!(toolchain.generate_lockfile(tmp.path()).is_ok());
        assert!(toolchain.format_code(tmp.path()).is_ok());
    }

    #[test]
    fn find_in_path_locates_a_shell() {
        // Something POSIX-ish is always around on CI.
        #[cfg(unix)]
        assert!(find_in_path("sh").is_some());
    }

    #[test]
    fn noop_runner_always_succeeds() {
        let runner = NoopToolRunner::new();
        assert!(runner.generate_lockfile(Path::new("/nonexistent")).is_ok());
        assert!(runner.format_code(Path::new("/nonexistent")).is_ok());
    }
}
