//! Artifact pruner - reconciles the materialized tree with the context.
//!
//! The template engine renders the full tree as if every conditional block
//! were enabled; this service replays the conditional-path manifest against
//! the same decision context and deletes everything whose condition is
//! false. Three ordered phases, none re-entrant:
//!
//! 1. **Targeted deletion** — every file-level [`PathRule`] whose predicate
//!    is false; missing paths are a silent no-op, which makes the whole
//!    phase idempotent.
//! 2. **Empty-directory collapse** — post-order walk; a directory with no
//!    remaining entries, or whose only entry is the package marker file, is
//!    removed (marker first, then the directory). Runs only after phase 1
//!    has fully completed, so emptiness is evaluated exactly once.
//! 3. **Area deletion** — whole feature directories owned by a single
//!    top-level flag (CI, Kubernetes, nginx, frontend, tests).
//!
//! Any unexpected filesystem error is fatal and aborts with a path-scoped
//! error; local filesystem operations are not transient, so nothing is
//! retried. The pruner never recomputes or mutates the context it is given.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::application::ports::Filesystem;
use crate::domain::manifest::{AREA_MANIFEST, MARKER_FILE, PRUNE_MANIFEST};
use crate::domain::DecisionContext;
use crate::error::FastgenResult;

/// What a prune pass removed. Paths are relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub removed_files: Vec<PathBuf>,
    pub removed_dirs: Vec<PathBuf>,
}

impl PruneReport {
    /// True when the pass deleted nothing — the second run over an already
    /// pruned tree must report this.
    pub fn is_noop(&self) -> bool {
        self.removed_files.is_empty() && self.removed_dirs.is_empty()
    }

    pub fn total(&self) -> usize {
        self.removed_files.len() + self.removed_dirs.len()
    }
}

/// Replays the pruning manifest over a materialized tree.
pub struct ArtifactPruner<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> ArtifactPruner<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Run all three phases over the tree rooted at `root`.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn prune(&self, root: &Path, ctx: &DecisionContext) -> FastgenResult<PruneReport> {
        let mut report = PruneReport::default();

        self.targeted_deletion(root, ctx, &mut report)?;
        self.collapse_empty_dirs(root, &mut report)?;
        self.area_deletion(root, ctx, &mut report)?;

        info!(
            files = report.removed_files.len(),
            dirs = report.removed_dirs.len(),
            "prune complete"
        );
        Ok(report)
    }

    // ── Phase 1: targeted deletion ────────────────────────────────────────────

    fn targeted_deletion(
        &self,
        root: &Path,
        ctx: &DecisionContext,
        report: &mut PruneReport,
    ) -> FastgenResult<()> {
        for rule in PRUNE_MANIFEST {
            if rule.keep.eval(ctx)? {
                continue;
            }
            let path = root.join(rule.path);
            if !self.filesystem.exists(&path) {
                continue;
            }
            if self.filesystem.is_dir(&path) {
                self.filesystem.remove_dir_all(&path)?;
                debug!(path = rule.path, "removed directory");
                report.removed_dirs.push(PathBuf::from(rule.path));
            } else {
                self.filesystem.remove_file(&path)?;
                debug!(path = rule.path, "removed file");
                report.removed_files.push(PathBuf::from(rule.path));
            }
        }
        Ok(())
    }

    // ── Phase 2: empty-directory collapse ─────────────────────────────────────

    fn collapse_empty_dirs(&self, root: &Path, report: &mut PruneReport) -> FastgenResult<()> {
        // The project root itself is never collapsed, only its descendants.
        for entry in self.filesystem.read_dir(root)? {
            if self.filesystem.is_dir(&entry) {
                self.collapse_dir(root, &entry, report)?;
            }
        }
        Ok(())
    }

    fn collapse_dir(
        &self,
        root: &Path,
        dir: &Path,
        report: &mut PruneReport,
    ) -> FastgenResult<()> {
        // Post-order: children first, so a parent left holding only empty
        // subtrees collapses in the same pass.
        for entry in self.filesystem.read_dir(dir)? {
            if self.filesystem.is_dir(&entry) {
                self.collapse_dir(root, &entry, report)?;
            }
        }

        let remaining = self.filesystem.read_dir(dir)?;
        let marker_only = remaining.len() == 1
            && !self.filesystem.is_dir(&remaining[0])
            && remaining[0]
                .file_name()
                .is_some_and(|n| n == std::ffi::OsStr::new(MARKER_FILE));

        if remaining.is_empty() || marker_only {
            if marker_only {
                self.filesystem.remove_file(&remaining[0])?;
            }
            self.filesystem.remove_dir(dir)?;
            let rel = dir.strip_prefix(root).unwrap_or(dir).to_path_buf();
            debug!(path = %rel.display(), "collapsed empty directory");
            report.removed_dirs.push(rel);
        }
        Ok(())
    }

    // ── Phase 3: area deletion ────────────────────────────────────────────────

    fn area_deletion(
        &self,
        root: &Path,
        ctx: &DecisionContext,
        report: &mut PruneReport,
    ) -> FastgenResult<()> {
        for area in AREA_MANIFEST {
            if ctx.flag(area.flag)? {
                continue;
            }
            let path = root.join(area.path);
            if !self.filesystem.exists(&path) {
                continue;
            }
            self.filesystem.remove_dir_all(&path)?;
            debug!(path = area.path, flag = area.flag, "removed area");
            report.removed_dirs.push(PathBuf::from(area.path));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::ApplicationError;
    use crate::domain::config::{ProjectConfig, ProjectName};
    use crate::domain::context::GeneratorStamp;
    use crate::domain::{Preset, compile, validate};
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Mutex;

    /// Minimal in-core filesystem double; the full-featured one lives in
    /// `fastgen-adapters`, which this crate cannot depend on.
    #[derive(Default)]
    struct TestFs {
        files: Mutex<BTreeMap<PathBuf, String>>,
        dirs: Mutex<BTreeSet<PathBuf>>,
    }

    impl TestFs {
        fn file_count(&self) -> usize {
            self.files.lock().unwrap().len()
        }

        fn has(&self, path: &str) -> bool {
            self.exists(Path::new(path))
        }
    }

    impl Filesystem for TestFs {
        fn create_dir_all(&self, path: &Path) -> FastgenResult<()> {
            let mut dirs = self.dirs.lock().unwrap();
            let mut current = PathBuf::new();
            for component in path.components() {
                current.push(component);
                dirs.insert(current.clone());
            }
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> FastgenResult<()> {
            if let Some(parent) = path.parent() {
                self.create_dir_all(parent)?;
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
                || self.dirs.lock().unwrap().contains(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.lock().unwrap().contains(path)
        }

        fn read_dir(&self, path: &Path) -> FastgenResult<Vec<PathBuf>> {
            if !self.is_dir(path) {
                return Err(ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "not a directory".into(),
                }
                .into());
            }
            let mut entries: BTreeSet<PathBuf> = BTreeSet::new();
            for file in self.files.lock().unwrap().keys() {
                if file.parent() == Some(path) {
                    entries.insert(file.clone());
                }
            }
            for dir in self.dirs.lock().unwrap().iter() {
                if dir.parent() == Some(path) {
                    entries.insert(dir.clone());
                }
            }
            Ok(entries.into_iter().collect())
        }

        fn remove_file(&self, path: &Path) -> FastgenResult<()> {
            self.files
                .lock()
                .unwrap()
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| {
                    ApplicationError::Filesystem {
                        path: path.to_path_buf(),
                        reason: "no such file".into(),
                    }
                    .into()
                })
        }

        fn remove_dir(&self, path: &Path) -> FastgenResult<()> {
            if !self.read_dir(path)?.is_empty() {
                return Err(ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "directory not empty".into(),
                }
                .into());
            }
            self.dirs.lock().unwrap().remove(path);
            Ok(())
        }

        fn remove_dir_all(&self, path: &Path) -> FastgenResult<()> {
            self.dirs.lock().unwrap().retain(|d| !d.starts_with(path));
            self.files.lock().unwrap().retain(|f, _| !f.starts_with(path));
            Ok(())
        }
    }

    fn ctx(mutate: impl FnOnce(&mut ProjectConfig)) -> DecisionContext {
        let mut cfg = ProjectConfig::new(ProjectName::new("demo").unwrap());
        mutate(&mut cfg);
        compile(
            &validate(cfg).unwrap(),
            &GeneratorStamp::new("fastgen", "0.1.0", "2026-08-06T00:00:00Z"),
        )
    }

    fn seed(fs: &TestFs, paths: &[&str]) {
        for path in paths {
            if path.ends_with('/') {
                fs.create_dir_all(Path::new(path.trim_end_matches('/'))).unwrap();
            } else {
                fs.write_file(Path::new(path), "x").unwrap();
            }
        }
    }

    #[test]
    fn disabled_file_is_removed_and_kept_file_survives() {
        let fs = TestFs::default();
        seed(
            &fs,
            &[
                "p/backend/app/core/cache.py",
                "p/backend/app/core/config.py",
            ],
        );
        let report = ArtifactPruner::new(&fs)
            .prune(Path::new("p"), &ctx(|_| {}))
            .unwrap();
        assert!(!fs.has("p/backend/app/core/cache.py"));
        assert!(fs.has("p/backend/app/core/config.py"));
        assert!(
            report
                .removed_files
                .contains(&PathBuf::from("backend/app/core/cache.py"))
        );
    }

    #[test]
    fn missing_paths_are_a_silent_noop() {
        let fs = TestFs::default();
        fs.create_dir_all(Path::new("p")).unwrap();
        let report = ArtifactPruner::new(&fs)
            .prune(Path::new("p"), &ctx(|_| {}))
            .unwrap();
        assert!(report.is_noop());
    }

    #[test]
    fn empty_directory_collapse_cascades() {
        let fs = TestFs::default();
        // agents/ will lose its only real file; the marker goes with it and
        // the parent chain stays because app/ still has config.py.
        seed(
            &fs,
            &[
                "p/backend/app/agents/__init__.py",
                "p/backend/app/agents/assistant.py",
                "p/backend/app/config.py",
            ],
        );
        let context = ctx(|c| c.enable_ai_agent = false);
        let report = ArtifactPruner::new(&fs).prune(Path::new("p"), &context).unwrap();
        assert!(!fs.has("p/backend/app/agents"));
        assert!(fs.has("p/backend/app/config.py"));
        assert!(
            report
                .removed_dirs
                .contains(&PathBuf::from("backend/app/agents"))
        );
    }

    #[test]
    fn nested_empty_dirs_collapse_bottom_up() {
        let fs = TestFs::default();
        seed(
            &fs,
            &[
                "p/backend/app/worker/__init__.py",
                "p/backend/app/worker/tasks/__init__.py",
                "p/backend/app/worker/celery_app.py",
                "p/backend/app/worker/tasks/examples.py",
                "p/backend/app/main.py",
            ],
        );
        // No task queue: all worker files go, then tasks/, then worker/.
        let report = ArtifactPruner::new(&fs).prune(Path::new("p"), &ctx(|_| {})).unwrap();
        assert!(!fs.has("p/backend/app/worker"));
        assert!(!fs.has("p/backend/app/worker/tasks"));
        assert!(report.removed_dirs.contains(&PathBuf::from("backend/app/worker")));
    }

    #[test]
    fn area_deletion_removes_whole_directories() {
        let fs = TestFs::default();
        seed(
            &fs,
            &[
                "p/.github/workflows/ci.yml",
                "p/kubernetes/deployment.yaml",
                "p/backend/app/main.py",
            ],
        );
        let context = ctx(|c| {
            c.ci = crate::domain::options::CiSystem::None;
            c.enable_kubernetes = false;
        });
        ArtifactPruner::new(&fs).prune(Path::new("p"), &context).unwrap();
        assert!(!fs.has("p/.github"));
        assert!(!fs.has("p/kubernetes"));
        assert!(fs.has("p/backend/app/main.py"));
    }

    #[test]
    fn enabled_areas_survive() {
        let fs = TestFs::default();
        seed(&fs, &["p/.github/workflows/ci.yml", "p/backend/app/main.py"]);
        ArtifactPruner::new(&fs).prune(Path::new("p"), &ctx(|_| {})).unwrap();
        assert!(fs.has("p/.github/workflows/ci.yml"));
    }

    #[test]
    fn pruning_twice_is_idempotent() {
        let fs = TestFs::default();
        seed(
            &fs,
            &[
                "p/backend/app/core/cache.py",
                "p/backend/app/core/config.py",
                "p/backend/app/agents/__init__.py",
                "p/backend/app/agents/assistant.py",
                "p/kubernetes/deployment.yaml",
            ],
        );
        let context = ctx(|c| c.enable_ai_agent = false);
        let pruner = ArtifactPruner::new(&fs);
        let first = pruner.prune(Path::new("p"), &context).unwrap();
        assert!(!first.is_noop());
        let count_after_first = fs.file_count();

        let second = pruner.prune(Path::new("p"), &context).unwrap();
        assert!(second.is_noop(), "second prune removed: {second:?}");
        assert_eq!(fs.file_count(), count_after_first);
    }

    #[test]
    fn minimal_preset_strips_the_tree() {
        let fs = TestFs::default();
        seed(
            &fs,
            &[
                "p/backend/app/main.py",
                "p/backend/app/core/config.py",
                "p/backend/app/core/security.py",
                "p/backend/app/core/telemetry.py",
                "p/backend/app/db/__init__.py",
                "p/backend/app/db/session.py",
                "p/backend/app/db/models/__init__.py",
                "p/backend/app/db/models/user.py",
                "p/backend/app/db/models/item.py",
                "p/.github/workflows/ci.yml",
                "p/kubernetes/deployment.yaml",
                "p/docker-compose.yml",
            ],
        );
        let config = Preset::Minimal.resolve(ProjectName::new("demo").unwrap());
        let context = compile(
            &validate(config).unwrap(),
            &GeneratorStamp::new("fastgen", "0.1.0", "2026-08-06T00:00:00Z"),
        );
        ArtifactPruner::new(&fs).prune(Path::new("p"), &context).unwrap();

        // Whole database-model area collapsed, CI and K8s areas gone.
        assert!(!fs.has("p/backend/app/db"));
        assert!(!fs.has("p/.github"));
        assert!(!fs.has("p/kubernetes"));
        assert!(!fs.has("p/docker-compose.yml"));
        assert!(!fs.has("p/backend/app/core/security.py"));
        assert!(!fs.has("p/backend/app/core/telemetry.py"));
        assert!(fs.has("p/backend/app/main.py"));
        assert!(fs.has("p/backend/app/core/config.py"));
    }
}
