//! Generate Service - main application orchestrator.
//!
//! This service coordinates the entire generation pipeline:
//! 1. Validate the configuration (fail-fast on the first violated invariant)
//! 2. Compile the decision context
//! 3. Render the full tree via the template engine port
//! 4. Prune the tree against the same context
//! 5. Run best-effort post-generation tooling
//!
//! The pipeline is single-threaded and strictly sequential: each step's
//! output is the next step's sole input. A failure at any stage aborts the
//! run and leaves whatever was already written on disk — cleanup of partial
//! output is a caller concern, not this core's.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, ToolRunner},
        pruner::{ArtifactPruner, PruneReport},
    },
    domain::{GeneratorStamp, ProjectConfig, compile, validate},
    error::FastgenResult,
};

/// Outcome of a successful generation run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Root of the generated project.
    pub project_path: PathBuf,
    /// What the pruning pass removed.
    pub prune_report: PruneReport,
    /// Non-fatal tooling failures, for the caller to surface as warnings.
    pub tooling_warnings: Vec<String>,
}

/// Main generation service.
///
/// Owns the driven ports; the CLI wires in concrete adapters.
pub struct GenerateService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    tooling: Box<dyn ToolRunner>,
}

impl GenerateService {
    pub fn new(
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        tooling: Box<dyn ToolRunner>,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            tooling,
        }
    }

    /// Generate a project under `output_dir/<slug>`.
    ///
    /// Consumes the configuration: it is validated here, once, and only the
    /// `ValidConfig` witness flows onward.
    #[instrument(skip_all, fields(project = %config.project_name, output = %output_dir.display()))]
    pub fn generate(
        &self,
        config: ProjectConfig,
        stamp: &GeneratorStamp,
        output_dir: &Path,
    ) -> FastgenResult<GenerationOutcome> {
        // 1. Cross-field validation.
        let config = validate(config)?;
        info!(database = %config.database, auth = %config.auth, "configuration valid");

        // 2. Compile the decision context. Total for a ValidConfig.
        let ctx = compile(&config, stamp);

        // 3. Refuse to write over an existing project.
        let project_path = output_dir.join(config.project_name.slug());
        if self.filesystem.exists(&project_path) {
            return Err(ApplicationError::ProjectExists { path: project_path }.into());
        }

        // 4. Materialize the full tree.
        self.renderer.render(&ctx, &project_path)?;
        info!("template rendering complete");

        // 5. Prune with the same context the renderer consumed.
        let prune_report = ArtifactPruner::new(self.filesystem.as_ref()).prune(&project_path, &ctx)?;

        // 6. Best-effort tooling; failures degrade, never abort.
        let mut tooling_warnings = Vec::new();
        if let Err(reason) = self.tooling.generate_lockfile(&project_path) {
            warn!(reason, "lockfile generation failed");
            tooling_warnings.push(format!("lockfile generation failed: {reason}"));
        }
        if let Err(reason) = self.tooling.format_code(&project_path) {
            warn!(reason, "code formatting failed");
            tooling_warnings.push(format!("code formatting failed: {reason}"));
        }

        info!(removed = prune_report.total(), "generation complete");
        Ok(GenerationOutcome {
            project_path,
            prune_report,
            tooling_warnings,
        })
    }
}
