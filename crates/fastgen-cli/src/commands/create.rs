//! Implementation of the `fastgen create` command.
//!
//! Responsibility: translate CLI arguments into a `ProjectConfig` (or a
//! preset), call the core generate service, and display results. No
//! decision logic lives here — every cross-field rule stays in the core's
//! invariant registry.

use tracing::{debug, info, instrument};

use fastgen_adapters::{LocalFilesystem, NoopToolRunner, PythonToolchain, SkeletonRenderer};
use fastgen_core::{
    application::GenerateService,
    domain::{GeneratorStamp, Preset, ProjectConfig, ProjectName},
    error::FastgenError,
};

use crate::{
    cli::{CreateArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `fastgen create` command.
///
/// Dispatch sequence:
/// 1. Validate the project name (schema error, exit 2)
/// 2. Assemble a `ProjectConfig` from a preset or from individual flags
/// 3. Confirm with user unless `--yes` or `--quiet`
/// 4. Early-exit if `--dry-run`
/// 5. Execute the pipeline via `GenerateService`
/// 6. Print tooling warnings and next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: CreateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Name first: everything downstream hangs off it.
    let name = ProjectName::new(args.name.as_str()).map_err(|e| CliError::InvalidProjectName {
        name: args.name.clone(),
        reason: e.to_string(),
    })?;

    // 2. Assemble the configuration.
    let project = build_config(&args, name, &config)?;

    debug!(
        database = %project.database,
        auth = %project.auth,
        task_queue = %project.task_queue,
        "configuration assembled"
    );

    // 3. Show configuration and confirm.
    if !global.quiet && !args.yes {
        show_configuration(&project, &args, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    let project_path = args.output.join(project.project_name.slug());

    // 4. Dry run: validate and describe, but do not write. Real runs
    //    validate inside the service; checking here keeps an invalid
    //    combination failing with exit 2 even without a write.
    if args.dry_run {
        let valid = fastgen_core::domain::validate(project)
            .map_err(FastgenError::from)
            .map_err(CliError::Core)?;
        output.info(&format!(
            "Dry run: would create '{}' at {}",
            valid.project_name,
            project_path.display(),
        ))?;
        return Ok(());
    }

    // 5. Handle --force by clearing the target first.
    let filesystem = LocalFilesystem::new();
    if project_path.exists() {
        if !args.force {
            return Err(CliError::ProjectExists { path: project_path });
        }
        std::fs::remove_dir_all(&project_path)?;
    }

    // 6. Wire adapters and run the pipeline.
    let renderer = Box::new(SkeletonRenderer::new(Box::new(filesystem)));
    let tooling: Box<dyn fastgen_core::application::ports::ToolRunner> = if args.no_tooling {
        Box::new(NoopToolRunner::new())
    } else {
        Box::new(PythonToolchain::new())
    };
    let service = GenerateService::new(renderer, Box::new(filesystem), tooling);

    let stamp = GeneratorStamp::new(
        "fastgen",
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().to_rfc3339(),
    );

    output.header(&format!("Creating '{}'...", project.project_name))?;
    info!(path = %project_path.display(), "generation started");

    let outcome = service
        .generate(project, &stamp, &args.output)
        .map_err(CliError::Core)?;

    info!(
        removed = outcome.prune_report.total(),
        "generation completed"
    );

    for warning in &outcome.tooling_warnings {
        output.warning(warning)?;
    }

    // 7. Success + next steps.
    output.success(&format!(
        "Project created at {}",
        outcome.project_path.display()
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", outcome.project_path.display()))?;
        output.print("  uv sync          # in backend/")?;
        output.print("  # Start building!")?;
    }

    Ok(())
}

// ── Configuration assembly ────────────────────────────────────────────────────

/// Build the `ProjectConfig` for this invocation.
///
/// Three mutually exclusive modes (clap enforces the exclusivity):
/// `--minimal`, `--preset <name>`, or individual feature flags. A preset
/// fully determines every field it mentions; fields it does not mention
/// keep schema defaults — never values from other flags.
fn build_config(args: &CreateArgs, name: ProjectName, app: &AppConfig) -> CliResult<ProjectConfig> {
    if args.minimal {
        return Ok(Preset::Minimal.resolve(name));
    }
    if let Some(preset) = &args.preset {
        let preset: Preset = preset.parse().map_err(FastgenError::from)?;
        return Ok(preset.resolve(name));
    }

    let mut config = ProjectConfig::new(name);

    // Identity
    if let Some(description) = &args.description {
        config.project_description = description.clone();
    }
    if let Some(author) = &app.author.name {
        config.author_name = author.clone();
    }
    if let Some(email) = &app.author.email {
        config.author_email = email.clone();
    }

    // Database
    config.database = parse(&args.database)?;
    config.orm = parse(&args.orm)?;
    config.db_pool_size = args.db_pool_size;
    config.db_max_overflow = args.db_max_overflow;

    // Auth
    config.auth = parse(&args.auth)?;
    if args.oauth_google {
        config.oauth_provider = fastgen_core::domain::OAuthProvider::Google;
    }
    config.enable_session_management = args.session_management;

    // Observability
    config.enable_telemetry = !args.no_telemetry;
    config.enable_sentry = args.sentry;
    config.enable_prometheus = args.prometheus;
    // Follow the enabled integrations so the instrumentation invariants
    // hold without extra flags.
    config.instrumentation.database = config.database.is_some();
    config.instrumentation.redis = args.redis;

    // Tasks & integrations
    config.task_queue = parse(&args.task_queue)?;
    config.enable_redis = args.redis;
    config.enable_caching = args.caching;
    config.enable_rate_limiting = args.rate_limiting;
    config.rate_limit_storage = parse(&args.rate_limit_storage)?;
    config.enable_admin_panel = args.admin_panel;
    config.enable_websockets = args.websockets;
    config.websocket_auth = parse(&args.websocket_auth)?;
    config.enable_file_storage = args.file_storage;
    config.enable_webhooks = args.webhooks;

    // AI agent
    config.enable_ai_agent = args.ai_agent;
    config.ai_framework = parse(&args.ai_framework)?;
    config.llm_provider = parse(&args.llm_provider)?;
    config.enable_conversation_persistence = args.conversation_persistence;

    // Frontend
    config.frontend = parse(&args.frontend)?;
    config.enable_i18n = args.i18n;
    config.frontend_port = args.frontend_port;

    // DevOps
    config.include_example_crud = !args.no_example_crud;
    config.enable_docker = !args.no_docker;
    config.enable_kubernetes = args.kubernetes;
    config.reverse_proxy = parse(&args.reverse_proxy)?;
    config.ci = parse(&args.ci)?;
    config.generate_env = !args.no_env;
    config.python_version = parse(&args.python_version)?;
    config.backend_port = args.backend_port;

    Ok(config)
}

/// Parse a clap-validated string into its core option type.
///
/// clap's `value_parser` already restricted the surface, so a failure here
/// means the CLI's possible-values list and the core `FromStr` drifted
/// apart — surfaced as a core schema error rather than hidden.
fn parse<T>(raw: &str) -> CliResult<T>
where
    T: std::str::FromStr<Err = fastgen_core::domain::DomainError>,
{
    raw.parse::<T>()
        .map_err(|e| CliError::Core(FastgenError::from(e)))
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    project: &ProjectConfig,
    args: &CreateArgs,
    out: &OutputManager,
) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:      {}", project.project_name))?;
    if let Some(preset) = &args.preset {
        out.print(&format!("  Preset:       {preset}"))?;
    } else if args.minimal {
        out.print("  Preset:       minimal")?;
    }
    out.print(&format!("  Database:     {}", project.database))?;
    out.print(&format!("  Auth:         {}", project.auth))?;
    if project.task_queue.is_some() {
        out.print(&format!("  Task queue:   {}", project.task_queue))?;
    }
    if project.enable_ai_agent {
        out.print(&format!(
            "  AI agent:     {} / {}",
            project.ai_framework, project.llm_provider
        ))?;
    }
    if project.frontend.is_some() {
        out.print(&format!("  Frontend:     {}", project.frontend))?;
    }
    out.print(&format!("  Location:     {}", args.output.display()))?;
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fastgen_core::domain::{AuthMode, Database, Frontend, TaskQueue};

    fn parse_args(argv: &[&str]) -> CreateArgs {
        #[derive(Debug, Parser)]
        struct Harness {
            #[command(flatten)]
            args: CreateArgs,
        }
        let full: Vec<&str> = std::iter::once("harness").chain(argv.iter().copied()).collect();
        Harness::parse_from(full).args
    }

    fn build(argv: &[&str]) -> CliResult<ProjectConfig> {
        let args = parse_args(argv);
        let name = ProjectName::new(args.name.clone()).unwrap();
        build_config(&args, name, &AppConfig::default())
    }

    #[test]
    fn defaults_assemble_cleanly() {
        let cfg = build(&["my_api"]).unwrap();
        assert_eq!(cfg.database, Database::Postgresql);
        assert_eq!(cfg.auth, AuthMode::Jwt);
        assert!(cfg.enable_docker);
        assert!(!cfg.enable_redis);
    }

    #[test]
    fn flags_map_onto_config_fields() {
        let cfg = build(&[
            "my_api",
            "--database",
            "sqlite",
            "--auth",
            "both",
            "--redis",
            "--caching",
            "--task-queue",
            "arq",
            "--frontend",
            "nextjs",
            "--no-docker",
        ])
        .unwrap();
        assert_eq!(cfg.database, Database::Sqlite);
        assert_eq!(cfg.auth, AuthMode::Both);
        assert!(cfg.enable_redis);
        assert!(cfg.enable_caching);
        assert_eq!(cfg.task_queue, TaskQueue::Arq);
        assert_eq!(cfg.frontend, Frontend::Nextjs);
        assert!(!cfg.enable_docker);
        // Instrumentation follows the integrations.
        assert!(cfg.instrumentation.redis);
    }

    #[test]
    fn database_none_clears_database_instrumentation() {
        let cfg = build(&["my_api", "--database", "none", "--auth", "none"]).unwrap();
        assert!(!cfg.instrumentation.database);
        assert!(fastgen_core::domain::validate(cfg).is_ok());
    }

    #[test]
    fn preset_overrides_ignore_schema_default_drift() {
        let cfg = build(&["my_api", "--preset", "production"]).unwrap();
        assert!(cfg.enable_redis);
        assert!(cfg.enable_kubernetes);
    }

    #[test]
    fn minimal_flag_uses_the_minimal_preset() {
        let cfg = build(&["my_api", "--minimal"]).unwrap();
        assert_eq!(cfg.database, Database::None);
        assert_eq!(cfg.auth, AuthMode::None);
    }

    #[test]
    fn oauth_flag_selects_google() {
        let cfg = build(&["my_api", "--oauth-google"]).unwrap();
        assert_eq!(
            cfg.oauth_provider,
            fastgen_core::domain::OAuthProvider::Google
        );
    }

    #[test]
    fn author_comes_from_app_config() {
        let args = parse_args(&["my_api"]);
        let name = ProjectName::new("my_api").unwrap();
        let mut app = AppConfig::default();
        app.author.name = Some("Ada Lovelace".into());
        app.author.email = Some("ada@example.com".into());

        let cfg = build_config(&args, name, &app).unwrap();
        assert_eq!(cfg.author_name, "Ada Lovelace");
        assert_eq!(cfg.author_email, "ada@example.com");
    }
}
