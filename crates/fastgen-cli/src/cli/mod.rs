//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.
//!
//! The `create` command has three mutually exclusive entry modes, enforced
//! by clap itself: full per-flag customisation (the `features` group), a
//! named `--preset`, or `--minimal`.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fastgen",
    bin_name = "fastgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} FastAPI project generation with feature-aware pruning",
    long_about = "fastgen generates production-ready FastAPI project structures \
                  from ~60 feature options, validates their combinations, and \
                  prunes everything a disabled feature would leave behind.",
    after_help = "EXAMPLES:\n\
        \x20 fastgen create my_api --database postgresql --auth jwt --redis --caching\n\
        \x20 fastgen create my_api --preset production\n\
        \x20 fastgen create tiny_api --minimal\n\
        \x20 fastgen options\n\
        \x20 fastgen completions bash > /usr/share/bash-completion/completions/fastgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "c",
        about = "Create a new FastAPI project",
        after_help = "EXAMPLES:\n\
            \x20 fastgen create my_api --database sqlite --auth api_key\n\
            \x20 fastgen create my_api --ai-agent --websockets --redis\n\
            \x20 fastgen create my_api --preset ai-agent"
    )]
    Create(CreateArgs),

    /// List every option, preset, and feature dependency.
    #[command(
        visible_alias = "opts",
        about = "List available options and presets"
    )]
    Options,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fastgen completions bash > ~/.local/share/bash-completion/completions/fastgen\n\
            \x20 fastgen completions zsh  > ~/.zfunc/_fastgen\n\
            \x20 fastgen completions fish > ~/.config/fish/completions/fastgen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Arguments for `fastgen create`.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("features").multiple(true)))]
pub struct CreateArgs {
    /// Project name, matching ^[a-z][a-z0-9_]*$.
    #[arg(value_name = "NAME", help = "Project name (e.g. my_api)")]
    pub name: String,

    /// Output directory for the generated project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Output directory"
    )]
    pub output: PathBuf,

    /// Apply a named configuration preset instead of individual flags.
    #[arg(
        long = "preset",
        value_name = "PRESET",
        value_parser = ["production", "ai-agent", "minimal"],
        conflicts_with = "features",
        help = "Apply a configuration preset"
    )]
    pub preset: Option<String>,

    /// Create a minimal project (shorthand for --preset minimal).
    #[arg(
        long = "minimal",
        conflicts_with_all = ["preset", "features"],
        help = "Create minimal project (no extras)"
    )]
    pub minimal: bool,

    // ── Project identity ─────────────────────────────────────────────────────
    /// One-line project description.
    #[arg(long = "description", group = "features", help = "Project description")]
    pub description: Option<String>,

    // ── Database ─────────────────────────────────────────────────────────────
    #[arg(
        long = "database",
        value_parser = ["postgresql", "mongodb", "sqlite", "none"],
        default_value = "postgresql",
        group = "features",
        help = "Database type"
    )]
    pub database: String,

    #[arg(
        long = "orm",
        value_parser = ["sqlalchemy", "sqlmodel"],
        default_value = "sqlalchemy",
        group = "features",
        help = "ORM flavour for SQL databases"
    )]
    pub orm: String,

    #[arg(
        long = "db-pool-size",
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..=100),
        default_value_t = 5,
        group = "features",
        help = "Database connection pool size"
    )]
    pub db_pool_size: u16,

    #[arg(
        long = "db-max-overflow",
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(..=100),
        default_value_t = 10,
        group = "features",
        help = "Database max overflow connections"
    )]
    pub db_max_overflow: u16,

    // ── Authentication ───────────────────────────────────────────────────────
    #[arg(
        long = "auth",
        value_parser = ["jwt", "api_key", "both", "none"],
        default_value = "jwt",
        group = "features",
        help = "Authentication method"
    )]
    pub auth: String,

    #[arg(long = "oauth-google", group = "features", help = "Enable Google OAuth")]
    pub oauth_google: bool,

    #[arg(
        long = "session-management",
        group = "features",
        help = "Enable session management"
    )]
    pub session_management: bool,

    // ── Observability ────────────────────────────────────────────────────────
    #[arg(long = "no-telemetry", group = "features", help = "Disable telemetry integration")]
    pub no_telemetry: bool,

    #[arg(long = "sentry", group = "features", help = "Enable Sentry error tracking")]
    pub sentry: bool,

    #[arg(long = "prometheus", group = "features", help = "Enable Prometheus metrics")]
    pub prometheus: bool,

    // ── Background tasks & integrations ──────────────────────────────────────
    #[arg(
        long = "task-queue",
        value_parser = ["none", "celery", "taskiq", "arq"],
        default_value = "none",
        group = "features",
        help = "Background task queue"
    )]
    pub task_queue: String,

    #[arg(long = "redis", group = "features", help = "Enable Redis")]
    pub redis: bool,

    #[arg(long = "caching", group = "features", help = "Enable caching (requires --redis)")]
    pub caching: bool,

    #[arg(long = "rate-limiting", group = "features", help = "Enable rate limiting")]
    pub rate_limiting: bool,

    #[arg(
        long = "rate-limit-storage",
        value_parser = ["memory", "redis"],
        default_value = "memory",
        group = "features",
        help = "Rate limit counter storage"
    )]
    pub rate_limit_storage: String,

    #[arg(long = "admin-panel", group = "features", help = "Enable admin panel")]
    pub admin_panel: bool,

    #[arg(long = "websockets", group = "features", help = "Enable WebSocket support")]
    pub websockets: bool,

    #[arg(
        long = "websocket-auth",
        value_parser = ["none", "jwt", "api_key"],
        default_value = "none",
        group = "features",
        help = "WebSocket authentication mode"
    )]
    pub websocket_auth: String,

    #[arg(long = "file-storage", group = "features", help = "Enable S3/MinIO file storage")]
    pub file_storage: bool,

    #[arg(long = "webhooks", group = "features", help = "Enable webhooks support")]
    pub webhooks: bool,

    // ── AI agent ─────────────────────────────────────────────────────────────
    #[arg(
        long = "ai-agent",
        group = "features",
        help = "Enable AI agent with WebSocket streaming"
    )]
    pub ai_agent: bool,

    #[arg(
        long = "ai-framework",
        value_parser = ["pydantic_ai", "langchain", "langgraph", "crewai", "deepagents"],
        default_value = "pydantic_ai",
        group = "features",
        help = "AI agent framework"
    )]
    pub ai_framework: String,

    #[arg(
        long = "llm-provider",
        value_parser = ["openai", "anthropic", "openrouter"],
        default_value = "openai",
        group = "features",
        help = "LLM provider"
    )]
    pub llm_provider: String,

    #[arg(
        long = "conversation-persistence",
        group = "features",
        help = "Persist agent conversations (requires --ai-agent)"
    )]
    pub conversation_persistence: bool,

    // ── Frontend ─────────────────────────────────────────────────────────────
    #[arg(
        long = "frontend",
        value_parser = ["none", "nextjs"],
        default_value = "none",
        group = "features",
        help = "Frontend framework"
    )]
    pub frontend: String,

    #[arg(long = "i18n", group = "features", help = "Enable internationalization")]
    pub i18n: bool,

    #[arg(
        long = "frontend-port",
        value_name = "PORT",
        value_parser = clap::value_parser!(u16).range(1..),
        default_value_t = 3000,
        group = "features",
        help = "Frontend server port"
    )]
    pub frontend_port: u16,

    // ── DevOps ───────────────────────────────────────────────────────────────
    #[arg(long = "no-example-crud", group = "features", help = "Skip example CRUD endpoint")]
    pub no_example_crud: bool,

    #[arg(long = "no-docker", group = "features", help = "Disable Docker files")]
    pub no_docker: bool,

    #[arg(long = "kubernetes", group = "features", help = "Generate Kubernetes manifests")]
    pub kubernetes: bool,

    #[arg(
        long = "reverse-proxy",
        value_parser = [
            "traefik_included",
            "traefik_external",
            "nginx_included",
            "nginx_external",
            "none",
        ],
        default_value = "traefik_included",
        group = "features",
        help = "Reverse proxy configuration"
    )]
    pub reverse_proxy: String,

    #[arg(
        long = "ci",
        value_parser = ["github", "gitlab", "none"],
        default_value = "github",
        group = "features",
        help = "CI/CD system"
    )]
    pub ci: String,

    #[arg(long = "no-env", group = "features", help = "Skip .env file generation")]
    pub no_env: bool,

    #[arg(
        long = "python-version",
        value_parser = ["3.11", "3.12", "3.13"],
        default_value = "3.12",
        group = "features",
        help = "Python version"
    )]
    pub python_version: String,

    #[arg(
        long = "backend-port",
        value_name = "PORT",
        value_parser = clap::value_parser!(u16).range(1..),
        default_value_t = 8000,
        group = "features",
        help = "Backend server port"
    )]
    pub backend_port: u16,

    // ── Run behaviour (not part of the feature group) ────────────────────────
    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Overwrite an existing directory (destructive).
    #[arg(long = "force", help = "Overwrite existing directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Skip best-effort lockfile/formatter tooling after generation.
    #[arg(long = "no-tooling", help = "Skip post-generation lockfile and formatting")]
    pub no_tooling: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fastgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        // clap's internal consistency check — catches conflicts, missing values, etc.
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_create_command() {
        let cli = Cli::parse_from([
            "fastgen", "create", "my_api", "--database", "sqlite", "--auth", "api_key",
        ]);
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.name, "my_api");
                assert_eq!(args.database, "sqlite");
                assert_eq!(args.auth, "api_key");
            }
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn preset_conflicts_with_feature_flags() {
        let result = Cli::try_parse_from([
            "fastgen", "create", "my_api", "--preset", "production", "--redis",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn minimal_conflicts_with_preset() {
        let result = Cli::try_parse_from([
            "fastgen", "create", "my_api", "--minimal", "--preset", "production",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn minimal_alone_parses() {
        let cli = Cli::parse_from(["fastgen", "create", "my_api", "--minimal", "--yes"]);
        match cli.command {
            Commands::Create(args) => assert!(args.minimal),
            other => panic!("expected create, got {other:?}"),
        }
    }

    #[test]
    fn bad_enum_value_is_rejected() {
        let result = Cli::try_parse_from(["fastgen", "create", "my_api", "--database", "oracle"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_port_is_rejected_at_parse_time() {
        let result =
            Cli::try_parse_from(["fastgen", "create", "my_api", "--backend-port", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["fastgen", "--quiet", "--verbose", "options"]);
        assert!(result.is_err());
    }
}
