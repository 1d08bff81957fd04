//! The `ProjectConfig` aggregate and its field-level schema checks.
//!
//! A `ProjectConfig` is the full description of one generation run: every
//! user-selectable field, grouped by feature area, with static defaults.
//! Lifecycle: constructed once from CLI flags or a preset, validated
//! immediately (`invariants::validate`), immutable thereafter — validation
//! hands back a [`ValidConfig`](crate::domain::invariants::ValidConfig)
//! wrapper and nothing downstream ever sees the raw aggregate again.
//!
//! Two validation layers, deliberately separate:
//!
//! 1. **Schema checks** (this file) — single-field pattern/range checks.
//!    The name pattern is enforced at [`ProjectName`] construction; numeric
//!    bounds by [`ProjectConfig::check_fields`].
//! 2. **Cross-field invariants** (`invariants.rs`) — rules spanning several
//!    fields, run by the validator after the schema layer passes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::options::{
    AdminEnvironment, AiFramework, AuthMode, CiSystem, Database, Frontend, LlmProvider,
    OAuthProvider, Orm, PythonVersion, RateLimitStorage, ReverseProxy, TaskQueue, WebSocketAuth,
};

// ── ProjectName ───────────────────────────────────────────────────────────────

/// Pattern-constrained project name: `^[a-z][a-z0-9_]*$`.
///
/// The pattern is small enough that a hand-rolled check beats pulling in a
/// regex engine; it must stay in sync with the help text in the CLI crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let mut chars = name.chars();
        let head_ok = chars.next().is_some_and(|c| c.is_ascii_lowercase());
        let tail_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if head_ok && tail_ok {
            Ok(Self(name))
        } else {
            Err(DomainError::InvalidField {
                field: "project_name",
                value: name,
                reason: "must match ^[a-z][a-z0-9_]*$ (lowercase, digits, underscores)".into(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory/module-safe form. The pattern already forbids hyphens, so
    /// this is the name itself.
    pub fn slug(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProjectName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectName> for String {
    fn from(name: ProjectName) -> Self {
        name.0
    }
}

// ── Instrumentation ───────────────────────────────────────────────────────────

/// Telemetry instrumentation sub-features.
///
/// Each flag individually requires its target feature to be enabled — those
/// rules live in `invariants.rs`, gated on `enable_telemetry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrumentation {
    /// Instrument the API framework itself.
    pub api: bool,
    /// Instrument database queries.
    pub database: bool,
    /// Instrument Redis commands.
    pub redis: bool,
    /// Instrument the task queue (celery only).
    pub task_queue: bool,
    /// Instrument outgoing HTTP client calls.
    pub http_client: bool,
}

impl Default for Instrumentation {
    fn default() -> Self {
        Self {
            api: true,
            database: true,
            redis: false,
            task_queue: false,
            http_client: false,
        }
    }
}

// ── ProjectConfig ─────────────────────────────────────────────────────────────

/// Full project configuration for one generation run.
///
/// Fields are structurally independent (any combination can be *expressed*)
/// but not semantically independent — see the invariant registry. Defaults
/// mirror a sensible production-ish starting point: PostgreSQL, JWT auth,
/// telemetry on, Docker on, GitHub CI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    // Basic info
    pub project_name: ProjectName,
    pub project_description: String,
    pub author_name: String,
    pub author_email: String,

    // Database
    pub database: Database,
    pub orm: Orm,
    pub db_pool_size: u16,
    pub db_max_overflow: u16,
    pub db_pool_timeout_secs: u16,

    // Authentication
    pub auth: AuthMode,
    pub oauth_provider: OAuthProvider,
    pub enable_session_management: bool,

    // Observability
    pub enable_telemetry: bool,
    pub instrumentation: Instrumentation,
    pub enable_sentry: bool,
    pub enable_prometheus: bool,

    // Background tasks
    pub task_queue: TaskQueue,

    // Optional integrations
    pub enable_redis: bool,
    pub enable_caching: bool,
    pub enable_rate_limiting: bool,
    pub rate_limit_requests: u32,
    pub rate_limit_period_secs: u32,
    pub rate_limit_storage: RateLimitStorage,
    pub enable_pagination: bool,
    pub enable_admin_panel: bool,
    pub admin_environments: AdminEnvironment,
    pub admin_require_auth: bool,
    pub enable_websockets: bool,
    pub enable_file_storage: bool,
    pub enable_ai_agent: bool,
    pub ai_framework: AiFramework,
    pub llm_provider: LlmProvider,
    pub enable_conversation_persistence: bool,
    pub enable_webhooks: bool,
    pub websocket_auth: WebSocketAuth,
    pub enable_cors: bool,
    pub enable_orjson: bool,

    // Frontend
    pub frontend: Frontend,
    pub enable_i18n: bool,
    pub frontend_port: u16,

    // Example CRUD
    pub include_example_crud: bool,

    // Dev tools
    pub enable_pytest: bool,
    pub enable_precommit: bool,
    pub enable_makefile: bool,
    pub enable_docker: bool,
    pub reverse_proxy: ReverseProxy,
    pub ci: CiSystem,
    pub enable_kubernetes: bool,
    pub generate_env: bool,

    // Runtime
    pub python_version: PythonVersion,
    pub backend_port: u16,
}

impl ProjectConfig {
    /// A configuration with schema defaults for everything but the name.
    pub fn new(project_name: ProjectName) -> Self {
        Self {
            project_name,
            project_description: "A FastAPI project".into(),
            author_name: "Your Name".into(),
            author_email: "your@email.com".into(),

            database: Database::Postgresql,
            orm: Orm::Sqlalchemy,
            db_pool_size: 5,
            db_max_overflow: 10,
            db_pool_timeout_secs: 30,

            auth: AuthMode::Jwt,
            oauth_provider: OAuthProvider::None,
            enable_session_management: false,

            enable_telemetry: true,
            instrumentation: Instrumentation::default(),
            enable_sentry: false,
            enable_prometheus: false,

            task_queue: TaskQueue::None,

            enable_redis: false,
            enable_caching: false,
            enable_rate_limiting: false,
            rate_limit_requests: 100,
            rate_limit_period_secs: 60,
            rate_limit_storage: RateLimitStorage::Memory,
            enable_pagination: true,
            enable_admin_panel: false,
            admin_environments: AdminEnvironment::DevStaging,
            admin_require_auth: true,
            enable_websockets: false,
            enable_file_storage: false,
            enable_ai_agent: false,
            ai_framework: AiFramework::PydanticAi,
            llm_provider: LlmProvider::Openai,
            enable_conversation_persistence: false,
            enable_webhooks: false,
            websocket_auth: WebSocketAuth::None,
            enable_cors: true,
            enable_orjson: true,

            frontend: Frontend::None,
            enable_i18n: false,
            frontend_port: 3000,

            include_example_crud: true,

            enable_pytest: true,
            enable_precommit: true,
            enable_makefile: true,
            enable_docker: true,
            reverse_proxy: ReverseProxy::TraefikIncluded,
            ci: CiSystem::Github,
            enable_kubernetes: false,
            generate_env: true,

            python_version: PythonVersion::V3_12,
            backend_port: 8000,
        }
    }

    /// Field-level schema checks: numeric bounds and the e-mail shape.
    ///
    /// Run by the validator before any cross-field rule, and available to
    /// callers that construct configurations programmatically. A failure
    /// here is a schema error, never an invariant error.
    pub fn check_fields(&self) -> Result<(), DomainError> {
        fn bounded<T: PartialOrd + fmt::Display + Copy>(
            field: &'static str,
            value: T,
            min: T,
            max: T,
        ) -> Result<(), DomainError> {
            if value < min || value > max {
                return Err(DomainError::InvalidField {
                    field,
                    value: value.to_string(),
                    reason: format!("must be between {min} and {max}"),
                });
            }
            Ok(())
        }

        bounded("backend_port", self.backend_port, 1, 65535)?;
        bounded("frontend_port", self.frontend_port, 1, 65535)?;
        bounded("db_pool_size", self.db_pool_size, 1, 100)?;
        bounded("db_max_overflow", self.db_max_overflow, 0, 100)?;
        bounded("db_pool_timeout_secs", self.db_pool_timeout_secs, 1, 600)?;
        bounded("rate_limit_requests", self.rate_limit_requests, 1, 1_000_000)?;
        bounded("rate_limit_period_secs", self.rate_limit_period_secs, 1, 86_400)?;

        if !self.author_email.contains('@') {
            return Err(DomainError::InvalidField {
                field: "author_email",
                value: self.author_email.clone(),
                reason: "must be an e-mail address".into(),
            });
        }

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_names_pass() {
        for name in ["api", "my_app", "svc2", "a"] {
            assert!(ProjectName::new(name).is_ok(), "failed for: {name}");
        }
    }

    #[test]
    fn invalid_names_are_rejected() {
        for name in ["", "My_App", "2app", "my-app", "app!", "_app"] {
            assert!(ProjectName::new(name).is_err(), "accepted: {name}");
        }
    }

    #[test]
    fn name_error_is_a_schema_error() {
        let err = ProjectName::new("My-App").unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidField {
                field: "project_name",
                ..
            }
        ));
    }

    #[test]
    fn slug_equals_name() {
        let name = ProjectName::new("my_app").unwrap();
        assert_eq!(name.slug(), "my_app");
    }

    fn base() -> ProjectConfig {
        ProjectConfig::new(ProjectName::new("demo").unwrap())
    }

    #[test]
    fn defaults_pass_field_checks() {
        assert!(base().check_fields().is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = base();
        cfg.backend_port = 0;
        let err = cfg.check_fields().unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidField {
                field: "backend_port",
                ..
            }
        ));
    }

    #[test]
    fn pool_size_zero_is_rejected() {
        let mut cfg = base();
        cfg.db_pool_size = 0;
        assert!(cfg.check_fields().is_err());
    }

    #[test]
    fn rate_limit_zero_period_is_rejected() {
        let mut cfg = base();
        cfg.rate_limit_period_secs = 0;
        assert!(cfg.check_fields().is_err());
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut cfg = base();
        cfg.author_email = "not-an-email".into();
        let err = cfg.check_fields().unwrap_err();
        assert!(err.to_string().contains("author_email"));
    }

    #[test]
    fn default_stack_is_production_ish() {
        let cfg = base();
        assert_eq!(cfg.database, Database::Postgresql);
        assert_eq!(cfg.auth, AuthMode::Jwt);
        assert!(cfg.enable_telemetry);
        assert!(cfg.enable_docker);
        assert_eq!(cfg.ci, CiSystem::Github);
        assert!(!cfg.enable_redis);
    }

    #[test]
    fn config_serde_round_trip() {
        let cfg = base();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ProjectConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn serde_rejects_bad_name() {
        let json = serde_json::to_string(&base())
            .unwrap()
            .replace("\"demo\"", "\"Bad-Name\"");
        assert!(serde_json::from_str::<ProjectConfig>(&json).is_err());
    }
}
