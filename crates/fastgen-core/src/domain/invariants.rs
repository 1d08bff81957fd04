//! Cross-field invariant registry.
//!
//! # Design Rationale
//!
//! Scattering "X requires Y" checks across setters would mean one rule can
//! hide in five places. This module replaces that with a single static
//! registry: each invariant is described exactly once by an
//! [`InvariantRule`] — a stable name, the user-facing message, and a pure
//! predicate over the whole [`ProjectConfig`]. Validation is an O(n) walk of
//! the table.
//!
//! # Adding a New Invariant
//!
//! 1. Add one [`InvariantRule`] entry to [`INVARIANT_REGISTRY`]
//! 2. That's it — no other files change
//!
//! # Ordering
//!
//! Validation is fail-fast: the first violated rule aborts with its message.
//! Registry order therefore *is* the report order; keep related rules
//! adjacent so the first failure is the most fundamental one (e.g. "admin
//! panel requires a database" fires before the ORM variant rule).

use crate::domain::config::ProjectConfig;
use crate::domain::error::DomainError;
use crate::domain::options::{
    AiFramework, Database, LlmProvider, RateLimitStorage, TaskQueue, WebSocketAuth,
};

use std::ops::Deref;

// ── Rule definition ──────────────────────────────────────────────────────────

/// One cross-field invariant.
///
/// `violated` returns `true` when the configuration breaks the rule. Rules
/// are pure functions of the configuration; none has side effects and none
/// mutates its input.
#[derive(Clone, Copy)]
pub struct InvariantRule {
    /// Stable identifier, used in error values and tests.
    pub name: &'static str,

    /// User-facing, single-line explanation of the violation.
    pub message: &'static str,

    /// Predicate: does `config` violate this rule?
    pub violated: fn(&ProjectConfig) -> bool,
}

impl std::fmt::Debug for InvariantRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvariantRule")
            .field("name", &self.name)
            .finish()
    }
}

fn openrouter_with(config: &ProjectConfig, framework: AiFramework) -> bool {
    config.enable_ai_agent
        && config.ai_framework == framework
        && config.llm_provider == LlmProvider::Openrouter
}

/// Single source of truth for every cross-field rule.
pub static INVARIANT_REGISTRY: &[InvariantRule] = &[
    // ── Persistence-backed features ──────────────────────────────────────────
    InvariantRule {
        name: "admin_panel_requires_database",
        message: "Admin panel requires a database",
        violated: |c| c.enable_admin_panel && c.database == Database::None,
    },
    InvariantRule {
        name: "admin_panel_requires_sql_database",
        message: "Admin panel requires PostgreSQL or SQLite, not a document database",
        violated: |c| c.enable_admin_panel && c.database == Database::Mongodb,
    },
    InvariantRule {
        name: "admin_panel_requires_sqlalchemy",
        message: "Admin panel requires the SQLAlchemy ORM; SQLModel is not supported. \
                  Use orm=sqlalchemy or disable the admin panel",
        violated: |c| c.enable_admin_panel && c.orm == crate::domain::options::Orm::Sqlmodel,
    },
    InvariantRule {
        name: "sqlmodel_requires_sql_database",
        message: "SQLModel requires a PostgreSQL or SQLite database",
        violated: |c| {
            c.orm == crate::domain::options::Orm::Sqlmodel
                && c.database.is_some()
                && !c.database.is_sql()
        },
    },
    InvariantRule {
        name: "session_management_requires_database",
        message: "Session management requires a database",
        violated: |c| c.enable_session_management && c.database == Database::None,
    },
    InvariantRule {
        name: "conversation_persistence_requires_database",
        message: "Conversation persistence requires a database",
        violated: |c| c.enable_conversation_persistence && c.database == Database::None,
    },
    InvariantRule {
        name: "webhooks_require_database",
        message: "Webhooks require a database to store subscriptions and delivery history",
        violated: |c| c.enable_webhooks && c.database == Database::None,
    },
    // ── Redis-backed features ────────────────────────────────────────────────
    InvariantRule {
        name: "caching_requires_redis",
        message: "Caching requires Redis to be enabled",
        violated: |c| c.enable_caching && !c.enable_redis,
    },
    InvariantRule {
        name: "rate_limit_redis_storage_requires_redis",
        message: "Rate limiting with Redis storage requires Redis to be enabled",
        violated: |c| {
            c.enable_rate_limiting
                && c.rate_limit_storage == RateLimitStorage::Redis
                && !c.enable_redis
        },
    },
    InvariantRule {
        name: "task_queue_requires_redis",
        message: "Background task queues require Redis to be enabled; \
                  all supported queues use Redis as broker/backend",
        violated: |c| c.task_queue.is_some() && !c.enable_redis,
    },
    // ── Authentication agreement ─────────────────────────────────────────────
    InvariantRule {
        name: "websocket_jwt_auth_requires_jwt",
        message: "WebSocket JWT authentication requires JWT auth to be enabled",
        violated: |c| c.websocket_auth == WebSocketAuth::Jwt && !c.auth.issues_jwt(),
    },
    InvariantRule {
        name: "websocket_api_key_auth_requires_api_key",
        message: "WebSocket API key authentication requires API key auth to be enabled",
        violated: |c| c.websocket_auth == WebSocketAuth::ApiKey && !c.auth.issues_api_key(),
    },
    InvariantRule {
        name: "admin_auth_requires_jwt",
        message: "Admin panel authentication requires JWT auth to be enabled. \
                  Either enable JWT auth or set admin_require_auth=false",
        violated: |c| c.enable_admin_panel && c.admin_require_auth && !c.auth.issues_jwt(),
    },
    InvariantRule {
        name: "session_management_requires_jwt",
        message: "Session management requires JWT auth to be enabled",
        violated: |c| c.enable_session_management && !c.auth.issues_jwt(),
    },
    InvariantRule {
        name: "oauth_requires_jwt",
        message: "OAuth authentication requires JWT auth to be enabled; \
                  OAuth issues sessions through the JWT mechanism after social login",
        violated: |c| c.oauth_provider.is_some() && !c.auth.issues_jwt(),
    },
    // ── AI agent ─────────────────────────────────────────────────────────────
    InvariantRule {
        name: "conversation_persistence_requires_ai_agent",
        message: "Conversation persistence requires the AI agent to be enabled",
        violated: |c| c.enable_conversation_persistence && !c.enable_ai_agent,
    },
    InvariantRule {
        name: "openrouter_unsupported_with_langchain",
        message: "OpenRouter is not supported with LangChain",
        violated: |c| openrouter_with(c, AiFramework::Langchain),
    },
    InvariantRule {
        name: "openrouter_unsupported_with_langgraph",
        message: "OpenRouter is not supported with LangGraph",
        violated: |c| openrouter_with(c, AiFramework::Langgraph),
    },
    InvariantRule {
        name: "openrouter_unsupported_with_crewai",
        message: "OpenRouter is not supported with CrewAI",
        violated: |c| openrouter_with(c, AiFramework::Crewai),
    },
    InvariantRule {
        name: "openrouter_unsupported_with_deepagents",
        message: "DeepAgents does not support OpenRouter. Use the OpenAI or Anthropic provider",
        violated: |c| openrouter_with(c, AiFramework::Deepagents),
    },
    // ── Instrumentation targets ──────────────────────────────────────────────
    InvariantRule {
        name: "database_instrumentation_requires_database",
        message: "Database instrumentation requires a database to be enabled",
        violated: |c| {
            c.enable_telemetry && c.instrumentation.database && c.database == Database::None
        },
    },
    InvariantRule {
        name: "redis_instrumentation_requires_redis",
        message: "Redis instrumentation requires Redis to be enabled",
        violated: |c| c.enable_telemetry && c.instrumentation.redis && !c.enable_redis,
    },
    InvariantRule {
        name: "task_queue_instrumentation_requires_celery",
        message: "Task-queue instrumentation requires Celery as the task queue",
        violated: |c| {
            c.enable_telemetry && c.instrumentation.task_queue && c.task_queue != TaskQueue::Celery
        },
    },
];

// ── Validation ───────────────────────────────────────────────────────────────

/// A configuration that has passed every schema check and every invariant.
///
/// This is the only input type the context compiler accepts, so "compile is
/// total over validated configurations" is enforced by construction rather
/// than by convention.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidConfig(ProjectConfig);

impl ValidConfig {
    pub fn into_inner(self) -> ProjectConfig {
        self.0
    }
}

impl Deref for ValidConfig {
    type Target = ProjectConfig;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Validate a configuration: schema checks first, then the invariant
/// registry in order, failing fast on the first violation.
///
/// Never mutates its input; consumes it only to hand back the `ValidConfig`
/// witness.
pub fn validate(config: ProjectConfig) -> Result<ValidConfig, DomainError> {
    config.check_fields()?;

    for rule in INVARIANT_REGISTRY {
        if (rule.violated)(&config) {
            tracing::debug!(rule = rule.name, "invariant violated");
            return Err(DomainError::InvariantViolation {
                rule: rule.name,
                message: rule.message,
            });
        }
    }

    Ok(ValidConfig(config))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
