//! Decision context: the flat key→value map both executors consume.
//!
//! `compile` is the single place where configuration fields become
//! template-visible decisions. The template engine and the pruning manifest
//! both read the *compiled* keys and never the raw configuration — that one
//! compilation is what keeps the two decision procedures in agreement.
//!
//! # Contract
//!
//! - The key set is fixed and total: every key any template or path rule
//!   references exists for every valid configuration. The manifest's
//!   `referenced_keys()` plus the totality test enforce this at test time.
//! - Keys are lowercase snake_case; values are booleans or short strings
//!   (numbers are carried in string form).
//! - A context is never mutated after compilation; there is no `&mut`
//!   accessor and no entity recomputes it independently.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use crate::domain::invariants::ValidConfig;

// ── Values ───────────────────────────────────────────────────────────────────

/// A single context entry: a flag or a short string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    Bool(bool),
    Text(String),
}

impl From<bool> for ContextValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for ContextValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for ContextValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

// ── GeneratorStamp ───────────────────────────────────────────────────────────

/// Provenance metadata stamped into every generated project.
///
/// Built by the caller (the CLI reads its package version and the clock) so
/// that `compile` itself stays deterministic and side-effect-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorStamp {
    pub name: String,
    pub version: String,
    pub generated_at: String,
}

impl GeneratorStamp {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        generated_at: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            generated_at: generated_at.into(),
        }
    }
}

// ── DecisionContext ──────────────────────────────────────────────────────────

/// Flat, ordered map of decision keys. Read-only once compiled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecisionContext {
    entries: BTreeMap<&'static str, ContextValue>,
}

impl DecisionContext {
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Read a boolean key. A missing key is a manifest/compiler defect, not
    /// a user error — see [`DomainError::MissingContextKey`].
    pub fn flag(&self, key: &'static str) -> Result<bool, DomainError> {
        match self.entries.get(key) {
            Some(ContextValue::Bool(v)) => Ok(*v),
            Some(ContextValue::Text(_)) => Err(DomainError::ContextKindMismatch { key }),
            None => Err(DomainError::MissingContextKey { key }),
        }
    }

    /// Read a string key.
    pub fn text(&self, key: &'static str) -> Result<&str, DomainError> {
        match self.entries.get(key) {
            Some(ContextValue::Text(v)) => Ok(v),
            Some(ContextValue::Bool(_)) => Err(DomainError::ContextKindMismatch { key }),
            None => Err(DomainError::MissingContextKey { key }),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ContextValue)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Compiler ─────────────────────────────────────────────────────────────────

/// Compile a validated configuration into its decision context.
///
/// Deterministic and total: every key is a pure function of the
/// configuration (plus the provenance stamp), and compilation cannot fail
/// for a [`ValidConfig`] — the input type is the proof.
pub fn compile(config: &ValidConfig, stamp: &GeneratorStamp) -> DecisionContext {
    let mut entries: BTreeMap<&'static str, ContextValue> = BTreeMap::new();
    let mut put = |key: &'static str, value: ContextValue| {
        let previous = entries.insert(key, value);
        debug_assert!(previous.is_none(), "duplicate context key '{key}'");
    };

    // Generator metadata
    put("generator_name", stamp.name.as_str().into());
    put("generator_version", stamp.version.as_str().into());
    put("generated_at", stamp.generated_at.as_str().into());

    // Project identity
    put("project_name", config.project_name.as_str().into());
    put(
        "project_slug",
        config.project_name.slug().replace('-', "_").into(),
    );
    put(
        "project_description",
        config.project_description.as_str().into(),
    );
    put("author_name", config.author_name.as_str().into());
    put("author_email", config.author_email.as_str().into());

    // Database
    let db = config.database;
    put("database", db.as_str().into());
    put("use_postgresql", (db == crate::domain::options::Database::Postgresql).into());
    put("use_mongodb", (db == crate::domain::options::Database::Mongodb).into());
    put("use_sqlite", (db == crate::domain::options::Database::Sqlite).into());
    put("use_database", db.is_some().into());
    put("use_sql", db.is_sql().into());
    put("db_pool_size", config.db_pool_size.to_string().into());
    put("db_max_overflow", config.db_max_overflow.to_string().into());
    put(
        "db_pool_timeout_secs",
        config.db_pool_timeout_secs.to_string().into(),
    );

    // ORM
    put("orm_type", config.orm.as_str().into());
    put(
        "use_sqlalchemy",
        (config.orm == crate::domain::options::Orm::Sqlalchemy).into(),
    );
    put(
        "use_sqlmodel",
        (config.orm == crate::domain::options::Orm::Sqlmodel).into(),
    );

    // Auth
    put("auth", config.auth.as_str().into());
    put("use_jwt", config.auth.issues_jwt().into());
    put("use_api_key", config.auth.issues_api_key().into());
    put("use_auth", config.auth.is_some().into());

    // OAuth
    put("oauth_provider", config.oauth_provider.as_str().into());
    put("enable_oauth", config.oauth_provider.is_some().into());
    put(
        "enable_oauth_google",
        (config.oauth_provider == crate::domain::options::OAuthProvider::Google).into(),
    );

    // Sessions
    put(
        "enable_session_management",
        config.enable_session_management.into(),
    );

    // Telemetry
    put("enable_telemetry", config.enable_telemetry.into());
    put("telemetry_api", config.instrumentation.api.into());
    put("telemetry_database", config.instrumentation.database.into());
    put("telemetry_redis", config.instrumentation.redis.into());
    put(
        "telemetry_task_queue",
        config.instrumentation.task_queue.into(),
    );
    put(
        "telemetry_http_client",
        config.instrumentation.http_client.into(),
    );

    // Background tasks
    let queue = config.task_queue;
    put("task_queue", queue.as_str().into());
    put("use_celery", (queue == crate::domain::options::TaskQueue::Celery).into());
    put("use_taskiq", (queue == crate::domain::options::TaskQueue::Taskiq).into());
    put("use_arq", (queue == crate::domain::options::TaskQueue::Arq).into());
    put("use_task_queue", queue.is_some().into());

    // Integrations
    put("enable_redis", config.enable_redis.into());
    put("enable_caching", config.enable_caching.into());
    put("enable_rate_limiting", config.enable_rate_limiting.into());
    put(
        "rate_limit_requests",
        config.rate_limit_requests.to_string().into(),
    );
    put(
        "rate_limit_period_secs",
        config.rate_limit_period_secs.to_string().into(),
    );
    put("rate_limit_storage", config.rate_limit_storage.as_str().into());
    put(
        "rate_limit_storage_memory",
        (config.rate_limit_storage == crate::domain::options::RateLimitStorage::Memory).into(),
    );
    put(
        "rate_limit_storage_redis",
        (config.rate_limit_storage == crate::domain::options::RateLimitStorage::Redis).into(),
    );
    put("enable_pagination", config.enable_pagination.into());
    put("enable_sentry", config.enable_sentry.into());
    put("enable_prometheus", config.enable_prometheus.into());
    put("enable_file_storage", config.enable_file_storage.into());
    put("enable_websockets", config.enable_websockets.into());
    put("enable_webhooks", config.enable_webhooks.into());
    put("enable_cors", config.enable_cors.into());
    put("enable_orjson", config.enable_orjson.into());

    // Admin panel
    put("enable_admin_panel", config.enable_admin_panel.into());
    put("admin_environments", config.admin_environments.as_str().into());
    {
        use crate::domain::options::AdminEnvironment as Env;
        put("admin_env_all", (config.admin_environments == Env::All).into());
        put(
            "admin_env_dev_only",
            (config.admin_environments == Env::DevOnly).into(),
        );
        put(
            "admin_env_dev_staging",
            (config.admin_environments == Env::DevStaging).into(),
        );
        put(
            "admin_env_disabled",
            (config.admin_environments == Env::Disabled).into(),
        );
    }
    put("admin_require_auth", config.admin_require_auth.into());

    // AI agent
    put("enable_ai_agent", config.enable_ai_agent.into());
    put("ai_framework", config.ai_framework.as_str().into());
    {
        use crate::domain::options::AiFramework as Fw;
        put("use_pydantic_ai", (config.ai_framework == Fw::PydanticAi).into());
        put("use_langchain", (config.ai_framework == Fw::Langchain).into());
        put("use_langgraph", (config.ai_framework == Fw::Langgraph).into());
        put("use_crewai", (config.ai_framework == Fw::Crewai).into());
        put("use_deepagents", (config.ai_framework == Fw::Deepagents).into());
    }
    put("llm_provider", config.llm_provider.as_str().into());
    {
        use crate::domain::options::LlmProvider as Llm;
        put("use_openai", (config.llm_provider == Llm::Openai).into());
        put("use_anthropic", (config.llm_provider == Llm::Anthropic).into());
        put("use_openrouter", (config.llm_provider == Llm::Openrouter).into());
    }
    put(
        "enable_conversation_persistence",
        config.enable_conversation_persistence.into(),
    );
    put("websocket_auth", config.websocket_auth.as_str().into());
    {
        use crate::domain::options::WebSocketAuth as Ws;
        put("websocket_auth_jwt", (config.websocket_auth == Ws::Jwt).into());
        put(
            "websocket_auth_api_key",
            (config.websocket_auth == Ws::ApiKey).into(),
        );
        put("websocket_auth_none", (config.websocket_auth == Ws::None).into());
    }

    // Frontend
    put("frontend", config.frontend.as_str().into());
    put("use_frontend", config.frontend.is_some().into());
    put(
        "use_nextjs",
        (config.frontend == crate::domain::options::Frontend::Nextjs).into(),
    );
    put("enable_i18n", config.enable_i18n.into());
    put("frontend_port", config.frontend_port.to_string().into());

    // Example CRUD
    put("include_example_crud", config.include_example_crud.into());

    // Dev tools
    put("enable_pytest", config.enable_pytest.into());
    put("enable_precommit", config.enable_precommit.into());
    put("enable_makefile", config.enable_makefile.into());
    put("enable_docker", config.enable_docker.into());

    // Reverse proxy
    let proxy = config.reverse_proxy;
    put("reverse_proxy", proxy.as_str().into());
    put(
        "include_traefik_service",
        (proxy == crate::domain::options::ReverseProxy::TraefikIncluded).into(),
    );
    put("include_traefik_labels", proxy.uses_traefik().into());
    put("use_traefik", proxy.uses_traefik().into());
    put(
        "include_nginx_service",
        (proxy == crate::domain::options::ReverseProxy::NginxIncluded).into(),
    );
    put("include_nginx_config", proxy.uses_nginx().into());
    put("use_nginx", proxy.uses_nginx().into());

    // CI / deployment
    put("ci_type", config.ci.as_str().into());
    put(
        "use_github_actions",
        (config.ci == crate::domain::options::CiSystem::Github).into(),
    );
    put(
        "use_gitlab_ci",
        (config.ci == crate::domain::options::CiSystem::Gitlab).into(),
    );
    put("enable_kubernetes", config.enable_kubernetes.into());
    put("generate_env", config.generate_env.into());

    // Runtime
    put("python_version", config.python_version.as_str().into());
    put("backend_port", config.backend_port.to_string().into());

    DecisionContext { entries }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{ProjectConfig, ProjectName};
    use crate::domain::invariants::validate;
    use crate::domain::options::{AuthMode, Database, ReverseProxy, TaskQueue};

    fn stamp() -> GeneratorStamp {
        GeneratorStamp::new("fastgen", "0.1.0", "2026-08-06T00:00:00Z")
    }

    fn compile_default() -> DecisionContext {
        let cfg = ProjectConfig::new(ProjectName::new("demo").unwrap());
        compile(&validate(cfg).unwrap(), &stamp())
    }

    #[test]
    fn identity_keys_echo_the_config() {
        let ctx = compile_default();
        assert_eq!(ctx.text("project_name").unwrap(), "demo");
        assert_eq!(ctx.text("project_slug").unwrap(), "demo");
        assert_eq!(ctx.text("generator_name").unwrap(), "fastgen");
        assert_eq!(ctx.text("python_version").unwrap(), "3.12");
        assert_eq!(ctx.text("backend_port").unwrap(), "8000");
    }

    #[test]
    fn database_flags_are_mutually_consistent() {
        let ctx = compile_default();
        assert!(ctx.flag("use_postgresql").unwrap());
        assert!(ctx.flag("use_database").unwrap());
        assert!(ctx.flag("use_sql").unwrap());
        assert!(!ctx.flag("use_mongodb").unwrap());
        assert!(!ctx.flag("use_sqlite").unwrap());
    }

    #[test]
    fn document_database_is_not_sql() {
        let mut cfg = ProjectConfig::new(ProjectName::new("demo").unwrap());
        cfg.database = Database::Mongodb;
        let ctx = compile(&validate(cfg).unwrap(), &stamp());
        assert!(ctx.flag("use_database").unwrap());
        assert!(!ctx.flag("use_sql").unwrap());
        assert!(ctx.flag("use_mongodb").unwrap());
    }

    #[test]
    fn auth_both_sets_jwt_and_api_key() {
        let mut cfg = ProjectConfig::new(ProjectName::new("demo").unwrap());
        cfg.auth = AuthMode::Both;
        let ctx = compile(&validate(cfg).unwrap(), &stamp());
        assert!(ctx.flag("use_jwt").unwrap());
        assert!(ctx.flag("use_api_key").unwrap());
        assert!(ctx.flag("use_auth").unwrap());
    }

    #[test]
    fn task_queue_convenience_flag_covers_all_kinds() {
        for queue in [TaskQueue::Celery, TaskQueue::Taskiq, TaskQueue::Arq] {
            let mut cfg = ProjectConfig::new(ProjectName::new("demo").unwrap());
            cfg.enable_redis = true;
            cfg.task_queue = queue;
            let ctx = compile(&validate(cfg).unwrap(), &stamp());
            assert!(ctx.flag("use_task_queue").unwrap(), "queue {queue}");
        }
        assert!(!compile_default().flag("use_task_queue").unwrap());
    }

    #[test]
    fn traefik_labels_cover_included_and_external() {
        for proxy in [ReverseProxy::TraefikIncluded, ReverseProxy::TraefikExternal] {
            let mut cfg = ProjectConfig::new(ProjectName::new("demo").unwrap());
            cfg.reverse_proxy = proxy;
            let ctx = compile(&validate(cfg).unwrap(), &stamp());
            assert!(ctx.flag("include_traefik_labels").unwrap());
            assert_eq!(
                ctx.flag("include_traefik_service").unwrap(),
                proxy == ReverseProxy::TraefikIncluded
            );
        }
    }

    #[test]
    fn missing_key_is_reported_as_defect() {
        let ctx = compile_default();
        let err = ctx.flag("no_such_key").unwrap_err();
        assert!(matches!(err, DomainError::MissingContextKey { .. }));
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let ctx = compile_default();
        assert!(matches!(
            ctx.flag("database").unwrap_err(),
            DomainError::ContextKindMismatch { key: "database" }
        ));
        assert!(matches!(
            ctx.text("use_database").unwrap_err(),
            DomainError::ContextKindMismatch { key: "use_database" }
        ));
    }

    #[test]
    fn compilation_is_deterministic() {
        let a = compile_default();
        let b = compile_default();
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_to_flat_json() {
        let ctx = compile_default();
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["use_database"], serde_json::json!(true));
        assert_eq!(json["database"], serde_json::json!("postgresql"));
    }

    #[test]
    fn key_count_is_stable() {
        // Guards against accidentally dropping a key; bump deliberately when
        // the schema grows.
        assert_eq!(compile_default().len(), 102);
    }
}
