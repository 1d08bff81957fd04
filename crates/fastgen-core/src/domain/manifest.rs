//! Conditional-path manifest: which generated paths survive which contexts.
//!
//! # Design Rationale
//!
//! The template layer and the pruner are two independent decision procedures
//! over the same feature set. Keeping them in agreement by hand is the bug
//! farm this module exists to drain: predicates here are *data* (a small
//! expression enum over decision-context keys), never closures over raw
//! configuration fields. Because they are data, [`referenced_keys`] can
//! enumerate every key the manifest depends on, and the totality test can
//! prove the compiler emits all of them — the "generate both procedures from
//! one schema" discipline, enforced at test time.
//!
//! # Adding a Conditional Path
//!
//! 1. Add one [`PathRule`] entry to [`PRUNE_MANIFEST`] (or an [`AreaRule`]
//!    to [`AREA_MANIFEST`] for a whole feature directory)
//! 2. That's it — the totality test fails if the key doesn't exist

use std::collections::BTreeSet;

use crate::domain::context::DecisionContext;
use crate::domain::error::DomainError;

// ── Predicates ───────────────────────────────────────────────────────────────

/// Boolean expression over decision-context flags.
///
/// Deliberately minimal: conjunction, disjunction, negation, flag lookup.
/// Expressions never see raw configuration fields — only compiled keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The named context flag.
    Flag(&'static str),
    /// Negation.
    Not(&'static Predicate),
    /// Every sub-expression holds.
    All(&'static [Predicate]),
    /// At least one sub-expression holds.
    Any(&'static [Predicate]),
}

impl Predicate {
    /// Evaluate against a compiled context.
    ///
    /// A missing or non-boolean key surfaces as a [`DomainError`] — that is
    /// a manifest/compiler contract defect, and the totality test exists so
    /// it can never be hit from a shipped manifest.
    pub fn eval(&self, ctx: &DecisionContext) -> Result<bool, DomainError> {
        match *self {
            Self::Flag(key) => ctx.flag(key),
            Self::Not(inner) => Ok(!inner.eval(ctx)?),
            Self::All(parts) => {
                for part in parts {
                    if !part.eval(ctx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Any(parts) => {
                for part in parts {
                    if part.eval(ctx)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    fn collect_keys(&self, out: &mut BTreeSet<&'static str>) {
        match *self {
            Self::Flag(key) => {
                out.insert(key);
            }
            Self::Not(inner) => inner.collect_keys(out),
            Self::All(parts) | Self::Any(parts) => {
                for part in parts {
                    part.collect_keys(out);
                }
            }
        }
    }
}

// ── Rules ────────────────────────────────────────────────────────────────────

/// One conditional path: keep the path when `keep` evaluates true, delete it
/// otherwise. `path` is relative to the generated project root and may name
/// a file or a directory.
#[derive(Debug, Clone, Copy)]
pub struct PathRule {
    pub path: &'static str,
    pub keep: Predicate,
}

/// One feature area: a directory owned wholesale by a single top-level flag,
/// deleted before any per-file logic would matter.
#[derive(Debug, Clone, Copy)]
pub struct AreaRule {
    pub path: &'static str,
    pub flag: &'static str,
}

/// Package marker file; a directory whose only surviving entry is this file
/// is considered empty and collapsed.
pub const MARKER_FILE: &str = "__init__.py";

use Predicate::{All, Any, Flag, Not};

const KEEP_CRUD: Predicate = All(&[Flag("include_example_crud"), Flag("use_database")]);
const KEEP_WEBHOOKS: Predicate = All(&[Flag("enable_webhooks"), Flag("use_database")]);
const KEEP_SESSIONS: Predicate = All(&[Flag("enable_session_management"), Flag("use_jwt")]);
const KEEP_ADMIN: Predicate = All(&[
    Flag("enable_admin_panel"),
    Flag("use_sql"),
    Flag("use_sqlalchemy"),
]);
const KEEP_SECURITY: Predicate = Any(&[Flag("use_jwt"), Flag("use_api_key")]);
const KEEP_I18N: Predicate = All(&[Flag("use_frontend"), Flag("enable_i18n")]);

/// File-level rules. Phase 1 of the pruner runs these to completion before
/// any directory-emptiness is evaluated.
pub static PRUNE_MANIFEST: &[PathRule] = &[
    // ── AI agent ─────────────────────────────────────────────────────────────
    PathRule {
        path: "backend/app/api/routes/v1/agent.py",
        keep: Flag("enable_ai_agent"),
    },
    PathRule {
        path: "backend/app/agents/assistant.py",
        keep: All(&[Flag("enable_ai_agent"), Flag("use_pydantic_ai")]),
    },
    PathRule {
        path: "backend/app/agents/langchain_assistant.py",
        keep: All(&[Flag("enable_ai_agent"), Flag("use_langchain")]),
    },
    PathRule {
        path: "backend/app/agents/langgraph_assistant.py",
        keep: All(&[Flag("enable_ai_agent"), Flag("use_langgraph")]),
    },
    PathRule {
        path: "backend/app/agents/crewai_assistant.py",
        keep: All(&[Flag("enable_ai_agent"), Flag("use_crewai")]),
    },
    PathRule {
        path: "backend/app/agents/deepagents_assistant.py",
        keep: All(&[Flag("enable_ai_agent"), Flag("use_deepagents")]),
    },
    // ── Example CRUD slice ───────────────────────────────────────────────────
    PathRule {
        path: "backend/app/api/routes/v1/items.py",
        keep: KEEP_CRUD,
    },
    PathRule {
        path: "backend/app/db/models/item.py",
        keep: KEEP_CRUD,
    },
    PathRule {
        path: "backend/app/repositories/item.py",
        keep: KEEP_CRUD,
    },
    PathRule {
        path: "backend/app/services/item.py",
        keep: KEEP_CRUD,
    },
    PathRule {
        path: "backend/app/schemas/item.py",
        keep: KEEP_CRUD,
    },
    // ── Conversation persistence slice ───────────────────────────────────────
    PathRule {
        path: "backend/app/api/routes/v1/conversations.py",
        keep: Flag("enable_conversation_persistence"),
    },
    PathRule {
        path: "backend/app/db/models/conversation.py",
        keep: Flag("enable_conversation_persistence"),
    },
    PathRule {
        path: "backend/app/repositories/conversation.py",
        keep: Flag("enable_conversation_persistence"),
    },
    PathRule {
        path: "backend/app/services/conversation.py",
        keep: Flag("enable_conversation_persistence"),
    },
    PathRule {
        path: "backend/app/schemas/conversation.py",
        keep: Flag("enable_conversation_persistence"),
    },
    // ── Webhooks slice ───────────────────────────────────────────────────────
    PathRule {
        path: "backend/app/api/routes/v1/webhooks.py",
        keep: KEEP_WEBHOOKS,
    },
    PathRule {
        path: "backend/app/db/models/webhook.py",
        keep: KEEP_WEBHOOKS,
    },
    PathRule {
        path: "backend/app/repositories/webhook.py",
        keep: KEEP_WEBHOOKS,
    },
    PathRule {
        path: "backend/app/services/webhook.py",
        keep: KEEP_WEBHOOKS,
    },
    PathRule {
        path: "backend/app/schemas/webhook.py",
        keep: KEEP_WEBHOOKS,
    },
    // ── Session management slice ─────────────────────────────────────────────
    PathRule {
        path: "backend/app/api/routes/v1/sessions.py",
        keep: KEEP_SESSIONS,
    },
    PathRule {
        path: "backend/app/db/models/session.py",
        keep: KEEP_SESSIONS,
    },
    PathRule {
        path: "backend/app/repositories/session.py",
        keep: KEEP_SESSIONS,
    },
    PathRule {
        path: "backend/app/services/session.py",
        keep: KEEP_SESSIONS,
    },
    PathRule {
        path: "backend/app/schemas/session.py",
        keep: KEEP_SESSIONS,
    },
    // ── WebSockets ───────────────────────────────────────────────────────────
    PathRule {
        path: "backend/app/api/routes/v1/ws.py",
        keep: Flag("enable_websockets"),
    },
    // ── Admin panel ──────────────────────────────────────────────────────────
    PathRule {
        path: "backend/app/admin.py",
        keep: KEEP_ADMIN,
    },
    // ── Redis / caching / rate limiting ──────────────────────────────────────
    PathRule {
        path: "backend/app/clients/redis.py",
        keep: Flag("enable_redis"),
    },
    PathRule {
        path: "backend/app/core/cache.py",
        keep: Flag("enable_caching"),
    },
    PathRule {
        path: "backend/app/core/rate_limit.py",
        keep: Flag("enable_rate_limiting"),
    },
    PathRule {
        path: "backend/app/core/pagination.py",
        keep: Flag("enable_pagination"),
    },
    // ── OAuth ────────────────────────────────────────────────────────────────
    PathRule {
        path: "backend/app/api/routes/v1/oauth.py",
        keep: Flag("enable_oauth"),
    },
    PathRule {
        path: "backend/app/core/oauth.py",
        keep: Flag("enable_oauth"),
    },
    // ── Auth / user slice ────────────────────────────────────────────────────
    PathRule {
        path: "backend/app/core/security.py",
        keep: KEEP_SECURITY,
    },
    PathRule {
        path: "backend/app/api/routes/v1/auth.py",
        keep: Flag("use_jwt"),
    },
    PathRule {
        path: "backend/app/api/routes/v1/users.py",
        keep: Flag("use_jwt"),
    },
    PathRule {
        path: "backend/app/db/models/user.py",
        keep: Flag("use_jwt"),
    },
    PathRule {
        path: "backend/app/repositories/user.py",
        keep: Flag("use_jwt"),
    },
    PathRule {
        path: "backend/app/services/user.py",
        keep: Flag("use_jwt"),
    },
    PathRule {
        path: "backend/app/schemas/user.py",
        keep: Flag("use_jwt"),
    },
    PathRule {
        path: "backend/app/schemas/token.py",
        keep: Flag("use_jwt"),
    },
    // ── File storage ─────────────────────────────────────────────────────────
    PathRule {
        path: "backend/app/api/routes/v1/files.py",
        keep: Flag("enable_file_storage"),
    },
    PathRule {
        path: "backend/app/core/storage.py",
        keep: Flag("enable_file_storage"),
    },
    // ── Telemetry ────────────────────────────────────────────────────────────
    PathRule {
        path: "backend/app/core/telemetry.py",
        keep: Flag("enable_telemetry"),
    },
    // ── Database plumbing ────────────────────────────────────────────────────
    PathRule {
        path: "backend/app/db/session.py",
        keep: Flag("use_database"),
    },
    PathRule {
        path: "backend/app/db/base.py",
        keep: Flag("use_sql"),
    },
    PathRule {
        path: "backend/app/clients/mongo.py",
        keep: Flag("use_mongodb"),
    },
    PathRule {
        path: "backend/alembic.ini",
        keep: Flag("use_sql"),
    },
    PathRule {
        path: "backend/alembic",
        keep: Flag("use_sql"),
    },
    // ── Worker / task queues ─────────────────────────────────────────────────
    PathRule {
        path: "backend/app/worker/celery_app.py",
        keep: Flag("use_celery"),
    },
    PathRule {
        path: "backend/app/worker/tasks/examples.py",
        keep: Flag("use_celery"),
    },
    PathRule {
        path: "backend/app/worker/tasks/schedules.py",
        keep: Flag("use_celery"),
    },
    PathRule {
        path: "backend/app/worker/taskiq_app.py",
        keep: Flag("use_taskiq"),
    },
    PathRule {
        path: "backend/app/worker/tasks/taskiq_examples.py",
        keep: Flag("use_taskiq"),
    },
    PathRule {
        path: "backend/app/worker/arq_app.py",
        keep: Flag("use_arq"),
    },
    // ── Docker ───────────────────────────────────────────────────────────────
    PathRule {
        path: "docker-compose.yml",
        keep: Flag("enable_docker"),
    },
    PathRule {
        path: ".dockerignore",
        keep: Flag("enable_docker"),
    },
    PathRule {
        path: "backend/Dockerfile",
        keep: Flag("enable_docker"),
    },
    PathRule {
        path: "frontend/Dockerfile",
        keep: All(&[Flag("use_frontend"), Flag("enable_docker")]),
    },
    // ── Dev tooling ──────────────────────────────────────────────────────────
    PathRule {
        path: "Makefile",
        keep: Flag("enable_makefile"),
    },
    PathRule {
        path: ".pre-commit-config.yaml",
        keep: Flag("enable_precommit"),
    },
    PathRule {
        path: ".gitlab-ci.yml",
        keep: Flag("use_gitlab_ci"),
    },
    // ── Env files ────────────────────────────────────────────────────────────
    PathRule {
        path: "backend/.env",
        keep: Flag("generate_env"),
    },
    PathRule {
        path: "frontend/.env.local",
        keep: All(&[Flag("use_frontend"), Flag("generate_env")]),
    },
    // ── Frontend i18n ────────────────────────────────────────────────────────
    PathRule {
        path: "frontend/src/middleware.ts",
        keep: KEEP_I18N,
    },
    PathRule {
        path: "frontend/src/i18n.ts",
        keep: KEEP_I18N,
    },
    PathRule {
        path: "frontend/src/components/language-switcher.tsx",
        keep: KEEP_I18N,
    },
    PathRule {
        path: "frontend/messages",
        keep: KEEP_I18N,
    },
];

/// Area rules: feature directories owned by one top-level flag, deleted
/// wholesale in phase 3, independent of per-file rules.
pub static AREA_MANIFEST: &[AreaRule] = &[
    AreaRule {
        path: ".github",
        flag: "use_github_actions",
    },
    AreaRule {
        path: "kubernetes",
        flag: "enable_kubernetes",
    },
    AreaRule {
        path: "nginx",
        flag: "use_nginx",
    },
    AreaRule {
        path: "frontend",
        flag: "use_frontend",
    },
    AreaRule {
        path: "backend/tests",
        flag: "enable_pytest",
    },
];

/// Every context key any rule references. The totality test checks this set
/// against the compiler's output; an unmapped key is a build-time defect.
pub fn referenced_keys() -> BTreeSet<&'static str> {
    let mut keys = BTreeSet::new();
    for rule in PRUNE_MANIFEST {
        rule.keep.collect_keys(&mut keys);
    }
    for area in AREA_MANIFEST {
        keys.insert(area.flag);
    }
    keys
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{ProjectConfig, ProjectName};
    use crate::domain::context::{GeneratorStamp, compile};
    use crate::domain::invariants::validate;

    fn ctx_for(mutate: impl FnOnce(&mut ProjectConfig)) -> DecisionContext {
        let mut cfg = ProjectConfig::new(ProjectName::new("demo").unwrap());
        mutate(&mut cfg);
        compile(
            &validate(cfg).unwrap(),
            &GeneratorStamp::new("fastgen", "0.1.0", "2026-08-06T00:00:00Z"),
        )
    }

    #[test]
    fn flag_predicate_reads_the_context() {
        let ctx = ctx_for(|_| {});
        assert!(Flag("use_database").eval(&ctx).unwrap());
        assert!(!Flag("enable_redis").eval(&ctx).unwrap());
    }

    #[test]
    fn not_all_any_combine() {
        let ctx = ctx_for(|c| c.enable_redis = true);
        assert!(!Not(&Flag("enable_redis")).eval(&ctx).unwrap());
        assert!(
            All(&[Flag("enable_redis"), Flag("use_database")])
                .eval(&ctx)
                .unwrap()
        );
        assert!(
            !All(&[Flag("enable_redis"), Flag("enable_caching")])
                .eval(&ctx)
                .unwrap()
        );
        assert!(
            Any(&[Flag("enable_caching"), Flag("enable_redis")])
                .eval(&ctx)
                .unwrap()
        );
        assert!(!Any(&[]).eval(&ctx).unwrap());
        assert!(All(&[]).eval(&ctx).unwrap());
    }

    #[test]
    fn unknown_flag_is_a_contract_error() {
        let ctx = ctx_for(|_| {});
        assert!(Flag("no_such_flag").eval(&ctx).is_err());
    }

    #[test]
    fn manifest_paths_are_unique_and_relative() {
        let mut paths: Vec<_> = PRUNE_MANIFEST.iter().map(|r| r.path).collect();
        paths.extend(AREA_MANIFEST.iter().map(|a| a.path));
        for path in &paths {
            assert!(!path.starts_with('/'), "absolute path in manifest: {path}");
        }
        let before = paths.len();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(before, paths.len(), "duplicate path in manifest");
    }

    #[test]
    fn every_referenced_key_compiles() {
        // The totality property: no rule may mention a key the compiler
        // does not emit for a valid configuration.
        let ctx = ctx_for(|_| {});
        for key in referenced_keys() {
            assert!(ctx.contains(key), "manifest references unmapped key {key}");
        }
    }

    #[test]
    fn every_rule_evaluates_without_error() {
        let ctx = ctx_for(|_| {});
        for rule in PRUNE_MANIFEST {
            assert!(rule.keep.eval(&ctx).is_ok(), "rule for {}", rule.path);
        }
    }

    #[test]
    fn admin_rule_requires_sql_and_sqlalchemy() {
        let on = ctx_for(|c| c.enable_admin_panel = true);
        assert!(KEEP_ADMIN.eval(&on).unwrap());

        let off = ctx_for(|c| {
            c.enable_admin_panel = false;
        });
        assert!(!KEEP_ADMIN.eval(&off).unwrap());
    }

    #[test]
    fn security_survives_api_key_only_auth() {
        let ctx = ctx_for(|c| c.auth = crate::domain::options::AuthMode::ApiKey);
        assert!(KEEP_SECURITY.eval(&ctx).unwrap());

        let none = ctx_for(|c| {
            c.auth = crate::domain::options::AuthMode::None;
        });
        assert!(!KEEP_SECURITY.eval(&none).unwrap());
    }
}
