//! Named configuration presets.
//!
//! A preset is a fixed override-set applied on top of schema defaults:
//! every field the preset mentions is set explicitly, everything else keeps
//! its default. Presets are static literals, so application is atomic —
//! there is no partially-applied state to roll back.
//!
//! Presets are invariant-safe by construction; `preset_resolves_valid` in
//! the integration tests keeps that honest.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::config::{ProjectConfig, ProjectName};
use crate::domain::error::DomainError;
use crate::domain::options::{
    AuthMode, CiSystem, Database, Frontend, OAuthProvider, RateLimitStorage, WebSocketAuth,
};

/// Known preset identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Full production bundle: SQL database, JWT, Redis, caching, rate
    /// limiting, Sentry, Prometheus, Docker, Kubernetes, GitHub CI.
    Production,
    /// AI agent bundle: SQL database, JWT, Redis, agent with WebSocket
    /// streaming and conversation persistence.
    AiAgent,
    /// Nearly everything off: no database, no auth, no Docker, no CI.
    Minimal,
}

pub const ALL_PRESETS: &[Preset] = &[Preset::Production, Preset::AiAgent, Preset::Minimal];

impl Preset {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::AiAgent => "ai-agent",
            Self::Minimal => "minimal",
        }
    }

    /// Expand this preset into a full configuration for `name`.
    ///
    /// Fields the preset does not mention keep the schema defaults from
    /// [`ProjectConfig::new`] — deliberately not whatever the caller may
    /// have supplied elsewhere; presets and per-flag overrides are mutually
    /// exclusive entry modes.
    pub fn resolve(&self, name: ProjectName) -> ProjectConfig {
        let defaults = ProjectConfig::new(name);

        match self {
            Self::Production => ProjectConfig {
                database: Database::Postgresql,
                auth: AuthMode::Jwt,
                enable_telemetry: true,
                enable_redis: true,
                enable_caching: true,
                enable_rate_limiting: true,
                rate_limit_storage: RateLimitStorage::Redis,
                enable_sentry: true,
                enable_prometheus: true,
                enable_docker: true,
                enable_kubernetes: true,
                ci: CiSystem::Github,
                include_example_crud: true,
                ..defaults
            },
            Self::AiAgent => ProjectConfig {
                database: Database::Postgresql,
                auth: AuthMode::Jwt,
                enable_telemetry: true,
                enable_redis: true,
                enable_ai_agent: true,
                enable_websockets: true,
                websocket_auth: WebSocketAuth::Jwt,
                enable_conversation_persistence: true,
                enable_docker: true,
                ci: CiSystem::Github,
                ..defaults
            },
            Self::Minimal => ProjectConfig {
                database: Database::None,
                auth: AuthMode::None,
                oauth_provider: OAuthProvider::None,
                enable_telemetry: false,
                enable_redis: false,
                enable_caching: false,
                enable_rate_limiting: false,
                enable_pagination: false,
                enable_admin_panel: false,
                enable_websockets: false,
                enable_ai_agent: false,
                enable_docker: false,
                enable_kubernetes: false,
                ci: CiSystem::None,
                include_example_crud: false,
                frontend: Frontend::None,
                ..defaults
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "ai-agent" | "ai_agent" | "agent" => Ok(Self::AiAgent),
            "minimal" | "min" => Ok(Self::Minimal),
            other => Err(DomainError::UnknownPreset { name: other.into() }),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::invariants::validate;
    use crate::domain::options::TaskQueue;

    fn name() -> ProjectName {
        ProjectName::new("demo").unwrap()
    }

    #[test]
    fn every_preset_parses_back_from_its_display() {
        for preset in ALL_PRESETS {
            assert_eq!(preset.as_str().parse::<Preset>().unwrap(), *preset);
        }
    }

    #[test]
    fn unknown_preset_is_a_not_found_error() {
        let err = "staging".parse::<Preset>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownPreset { .. }));
    }

    #[test]
    fn every_preset_resolves_to_a_valid_config() {
        for preset in ALL_PRESETS {
            let config = preset.resolve(name());
            assert!(
                validate(config).is_ok(),
                "preset {preset} violates an invariant"
            );
        }
    }

    #[test]
    fn production_enables_the_ops_stack() {
        let cfg = Preset::Production.resolve(name());
        assert!(cfg.enable_redis);
        assert!(cfg.enable_caching);
        assert!(cfg.enable_kubernetes);
        assert!(cfg.enable_sentry);
        assert_eq!(cfg.rate_limit_storage, RateLimitStorage::Redis);
        // Unmentioned fields keep defaults.
        assert_eq!(cfg.task_queue, TaskQueue::None);
        assert_eq!(cfg.backend_port, 8000);
    }

    #[test]
    fn ai_agent_enables_streaming_and_persistence() {
        let cfg = Preset::AiAgent.resolve(name());
        assert!(cfg.enable_ai_agent);
        assert!(cfg.enable_websockets);
        assert!(cfg.enable_conversation_persistence);
        assert_eq!(cfg.websocket_auth, WebSocketAuth::Jwt);
        assert!(!cfg.enable_kubernetes);
    }

    #[test]
    fn minimal_disables_nearly_everything() {
        let cfg = Preset::Minimal.resolve(name());
        assert_eq!(cfg.database, Database::None);
        assert_eq!(cfg.auth, AuthMode::None);
        assert!(!cfg.enable_docker);
        assert!(!cfg.enable_telemetry);
        assert!(!cfg.include_example_crud);
        assert_eq!(cfg.ci, CiSystem::None);
        // Dev-tool defaults survive: a minimal project still gets tests.
        assert!(cfg.enable_pytest);
    }

    #[test]
    fn preset_keeps_the_given_name() {
        let cfg = Preset::Minimal.resolve(ProjectName::new("tiny_api").unwrap());
        assert_eq!(cfg.project_name.as_str(), "tiny_api");
    }
}
