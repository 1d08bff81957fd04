//! Feature option value objects: database, auth, task queue, AI stack, etc.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! Each enum carries only its intrinsic properties (is this database SQL?
//! does this auth mode issue JWTs?). All *cross-field* rules live in
//! `invariants.rs`. This file's only job is to define the option types,
//! their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Extend the affected invariant entries in `invariants.rs`
//! 4. Add the derived context keys in `context.rs` if the variant is
//!    template-visible

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

fn unknown(field: &'static str, value: &str) -> DomainError {
    DomainError::InvalidField {
        field,
        value: value.to_string(),
        reason: format!("unknown {field}"),
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

/// A supported database engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Postgresql,
    Mongodb,
    Sqlite,
    None,
}

impl Database {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Mongodb => "mongodb",
            Self::Sqlite => "sqlite",
            Self::None => "none",
        }
    }

    /// Any database at all (persistent storage available).
    pub const fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// SQL engines only — the document store does not count.
    pub const fn is_sql(&self) -> bool {
        matches!(self, Self::Postgresql | Self::Sqlite)
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Self::Postgresql),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "sqlite" => Ok(Self::Sqlite),
            "none" => Ok(Self::None),
            other => Err(unknown("database", other)),
        }
    }
}

// ── Orm ──────────────────────────────────────────────────────────────────────

/// ORM flavour for SQL databases.
///
/// `Sqlalchemy` is the full SQL-document-mapping ORM; `Sqlmodel` is the
/// lightweight model variant. The admin panel only works with the former —
/// see `invariants.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orm {
    Sqlalchemy,
    Sqlmodel,
}

impl Orm {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlalchemy => "sqlalchemy",
            Self::Sqlmodel => "sqlmodel",
        }
    }
}

impl fmt::Display for Orm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlalchemy" => Ok(Self::Sqlalchemy),
            "sqlmodel" => Ok(Self::Sqlmodel),
            other => Err(unknown("orm", other)),
        }
    }
}

// ── AuthMode ─────────────────────────────────────────────────────────────────

/// Primary authentication mode of the generated API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Jwt,
    ApiKey,
    Both,
    None,
}

impl AuthMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jwt => "jwt",
            Self::ApiKey => "api_key",
            Self::Both => "both",
            Self::None => "none",
        }
    }

    /// Whether the mode issues JWT tokens (alone or combined).
    pub const fn issues_jwt(&self) -> bool {
        matches!(self, Self::Jwt | Self::Both)
    }

    /// Whether the mode accepts API keys (alone or combined).
    pub const fn issues_api_key(&self) -> bool {
        matches!(self, Self::ApiKey | Self::Both)
    }

    pub const fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jwt" => Ok(Self::Jwt),
            "api_key" | "api-key" | "apikey" => Ok(Self::ApiKey),
            "both" => Ok(Self::Both),
            "none" => Ok(Self::None),
            other => Err(unknown("auth", other)),
        }
    }
}

// ── OAuthProvider ────────────────────────────────────────────────────────────

/// Social-login provider. OAuth issues sessions through the JWT machinery,
/// so a non-`None` provider requires JWT auth (see `invariants.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    None,
    Google,
}

impl OAuthProvider {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Google => "google",
        }
    }

    pub const fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "google" => Ok(Self::Google),
            other => Err(unknown("oauth_provider", other)),
        }
    }
}

// ── TaskQueue ────────────────────────────────────────────────────────────────

/// Background task queue system. Every non-`None` kind brokers through
/// Redis, which is why all of them require `enable_redis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskQueue {
    None,
    Celery,
    Taskiq,
    Arq,
}

impl TaskQueue {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Celery => "celery",
            Self::Taskiq => "taskiq",
            Self::Arq => "arq",
        }
    }

    pub const fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskQueue {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "celery" => Ok(Self::Celery),
            "taskiq" => Ok(Self::Taskiq),
            "arq" => Ok(Self::Arq),
            other => Err(unknown("task_queue", other)),
        }
    }
}

// ── CiSystem ─────────────────────────────────────────────────────────────────

/// CI/CD pipeline to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiSystem {
    Github,
    Gitlab,
    None,
}

impl CiSystem {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::None => "none",
        }
    }
}

impl fmt::Display for CiSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CiSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(Self::Github),
            "gitlab" => Ok(Self::Gitlab),
            "none" => Ok(Self::None),
            other => Err(unknown("ci", other)),
        }
    }
}

// ── Frontend ─────────────────────────────────────────────────────────────────

/// Frontend framework bundled with the generated backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frontend {
    None,
    Nextjs,
}

impl Frontend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Nextjs => "nextjs",
        }
    }

    pub const fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for Frontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frontend {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "nextjs" | "next" => Ok(Self::Nextjs),
            other => Err(unknown("frontend", other)),
        }
    }
}

// ── WebSocketAuth ────────────────────────────────────────────────────────────

/// How the AI-agent WebSocket endpoint authenticates clients.
///
/// Must agree with the primary [`AuthMode`]: a JWT-guarded socket is only
/// meaningful when the API itself issues JWTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebSocketAuth {
    None,
    Jwt,
    ApiKey,
}

impl WebSocketAuth {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Jwt => "jwt",
            Self::ApiKey => "api_key",
        }
    }
}

impl fmt::Display for WebSocketAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebSocketAuth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "jwt" => Ok(Self::Jwt),
            "api_key" | "api-key" | "apikey" => Ok(Self::ApiKey),
            other => Err(unknown("websocket_auth", other)),
        }
    }
}

// ── AdminEnvironment ─────────────────────────────────────────────────────────

/// Which deployment environments expose the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminEnvironment {
    /// Available everywhere.
    All,
    /// Development only.
    DevOnly,
    /// Development + staging (recommended).
    DevStaging,
    /// Disabled everywhere.
    Disabled,
}

impl AdminEnvironment {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::DevOnly => "dev_only",
            Self::DevStaging => "dev_staging",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for AdminEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminEnvironment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "dev_only" | "dev-only" => Ok(Self::DevOnly),
            "dev_staging" | "dev-staging" => Ok(Self::DevStaging),
            "disabled" => Ok(Self::Disabled),
            other => Err(unknown("admin_environments", other)),
        }
    }
}

// ── AiFramework ──────────────────────────────────────────────────────────────

/// Agent framework wired into the generated AI endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiFramework {
    PydanticAi,
    Langchain,
    Langgraph,
    Crewai,
    Deepagents,
}

impl AiFramework {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PydanticAi => "pydantic_ai",
            Self::Langchain => "langchain",
            Self::Langgraph => "langgraph",
            Self::Crewai => "crewai",
            Self::Deepagents => "deepagents",
        }
    }
}

impl fmt::Display for AiFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pydantic_ai" | "pydantic-ai" | "pydanticai" => Ok(Self::PydanticAi),
            "langchain" => Ok(Self::Langchain),
            "langgraph" => Ok(Self::Langgraph),
            "crewai" => Ok(Self::Crewai),
            "deepagents" => Ok(Self::Deepagents),
            other => Err(unknown("ai_framework", other)),
        }
    }
}

// ── LlmProvider ──────────────────────────────────────────────────────────────

/// LLM provider the agent talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Openai,
    Anthropic,
    Openrouter,
}

impl LlmProvider {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Openai => "openai",
            Self::Anthropic => "anthropic",
            Self::Openrouter => "openrouter",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::Openai),
            "anthropic" => Ok(Self::Anthropic),
            "openrouter" => Ok(Self::Openrouter),
            other => Err(unknown("llm_provider", other)),
        }
    }
}

// ── RateLimitStorage ─────────────────────────────────────────────────────────

/// Counter storage backend for rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateLimitStorage {
    Memory,
    Redis,
}

impl RateLimitStorage {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Redis => "redis",
        }
    }
}

impl fmt::Display for RateLimitStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RateLimitStorage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => Err(unknown("rate_limit_storage", other)),
        }
    }
}

// ── ReverseProxy ─────────────────────────────────────────────────────────────

/// Reverse proxy wiring for the generated docker-compose stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReverseProxy {
    /// Traefik service + routing labels included.
    TraefikIncluded,
    /// External Traefik; labels only.
    TraefikExternal,
    /// Nginx service included in docker-compose.
    NginxIncluded,
    /// External Nginx; config template only.
    NginxExternal,
    /// Expose ports directly.
    None,
}

impl ReverseProxy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TraefikIncluded => "traefik_included",
            Self::TraefikExternal => "traefik_external",
            Self::NginxIncluded => "nginx_included",
            Self::NginxExternal => "nginx_external",
            Self::None => "none",
        }
    }

    pub const fn uses_traefik(&self) -> bool {
        matches!(self, Self::TraefikIncluded | Self::TraefikExternal)
    }

    pub const fn uses_nginx(&self) -> bool {
        matches!(self, Self::NginxIncluded | Self::NginxExternal)
    }
}

impl fmt::Display for ReverseProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReverseProxy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "traefik_included" | "traefik-included" | "traefik" => Ok(Self::TraefikIncluded),
            "traefik_external" | "traefik-external" => Ok(Self::TraefikExternal),
            "nginx_included" | "nginx-included" | "nginx" => Ok(Self::NginxIncluded),
            "nginx_external" | "nginx-external" => Ok(Self::NginxExternal),
            "none" => Ok(Self::None),
            other => Err(unknown("reverse_proxy", other)),
        }
    }
}

// ── PythonVersion ────────────────────────────────────────────────────────────

/// Python version pinned into the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PythonVersion {
    #[serde(rename = "3.11")]
    V3_11,
    #[serde(rename = "3.12")]
    V3_12,
    #[serde(rename = "3.13")]
    V3_13,
}

impl PythonVersion {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V3_11 => "3.11",
            Self::V3_12 => "3.12",
            Self::V3_13 => "3.13",
        }
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PythonVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3.11" => Ok(Self::V3_11),
            "3.12" => Ok(Self::V3_12),
            "3.13" => Ok(Self::V3_13),
            other => Err(unknown("python_version", other)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
