// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for fastgen.
//!
//! This module contains pure decision logic with ZERO I/O.
//! Everything that touches a filesystem or a process goes through ports
//! (traits) defined in the application layer.
//!
//! ## Pipeline position
//!
//! - `options` / `config` — the feature schema: every field, its type, its
//!   default (schema errors at construction)
//! - `presets` — named override bundles expanded before validation
//! - `invariants` — cross-field rules; produces the `ValidConfig` witness
//! - `context` — compiles a `ValidConfig` into the flat `DecisionContext`
//! - `manifest` — conditional-path rules the pruner replays against that
//!   context
//!
//! The domain is synchronous, side-effect-free, and immutable: a validated
//! configuration and a compiled context are never modified downstream.

pub mod config;
pub mod context;
pub mod error;
pub mod invariants;
pub mod manifest;
pub mod options;
pub mod presets;

// Re-exports for convenience
pub use config::{Instrumentation, ProjectConfig, ProjectName};
pub use context::{ContextValue, DecisionContext, GeneratorStamp, compile};
pub use error::{DomainError, ErrorCategory};
pub use invariants::{INVARIANT_REGISTRY, InvariantRule, ValidConfig, validate};
pub use manifest::{
    AREA_MANIFEST, AreaRule, MARKER_FILE, PRUNE_MANIFEST, PathRule, Predicate, referenced_keys,
};
pub use options::{
    AdminEnvironment, AiFramework, AuthMode, CiSystem, Database, Frontend, LlmProvider,
    OAuthProvider, Orm, PythonVersion, RateLimitStorage, ReverseProxy, TaskQueue, WebSocketAuth,
};
pub use presets::{ALL_PRESETS, Preset};
