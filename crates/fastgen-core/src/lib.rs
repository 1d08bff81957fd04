//! fastgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the fastgen
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          fastgen-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (GenerateService, ArtifactPruner)    │
//! │        Orchestrates the Pipeline        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Driven: Filesystem, Renderer, Tooling) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     fastgen-adapters (Infrastructure)   │
//! │ (LocalFilesystem, SkeletonRenderer, ..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (ProjectConfig, Invariants, Context,   │
//! │   Presets, Pruning Manifest)            │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Pipeline
//!
//! ```rust,ignore
//! use fastgen_core::domain::{GeneratorStamp, Preset, ProjectName};
//! use fastgen_core::application::GenerateService;
//!
//! let name = ProjectName::new("my_api").unwrap();
//! let config = Preset::Production.resolve(name);
//! let stamp = GeneratorStamp::new("fastgen", "0.1.0", "2026-08-06T00:00:00Z");
//!
//! // Adapters injected from fastgen-adapters:
//! let service = GenerateService::new(renderer, filesystem, tooling);
//! let outcome = service.generate(config, &stamp, "./out".as_ref()).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArtifactPruner, GenerateService, GenerationOutcome, PruneReport,
        ports::{Filesystem, TemplateRenderer, ToolRunner},
    };
    pub use crate::domain::{
        DecisionContext, GeneratorStamp, Preset, ProjectConfig, ProjectName, ValidConfig, compile,
        validate,
    };
    pub use crate::error::{FastgenError, FastgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
