//! Application layer: orchestration over the domain, behind driven ports.

pub mod error;
pub mod generate;
pub mod ports;
pub mod pruner;

pub use error::ApplicationError;
pub use generate::{GenerateService, GenerationOutcome};
pub use pruner::{ArtifactPruner, PruneReport};
