//! Template-engine adapters.

mod skeleton;

pub use skeleton::SkeletonRenderer;
