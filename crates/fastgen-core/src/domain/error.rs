// ============================================================================
// domain/error.rs - COMPREHENSIVE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Schema Errors (400-level equivalent)
    // ========================================================================
    /// A single field value fails its type/enum/pattern/range check.
    /// Raised at configuration construction, before any cross-field rule runs.
    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    // ========================================================================
    // Invariant Errors (409-level equivalent)
    // ========================================================================
    /// A cross-field invariant was violated. `rule` identifies the entry in
    /// the invariant registry; `message` is the user-facing explanation.
    #[error("{message}")]
    InvariantViolation {
        rule: &'static str,
        message: &'static str,
    },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("unknown preset: {name}")]
    UnknownPreset { name: String },

    // ========================================================================
    // Contract Violations (bugs, not user errors)
    // ========================================================================
    /// A pruning predicate or template referenced a key the compiler never
    /// produced. This is a defect in the manifest/compiler pair, not a
    /// user-facing configuration problem.
    #[error("decision context has no key '{key}'")]
    MissingContextKey { key: &'static str },

    /// A context key held a boolean where text was expected, or vice versa.
    #[error("decision context key '{key}' has the wrong kind")]
    ContextKindMismatch { key: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidField { field, reason, .. } => vec![
                format!("Check the value passed for '{field}'"),
                format!("Details: {reason}"),
                "Run 'fastgen options' to see every accepted value".into(),
            ],
            Self::InvariantViolation { message, .. } => vec![
                (*message).to_string(),
                "Adjust the conflicting flags and retry".into(),
                "Run 'fastgen options' to review feature dependencies".into(),
            ],
            Self::UnknownPreset { name } => vec![
                format!("'{name}' is not a known preset"),
                "Available presets: production, ai-agent, minimal".into(),
            ],
            Self::MissingContextKey { key } => vec![
                format!("The pruning manifest references '{key}' but the compiler never emits it"),
                "This is a bug in fastgen, please report it".into(),
            ],
            Self::ContextKindMismatch { key } => vec![
                format!("Key '{key}' was read with the wrong kind"),
                "This is a bug in fastgen, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidField { .. } => ErrorCategory::Schema,
            Self::InvariantViolation { .. } => ErrorCategory::Invariant,
            Self::UnknownPreset { .. } => ErrorCategory::NotFound,
            Self::MissingContextKey { .. } | Self::ContextKindMismatch { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Schema,
    Invariant,
    NotFound,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_is_schema_category() {
        let err = DomainError::InvalidField {
            field: "backend_port",
            value: "0".into(),
            reason: "must be 1-65535".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Schema);
        assert!(err.to_string().contains("backend_port"));
    }

    #[test]
    fn invariant_message_is_the_display() {
        let err = DomainError::InvariantViolation {
            rule: "caching_requires_redis",
            message: "Caching requires Redis to be enabled",
        };
        assert_eq!(err.to_string(), "Caching requires Redis to be enabled");
        assert_eq!(err.category(), ErrorCategory::Invariant);
    }

    #[test]
    fn missing_key_is_internal() {
        let err = DomainError::MissingContextKey { key: "use_jwt" };
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("bug in fastgen"))
        );
    }

    #[test]
    fn unknown_preset_suggests_the_known_ones() {
        let err = DomainError::UnknownPreset {
            name: "staging".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("production")));
    }
}
