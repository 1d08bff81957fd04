//! Cross-module properties for fastgen-core: compiler totality, preset
//! validity, and the invariant registry's behavior end to end.

use fastgen_core::domain::{
    ALL_PRESETS, Database, GeneratorStamp, INVARIANT_REGISTRY, Preset, ProjectConfig, ProjectName,
    compile, referenced_keys, validate,
};

fn name() -> ProjectName {
    ProjectName::new("demo").unwrap()
}

fn stamp() -> GeneratorStamp {
    GeneratorStamp::new("fastgen", "0.1.0", chrono::Utc::now().to_rfc3339())
}

// ── Totality ─────────────────────────────────────────────────────────────────

#[test]
fn compile_is_total_over_every_preset() {
    // For every configuration that passes validation, compile succeeds and
    // the context contains every key any path rule references.
    let wanted = referenced_keys();
    for preset in ALL_PRESETS {
        let valid = validate(preset.resolve(name())).expect("preset must validate");
        let ctx = compile(&valid, &stamp());
        for key in &wanted {
            assert!(
                ctx.contains(key),
                "preset {preset}: context is missing manifest key '{key}'"
            );
        }
    }
}

#[test]
fn manifest_keys_are_boolean_flags() {
    // Path predicates only ever read flags; a manifest key compiled as text
    // would blow up at prune time, so catch it here.
    let valid = validate(ProjectConfig::new(name())).unwrap();
    let ctx = compile(&valid, &stamp());
    for key in referenced_keys() {
        assert!(
            ctx.flag(key).is_ok(),
            "manifest key '{key}' is not a boolean flag"
        );
    }
}

// ── Presets ──────────────────────────────────────────────────────────────────

#[test]
fn every_preset_name_resolves_and_validates() {
    for raw in ["production", "ai-agent", "minimal"] {
        let preset: Preset = raw.parse().expect("known preset must parse");
        assert!(validate(preset.resolve(name())).is_ok(), "preset {raw}");
    }
}

#[test]
fn minimal_preset_context_matches_expectations() {
    let valid = validate(Preset::Minimal.resolve(name())).unwrap();
    let ctx = compile(&valid, &stamp());
    assert!(!ctx.flag("use_database").unwrap());
    assert!(!ctx.flag("use_auth").unwrap());
    assert!(!ctx.flag("enable_docker").unwrap());
    assert!(!ctx.flag("use_github_actions").unwrap());
    assert!(!ctx.flag("enable_kubernetes").unwrap());
}

// ── Rule independence ────────────────────────────────────────────────────────

#[test]
fn no_invariant_is_vacuously_failing() {
    // The schema defaults violate nothing, so for every rule there exists a
    // configuration (this one) where its trigger condition is off and the
    // whole configuration is valid.
    let config = ProjectConfig::new(name());
    for rule in INVARIANT_REGISTRY {
        assert!(
            !(rule.violated)(&config),
            "rule '{}' fires on the default configuration",
            rule.name
        );
    }
    assert!(validate(config).is_ok());
}

#[test]
fn first_violation_wins() {
    // Fail-fast: a configuration breaking several rules reports the first
    // one in registry order.
    let mut config = ProjectConfig::new(name());
    config.database = Database::None;
    config.instrumentation.database = false;
    config.enable_admin_panel = true;
    config.enable_caching = true; // also violated, but later in the registry
    let err = validate(config).unwrap_err();
    assert_eq!(err.to_string(), "Admin panel requires a database");
}

// ── Scenario matrix ──────────────────────────────────────────────────────────

#[test]
fn scenario_a_admin_panel_without_database() {
    let mut config = ProjectConfig::new(name());
    config.database = Database::None;
    config.instrumentation.database = false;
    config.enable_admin_panel = true;
    let err = validate(config).unwrap_err();
    assert!(err.to_string().contains("Admin panel requires a database"));
}

#[test]
fn scenario_b_caching_without_redis() {
    let mut config = ProjectConfig::new(name());
    config.enable_caching = true;
    config.enable_redis = false;
    let err = validate(config).unwrap_err();
    assert!(err.to_string().contains("Caching requires Redis"));
}

#[test]
fn scenario_d_websocket_auth_mode_mismatch() {
    let mut config = ProjectConfig::new(name());
    config.auth = fastgen_core::domain::AuthMode::Jwt;
    config.websocket_auth = fastgen_core::domain::WebSocketAuth::ApiKey;
    let err = validate(config).unwrap_err();
    assert!(
        err.to_string()
            .contains("WebSocket API key authentication requires API key auth")
    );
}

#[test]
fn scenario_e_conversation_persistence_without_agent() {
    let mut config = ProjectConfig::new(name());
    config.enable_conversation_persistence = true;
    config.enable_ai_agent = false;
    assert!(validate(config).is_err());
}
