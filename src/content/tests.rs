//! Content domain: unit tests for loading and validating boss content.

use std::path::Path;

use super::{
    BossVariantDef, CONTENT_DIR, CombatDefaults, ContentRegistry, DataFile, PatternKind,
    load_all_content, parse_ron, validate_content, validate_defaults,
};

fn shipped_content_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(CONTENT_DIR)
}

#[test]
fn test_builtin_content_is_valid() {
    let registry = ContentRegistry::builtin();
    let errors = validate_content(&registry);
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    assert!(validate_defaults(&CombatDefaults::default()).is_empty());
}

#[test]
fn test_shipped_content_loads_and_validates() {
    let (registry, defaults) = match load_all_content(&shipped_content_dir()) {
        Ok(content) => content,
        Err(errors) => panic!("content failed to load: {:?}", errors),
    };

    assert!(validate_content(&registry).is_empty());
    assert!(validate_defaults(&defaults).is_empty());
    assert_eq!(registry.bosses.len(), 2);
    assert_eq!(registry.boss("boss_warden"), Some(&BossVariantDef::warden()));
    assert_eq!(defaults, CombatDefaults::default());

    let colossus = registry.boss("boss_colossus").expect("colossus is shipped");
    assert!(colossus.stagger_freezes_boss);
    assert_eq!(colossus.patterns.len(), BossVariantDef::colossus().patterns.len());
    assert!(colossus.final_phase.is_some());
}

#[test]
fn test_reference_pattern_table() {
    let warden = BossVariantDef::warden();
    let rows: Vec<(u32, f32, f32, f32, f32)> = warden
        .patterns
        .iter()
        .filter(|p| p.kind == PatternKind::Melee)
        .map(|p| (p.id, p.windup, p.duration, p.damage, p.shape_radius))
        .collect();

    assert_eq!(
        rows,
        vec![
            (0, 0.7, 1.2, 40.0, 50.0),
            (1, 0.6, 1.5, 30.0, 60.0),
            (2, 1.0, 1.8, 50.0, 70.0),
            (3, 0.4, 2.0, 20.0, 40.0),
        ]
    );
}

#[test]
fn test_phase_lookup_includes_final_phase() {
    let warden = BossVariantDef::warden();
    assert_eq!(warden.last_regular_phase(), 2);
    assert_eq!(warden.final_phase_number(), 3);
    assert_eq!(warden.phase(2).map(|p| p.cooldown_multiplier), Some(0.7));
    assert_eq!(warden.phase(3).map(|p| p.speed_multiplier), Some(0.0));
    assert!(warden.phase(4).is_none());
}

#[test]
fn test_missing_pattern_reference_is_reported() {
    let mut boss = BossVariantDef::warden();
    boss.phases[1].pattern_ids.push(42);

    let mut registry = ContentRegistry::default();
    registry.insert(boss);
    let errors = validate_content(&registry);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "phases.pattern_ids");
    assert!(errors[0].message.contains("42"));
}

#[test]
fn test_non_descending_thresholds_are_rejected() {
    let mut boss = BossVariantDef::warden();
    boss.phases[1].health_threshold = 1.0;

    let mut registry = ContentRegistry::default();
    registry.insert(boss);
    let errors = validate_content(&registry);

    assert!(
        errors
            .iter()
            .any(|e| e.field == "phases.health_threshold")
    );
}

#[test]
fn test_melee_volley_pattern_is_rejected() {
    let mut boss = BossVariantDef::warden();
    if let Some(final_phase) = boss.final_phase.as_mut() {
        final_phase.volley_pattern_ids = vec![0, 5];
    }

    let mut registry = ContentRegistry::default();
    registry.insert(boss);
    let errors = validate_content(&registry);

    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("not a hazard"));
}

#[test]
fn test_windup_longer_than_duration_is_rejected() {
    let mut boss = BossVariantDef::warden();
    boss.patterns[0].windup = 5.0;

    let mut registry = ContentRegistry::default();
    registry.insert(boss);
    let errors = validate_content(&registry);

    assert!(errors.iter().any(|e| e.field == "windup"));
}

#[test]
fn test_invalid_defaults_are_rejected() {
    let mut defaults = CombatDefaults::default();
    defaults.player.roll_iframes = 1.0;
    defaults.player.parry_damage_factor = 0.9;

    let errors = validate_defaults(&defaults);
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_parse_error_names_the_file() {
    let result = parse_ron::<DataFile<BossVariantDef>>("bosses.ron", "(schema_version: 1, items: [(id: ")
        .map(|file| file.items.len());
    let error = result.expect_err("truncated file must not parse");
    assert_eq!(error.file, "bosses.ron");
    assert!(error.to_string().starts_with("Failed to load bosses.ron"));
}

#[test]
fn test_missing_directory_reports_both_files() {
    let errors = match load_all_content(Path::new("does/not/exist")) {
        Ok(_) => panic!("loading from a missing directory must fail"),
        Err(errors) => errors,
    };
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_final_phase_parses_without_some_wrapper() {
    let text = r#"(
        tuning: (
            phase: 3,
            health_threshold: 0.1,
            speed_multiplier: 0.0,
            cooldown_multiplier: 0.6,
            damage_taken: 0.7,
            pattern_ids: [4],
            ranged_attack_chance: 1.0,
        ),
        duration: 12.0,
        volley_duration_scale: 1.5,
        volley_pattern_ids: [4],
    )"#;
    let parsed: Option<super::FinalPhaseDef> = parse_ron("inline", text).expect("implicit some");
    assert_eq!(parsed.map(|f| f.duration), Some(12.0));
}
