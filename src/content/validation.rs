//! Validation for cross-references and numeric ranges in boss content.

use super::data::*;
use super::registry::ContentRegistry;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for checking that a pattern id exists on the variant
macro_rules! check_pattern_ref {
    ($errors:expr, $boss:expr, $field:expr, $ids:expr) => {
        for pattern_id in $ids {
            if $boss.pattern(*pattern_id).is_none() {
                $errors.push(ValidationError {
                    source_type: "Boss",
                    source_id: $boss.id.clone(),
                    field: $field,
                    message: format!("references missing pattern {}", pattern_id),
                });
            }
        }
    };
}

/// Helper macro for numeric range checks
macro_rules! check_range {
    ($errors:expr, $source_type:expr, $source_id:expr, $field:expr, $cond:expr, $msg:expr) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: $msg.to_string(),
            });
        }
    };
}

/// Validate every boss variant in the registry.
/// Returns a list of validation errors, empty if all content is usable.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for boss in registry.bosses.values() {
        validate_boss(boss, &mut errors);
    }
    errors
}

/// Validate a single boss variant, appending any problems to `errors`.
pub fn validate_boss(boss: &BossVariantDef, errors: &mut Vec<ValidationError>) {
    let id = boss.id.as_str();

    check_range!(errors, "Boss", id, "max_health", boss.max_health > 0.0, "must be positive");
    check_range!(errors, "Boss", id, "radius", boss.radius > 0.0, "must be positive");
    check_range!(
        errors,
        "Boss",
        id,
        "cooldown_jitter",
        (0.0..1.0).contains(&boss.cooldown_jitter),
        "must be in [0, 1)"
    );
    check_range!(errors, "Boss", id, "phases", !boss.phases.is_empty(), "no phases defined");

    // Patterns
    for pattern in &boss.patterns {
        let pattern_id = format!("{}#{}", id, pattern.id);
        check_range!(
            errors,
            "Pattern",
            pattern_id,
            "duration",
            pattern.duration > 0.0,
            "must be positive"
        );
        check_range!(
            errors,
            "Pattern",
            pattern_id,
            "windup",
            pattern.windup >= 0.0 && pattern.windup <= pattern.duration,
            "must lie within [0, duration]"
        );
        check_range!(
            errors,
            "Pattern",
            pattern_id,
            "damage",
            pattern.damage >= 0.0,
            "must not be negative"
        );
        if let PatternKind::Pulsation { pulse_interval, .. } = pattern.kind {
            check_range!(
                errors,
                "Pattern",
                pattern_id,
                "kind.pulse_interval",
                pulse_interval > 0.0,
                "must be positive"
            );
        }
    }
    let mut seen = Vec::new();
    for pattern in &boss.patterns {
        if seen.contains(&pattern.id) {
            errors.push(ValidationError {
                source_type: "Boss",
                source_id: id.to_string(),
                field: "patterns",
                message: format!("duplicate pattern id {}", pattern.id),
            });
        }
        seen.push(pattern.id);
    }

    // Regular phases: numbered 1..n with strictly descending thresholds
    let mut previous_threshold = f32::INFINITY;
    for (index, phase) in boss.phases.iter().enumerate() {
        check_range!(
            errors,
            "Boss",
            id,
            "phases.phase",
            usize::from(phase.phase) == index + 1,
            format!("phase {} listed at position {}", phase.phase, index + 1)
        );
        check_range!(
            errors,
            "Boss",
            id,
            "phases.health_threshold",
            phase.health_threshold > 0.0
                && phase.health_threshold <= 1.0
                && phase.health_threshold < previous_threshold,
            "thresholds must descend within (0, 1]"
        );
        previous_threshold = phase.health_threshold;
        validate_phase_tuning(id, phase, errors);
        check_pattern_ref!(errors, boss, "phases.pattern_ids", &phase.pattern_ids);
    }

    if let Some(final_phase) = &boss.final_phase {
        check_range!(
            errors,
            "Boss",
            id,
            "final_phase.tuning.health_threshold",
            final_phase.tuning.health_threshold > 0.0
                && final_phase.tuning.health_threshold < previous_threshold,
            "must lie below the last regular phase threshold"
        );
        check_range!(
            errors,
            "Boss",
            id,
            "final_phase.duration",
            final_phase.duration > 0.0,
            "must be positive"
        );
        check_range!(
            errors,
            "Boss",
            id,
            "final_phase.volley_duration_scale",
            final_phase.volley_duration_scale >= 1.0,
            "volley durations may only be extended"
        );
        validate_phase_tuning(id, &final_phase.tuning, errors);
        check_pattern_ref!(
            errors,
            boss,
            "final_phase.tuning.pattern_ids",
            &final_phase.tuning.pattern_ids
        );
        check_pattern_ref!(
            errors,
            boss,
            "final_phase.volley_pattern_ids",
            &final_phase.volley_pattern_ids
        );
        for pattern_id in &final_phase.volley_pattern_ids {
            if let Some(pattern) = boss.pattern(*pattern_id) {
                check_range!(
                    errors,
                    "Boss",
                    id,
                    "final_phase.volley_pattern_ids",
                    pattern.kind.is_hazard(),
                    format!("volley pattern {} is not a hazard attack", pattern_id)
                );
            }
        }
    }
}

fn validate_phase_tuning(id: &str, phase: &PhaseDef, errors: &mut Vec<ValidationError>) {
    check_range!(
        errors,
        "Boss",
        id,
        "speed_multiplier",
        phase.speed_multiplier >= 0.0,
        "must not be negative"
    );
    check_range!(
        errors,
        "Boss",
        id,
        "cooldown_multiplier",
        phase.cooldown_multiplier > 0.0,
        "must be positive"
    );
    check_range!(
        errors,
        "Boss",
        id,
        "damage_taken",
        phase.damage_taken > 0.0 && phase.damage_taken <= 1.0,
        "must lie within (0, 1]"
    );
    check_range!(
        errors,
        "Boss",
        id,
        "pattern_ids",
        !phase.pattern_ids.is_empty(),
        format!("phase {} has no attack patterns", phase.phase)
    );
}

/// Validate the variant-independent tuning.
pub fn validate_defaults(defaults: &CombatDefaults) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let player = &defaults.player;
    let rules = &defaults.allocation;

    check_range!(
        errors,
        "CombatDefaults",
        "player",
        "roll_iframes",
        player.roll_iframes <= player.roll_duration,
        "iframes must not outlast the roll"
    );
    check_range!(
        errors,
        "CombatDefaults",
        "player",
        "block_damage_factor",
        (0.0..=1.0).contains(&player.block_damage_factor),
        "must lie within [0, 1]"
    );
    check_range!(
        errors,
        "CombatDefaults",
        "player",
        "parry_damage_factor",
        (0.0..=player.block_damage_factor).contains(&player.parry_damage_factor),
        "parry must reduce damage at least as much as a block"
    );
    check_range!(
        errors,
        "CombatDefaults",
        "allocation",
        "max_stat",
        rules.min_stat >= 1 && rules.min_stat <= rules.max_stat,
        "stat bounds must satisfy 1 <= min <= max"
    );
    check_range!(
        errors,
        "CombatDefaults",
        "allocation",
        "bonus_points",
        rules.bonus_points >= 0,
        "must not be negative"
    );
    check_range!(
        errors,
        "CombatDefaults",
        "stun",
        "threshold",
        defaults.stun.threshold > 0.0 && defaults.stun.duration > 0.0,
        "threshold and duration must be positive"
    );
    errors
}
