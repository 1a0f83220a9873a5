//! Data definitions for all RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. Every definition also has a built-in constructor
//! carrying the same values, so the engine runs without touching disk.

use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Arenas
// ============================================================================

/// Arena bound shape, in screen coordinates (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum ArenaDef {
    Circle { center: (f32, f32), radius: f32 },
    Rect { min: (f32, f32), max: (f32, f32) },
}

// ============================================================================
// Attack patterns (bosses.ron -> patterns)
// ============================================================================

/// Behavior tag of an attack pattern. The boss dispatches on this tag; the
/// payload holds the kind-specific geometry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum PatternKind {
    /// Distance-gated strike resolved once at the end of the windup
    Melee,
    /// Ring of orbs fired outward from the boss
    OrbBurst {
        count: u32,
        speed: f32,
        orb_radius: f32,
    },
    /// Ring expanding from the boss with periodic pulse hits
    Pulsation {
        expansion_speed: f32,
        max_radius: f32,
        band_width: f32,
        pulse_interval: f32,
        pulse_damage: f32,
    },
    /// Single beam aimed at the player when the attack executes
    LineBeam { length: f32, width: f32 },
    /// Evenly spaced beams rotating around the boss
    MultiBeam {
        beams: u32,
        length: f32,
        width: f32,
        angular_speed: f32,
    },
    /// Orbs circling the boss at a fixed radius
    SpinningRing {
        orbs: u32,
        orbit_radius: f32,
        orb_radius: f32,
        angular_speed: f32,
    },
}

impl PatternKind {
    pub fn is_hazard(&self) -> bool {
        !matches!(self, PatternKind::Melee)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PatternKind::Melee => "melee",
            PatternKind::OrbBurst { .. } => "orb-burst",
            PatternKind::Pulsation { .. } => "pulsation",
            PatternKind::LineBeam { .. } => "line-beam",
            PatternKind::MultiBeam { .. } => "multi-beam",
            PatternKind::SpinningRing { .. } => "spinning-ring",
        }
    }
}

/// One row of the attack tuning table.
///
/// `damage` is a one-shot amount for melee and orbs, a per-second rate for
/// beams and pulsation bands, and a per-contact-tick amount for spinning rings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AttackPatternDef {
    pub id: u32,
    pub name: String,
    pub kind: PatternKind,
    pub windup: f32,
    pub duration: f32,
    pub damage: f32,
    pub shape_radius: f32,
}

// ============================================================================
// Phases (bosses.ron -> phases / final_phase)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PhaseDef {
    pub phase: u8,
    /// Health fraction at or below which this phase is entered
    pub health_threshold: f32,
    pub speed_multiplier: f32,
    pub cooldown_multiplier: f32,
    /// Multiplier on incoming damage that is not stun-amplified
    pub damage_taken: f32,
    pub pattern_ids: Vec<u32>,
    /// Chance per second to open an attack from outside trigger distance
    pub ranged_attack_chance: f32,
}

/// Time-boxed last stand entered below a low health fraction.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FinalPhaseDef {
    pub tuning: PhaseDef,
    /// Seconds before the boss falls back to its last regular phase
    pub duration: f32,
    /// Duration multiplier for the volley started on entry
    pub volley_duration_scale: f32,
    /// Hazard patterns started simultaneously on entry
    pub volley_pattern_ids: Vec<u32>,
}

// ============================================================================
// Boss variants (bosses.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BossVariantDef {
    pub id: String,
    pub name: String,
    pub arena: ArenaDef,
    pub spawn: (f32, f32),
    pub radius: f32,
    pub max_health: f32,
    pub base_speed: f32,
    pub attack_cooldown: f32,
    /// Grace before the very first attack can be chosen
    pub initial_attack_delay: f32,
    pub trigger_distance: f32,
    /// Grace after every attack before the boss moves or attacks again
    pub recovery_grace: f32,
    /// Relative cooldown jitter, 0.2 = +/-20%
    pub cooldown_jitter: f32,
    /// Fraction of a parried strike's damage reflected onto the boss
    pub parry_reflect_factor: f32,
    /// Whether an active stagger window suspends the boss's own timers
    pub stagger_freezes_boss: bool,
    pub phases: Vec<PhaseDef>,
    pub final_phase: Option<FinalPhaseDef>,
    pub patterns: Vec<AttackPatternDef>,
}

impl BossVariantDef {
    pub fn pattern(&self, id: u32) -> Option<&AttackPatternDef> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Highest phase number reachable through health thresholds alone.
    pub fn last_regular_phase(&self) -> u8 {
        self.phases.iter().map(|p| p.phase).max().unwrap_or(1)
    }

    /// Phase number used while the final phase is running.
    pub fn final_phase_number(&self) -> u8 {
        self.last_regular_phase() + 1
    }

    /// Tuning for a phase number, including the final phase.
    pub fn phase(&self, phase: u8) -> Option<&PhaseDef> {
        if phase == self.final_phase_number() {
            return self.final_phase.as_ref().map(|f| &f.tuning);
        }
        self.phases.iter().find(|p| p.phase == phase)
    }

    /// The reference boss: circular arena, four melee strikes and five
    /// hazard attacks.
    pub fn warden() -> Self {
        Self {
            id: "boss_warden".to_string(),
            name: "The Warden".to_string(),
            arena: ArenaDef::Circle {
                center: (400.0, 300.0),
                radius: 250.0,
            },
            spawn: (400.0, 150.0),
            radius: 30.0,
            max_health: 500.0,
            base_speed: 100.0,
            attack_cooldown: 2.0,
            initial_attack_delay: 1.0,
            trigger_distance: 150.0,
            recovery_grace: 0.5,
            cooldown_jitter: 0.2,
            parry_reflect_factor: 0.65,
            stagger_freezes_boss: false,
            phases: vec![
                PhaseDef {
                    phase: 1,
                    health_threshold: 1.0,
                    speed_multiplier: 1.0,
                    cooldown_multiplier: 1.0,
                    damage_taken: 1.0,
                    pattern_ids: vec![0, 1, 2, 4],
                    ranged_attack_chance: 0.0,
                },
                PhaseDef {
                    phase: 2,
                    health_threshold: 0.5,
                    speed_multiplier: 1.3,
                    cooldown_multiplier: 0.7,
                    damage_taken: 0.8,
                    pattern_ids: vec![0, 1, 2, 3, 4, 5, 6],
                    ranged_attack_chance: 0.35,
                },
            ],
            final_phase: Some(FinalPhaseDef {
                tuning: PhaseDef {
                    phase: 3,
                    health_threshold: 0.1,
                    speed_multiplier: 0.0,
                    cooldown_multiplier: 0.6,
                    damage_taken: 0.7,
                    pattern_ids: vec![4, 5, 6, 7, 8],
                    ranged_attack_chance: 1.0,
                },
                duration: 12.0,
                volley_duration_scale: 1.5,
                volley_pattern_ids: vec![5, 7, 8],
            }),
            patterns: standard_patterns(),
        }
    }

    /// Slow, heavy variant fought in a rectangular pit.
    pub fn colossus() -> Self {
        let mut patterns = standard_patterns();
        for pattern in &mut patterns {
            if pattern.kind == PatternKind::Melee {
                pattern.damage *= 1.25;
                pattern.windup += 0.15;
            }
        }
        Self {
            id: "boss_colossus".to_string(),
            name: "The Colossus".to_string(),
            arena: ArenaDef::Rect {
                min: (100.0, 75.0),
                max: (700.0, 525.0),
            },
            spawn: (400.0, 140.0),
            radius: 40.0,
            max_health: 800.0,
            base_speed: 70.0,
            attack_cooldown: 2.6,
            initial_attack_delay: 1.5,
            trigger_distance: 170.0,
            recovery_grace: 0.8,
            cooldown_jitter: 0.2,
            parry_reflect_factor: 0.5,
            stagger_freezes_boss: true,
            phases: vec![
                PhaseDef {
                    phase: 1,
                    health_threshold: 1.0,
                    speed_multiplier: 1.0,
                    cooldown_multiplier: 1.0,
                    damage_taken: 1.0,
                    pattern_ids: vec![0, 2, 6],
                    ranged_attack_chance: 0.2,
                },
                PhaseDef {
                    phase: 2,
                    health_threshold: 0.5,
                    speed_multiplier: 1.2,
                    cooldown_multiplier: 0.75,
                    damage_taken: 0.85,
                    pattern_ids: vec![0, 1, 2, 6, 7],
                    ranged_attack_chance: 0.4,
                },
            ],
            final_phase: Some(FinalPhaseDef {
                tuning: PhaseDef {
                    phase: 3,
                    health_threshold: 0.1,
                    speed_multiplier: 0.0,
                    cooldown_multiplier: 0.7,
                    damage_taken: 0.75,
                    pattern_ids: vec![4, 6, 7],
                    ranged_attack_chance: 1.0,
                },
                duration: 10.0,
                volley_duration_scale: 1.4,
                volley_pattern_ids: vec![4, 7],
            }),
            patterns,
        }
    }
}

/// Shared attack table. Ids 0-3 are the classic melee set.
pub fn standard_patterns() -> Vec<AttackPatternDef> {
    vec![
        AttackPatternDef {
            id: 0,
            name: "Overhead Smash".to_string(),
            kind: PatternKind::Melee,
            windup: 0.7,
            duration: 1.2,
            damage: 40.0,
            shape_radius: 50.0,
        },
        AttackPatternDef {
            id: 1,
            name: "Sweep".to_string(),
            kind: PatternKind::Melee,
            windup: 0.6,
            duration: 1.5,
            damage: 30.0,
            shape_radius: 60.0,
        },
        AttackPatternDef {
            id: 2,
            name: "Jump Slam".to_string(),
            kind: PatternKind::Melee,
            windup: 1.0,
            duration: 1.8,
            damage: 50.0,
            shape_radius: 70.0,
        },
        AttackPatternDef {
            id: 3,
            name: "Rapid Strikes".to_string(),
            kind: PatternKind::Melee,
            windup: 0.4,
            duration: 2.0,
            damage: 20.0,
            shape_radius: 40.0,
        },
        AttackPatternDef {
            id: 4,
            name: "Orb Burst".to_string(),
            kind: PatternKind::OrbBurst {
                count: 12,
                speed: 220.0,
                orb_radius: 8.0,
            },
            windup: 0.8,
            duration: 2.5,
            damage: 15.0,
            shape_radius: 8.0,
        },
        AttackPatternDef {
            id: 5,
            name: "Pulsation".to_string(),
            kind: PatternKind::Pulsation {
                expansion_speed: 180.0,
                max_radius: 240.0,
                band_width: 24.0,
                pulse_interval: 0.5,
                pulse_damage: 12.0,
            },
            windup: 0.9,
            duration: 4.0,
            damage: 20.0,
            shape_radius: 240.0,
        },
        AttackPatternDef {
            id: 6,
            name: "Line Beam".to_string(),
            kind: PatternKind::LineBeam {
                length: 420.0,
                width: 26.0,
            },
            windup: 1.0,
            duration: 3.0,
            damage: 35.0,
            shape_radius: 13.0,
        },
        AttackPatternDef {
            id: 7,
            name: "Multi Beam".to_string(),
            kind: PatternKind::MultiBeam {
                beams: 4,
                length: 300.0,
                width: 20.0,
                angular_speed: 0.9,
            },
            windup: 1.0,
            duration: 4.5,
            damage: 25.0,
            shape_radius: 10.0,
        },
        AttackPatternDef {
            id: 8,
            name: "Spinning Ring".to_string(),
            kind: PatternKind::SpinningRing {
                orbs: 6,
                orbit_radius: 110.0,
                orb_radius: 12.0,
                angular_speed: 2.2,
            },
            windup: 0.8,
            duration: 5.0,
            damage: 0.6,
            shape_radius: 110.0,
        },
    ]
}

// ============================================================================
// Combat defaults (combat_defaults.ron)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerTuningDef {
    pub radius: f32,
    pub base_speed: f32,
    /// Movement speed bonus per agility point, 0.01 = +1%
    pub agility_speed_bonus: f32,
    pub block_speed_factor: f32,
    /// Fraction of incoming damage taken while blocking
    pub block_damage_factor: f32,
    pub parry_enabled: bool,
    pub parry_window: f32,
    pub parry_cooldown: f32,
    /// Fraction of incoming damage taken on a parried strike
    pub parry_damage_factor: f32,
    pub roll_speed: f32,
    /// Seconds the roll direction stays locked
    pub roll_duration: f32,
    pub roll_iframes: f32,
    /// Melee reach beyond touching distance
    pub melee_reach: f32,
    pub melee_stun_fraction: f32,
    pub spell_cooldown: f32,
    pub spell_speed: f32,
    pub spell_lifetime: f32,
    pub spell_radius: f32,
    pub spell_stun_fraction: f32,
}

impl Default for PlayerTuningDef {
    fn default() -> Self {
        Self {
            radius: 15.0,
            base_speed: 200.0,
            agility_speed_bonus: 0.01,
            block_speed_factor: 0.5,
            block_damage_factor: 0.35,
            parry_enabled: true,
            parry_window: 0.2,
            parry_cooldown: 0.5,
            parry_damage_factor: 0.1,
            roll_speed: 400.0,
            roll_duration: 0.4,
            roll_iframes: 0.3,
            melee_reach: 30.0,
            melee_stun_fraction: 0.7,
            spell_cooldown: 2.0,
            spell_speed: 500.0,
            spell_lifetime: 1.5,
            spell_radius: 10.0,
            spell_stun_fraction: 0.5,
        }
    }
}

/// Linear formulas turning the five base stats into derived attributes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatFormulaDef {
    pub base_health: f32,
    pub health_per_vitality: f32,
    pub base_attack_damage: f32,
    pub attack_damage_per_strength: f32,
    pub base_attack_cooldown: f32,
    pub attack_cooldown_per_dexterity: f32,
    pub min_attack_cooldown: f32,
    pub base_roll_cooldown: f32,
    pub roll_cooldown_per_agility: f32,
    pub base_spell_damage: f32,
    pub spell_damage_per_intelligence: f32,
}

impl Default for StatFormulaDef {
    fn default() -> Self {
        Self {
            base_health: 100.0,
            health_per_vitality: 10.0,
            base_attack_damage: 20.0,
            attack_damage_per_strength: 3.0,
            base_attack_cooldown: 0.5,
            attack_cooldown_per_dexterity: 0.01,
            min_attack_cooldown: 0.1,
            base_roll_cooldown: 1.5,
            roll_cooldown_per_agility: 0.05,
            base_spell_damage: 30.0,
            spell_damage_per_intelligence: 4.0,
        }
    }
}

/// Bounds enforced on the stat allocation form's output.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AllocationRulesDef {
    pub min_stat: i32,
    pub max_stat: i32,
    /// Points available above `min_stat` across all five stats
    pub bonus_points: i32,
}

impl Default for AllocationRulesDef {
    fn default() -> Self {
        Self {
            min_stat: 1,
            max_stat: 20,
            bonus_points: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StunTuningDef {
    pub threshold: f32,
    pub duration: f32,
    pub damage_multiplier: f32,
}

impl Default for StunTuningDef {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            duration: 2.0,
            damage_multiplier: 1.35,
        }
    }
}

/// Variant-independent tuning loaded from combat_defaults.ron.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CombatDefaults {
    pub player: PlayerTuningDef,
    pub formulas: StatFormulaDef,
    pub allocation: AllocationRulesDef,
    pub stun: StunTuningDef,
    /// Scale on rate x dt for continuous hazard damage
    pub continuous_damage_scale: f32,
    /// Distance beyond the arena bound at which orbs are culled
    pub hazard_cull_margin: f32,
}

impl Default for CombatDefaults {
    fn default() -> Self {
        Self {
            player: PlayerTuningDef::default(),
            formulas: StatFormulaDef::default(),
            allocation: AllocationRulesDef::default(),
            stun: StunTuningDef::default(),
            continuous_damage_scale: 1.0,
            hazard_cull_margin: 100.0,
        }
    }
}
