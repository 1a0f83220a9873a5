//! Combat domain: damage resolution.
//!
//! Callers never touch health directly. Every transfer goes through here so
//! invulnerability, block/parry, phase reduction and stagger amplification
//! agree on ordering:
//!
//! 1. target invulnerability
//! 2. target-side modifiers (block/parry, phase damage reduction)
//! 3. source-side amplification (stagger window on player damage)
//! 4. health subtraction, saturating at zero
//! 5. `HealthChanged` notification

use crate::combat::ai::BossController;
use crate::content::PlayerTuningDef;
use crate::core::{CombatEvent, SimulationContext, Target};
use crate::player::PlayerController;

/// How an incoming hit is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    /// Discrete hit: melee strikes, orbs, pulse hits. Can be parried.
    Strike,
    /// Per-tick exposure: beams, pulsation bands, spinning orbs.
    Continuous,
}

/// Target-side factor for damage reaching the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMitigation {
    pub factor: f32,
    pub parried: bool,
}

/// Result of a hit on the player.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerHit {
    pub applied: f32,
    pub parried: bool,
}

/// Player-side modifiers. `None` means the hit is ignored entirely.
pub fn player_mitigation(
    invulnerable: bool,
    blocking: bool,
    parry_open: bool,
    kind: DamageKind,
    tuning: &PlayerTuningDef,
) -> Option<PlayerMitigation> {
    if invulnerable {
        return None;
    }
    if blocking && parry_open && tuning.parry_enabled && kind == DamageKind::Strike {
        return Some(PlayerMitigation {
            factor: tuning.parry_damage_factor,
            parried: true,
        });
    }
    let factor = if blocking {
        tuning.block_damage_factor
    } else {
        1.0
    };
    Some(PlayerMitigation {
        factor,
        parried: false,
    })
}

/// Boss-side modifier: phase reduction applies unless the hit is amplified
/// by the stagger window, in which case amplification replaces it.
pub fn boss_intake(amount: f32, amplified: bool, phase_damage_taken: f32) -> f32 {
    if amplified {
        amount
    } else {
        amount * phase_damage_taken
    }
}

/// Apply damage to the player.
pub fn damage_player(
    player: &mut PlayerController,
    amount: f32,
    kind: DamageKind,
    events: &mut Vec<CombatEvent>,
) -> PlayerHit {
    if amount <= 0.0 {
        return PlayerHit::default();
    }
    let Some(mitigation) = player_mitigation(
        player.invulnerable.is_invulnerable(),
        player.blocking,
        player.parry.is_open(),
        kind,
        &player.tuning,
    ) else {
        return PlayerHit::default();
    };

    let applied = player.health.take_damage(amount * mitigation.factor);
    if applied > 0.0 {
        events.push(CombatEvent::HealthChanged {
            target: Target::Player,
            current: player.health.current,
            max: player.health.max,
        });
    }
    PlayerHit {
        applied,
        parried: mitigation.parried,
    }
}

/// Apply damage to the boss. `amplified` marks damage already multiplied by
/// the stagger window.
pub fn damage_boss(
    boss: &mut BossController,
    amount: f32,
    amplified: bool,
    events: &mut Vec<CombatEvent>,
) -> f32 {
    if amount <= 0.0 {
        return 0.0;
    }
    let intake = boss_intake(amount, amplified, boss.phase_tuning().damage_taken);
    let applied = boss.health.take_damage(intake);
    if applied > 0.0 {
        events.push(CombatEvent::HealthChanged {
            target: Target::Boss,
            current: boss.health.current,
            max: boss.health.max,
        });
    }
    applied
}

/// Player melee or spell damage: amplified while the boss is staggered, and
/// feeds `stun_fraction` of the outgoing amount into the stagger meter.
pub fn player_strikes_boss(
    boss: &mut BossController,
    base_amount: f32,
    stun_fraction: f32,
    ctx: &mut SimulationContext,
) -> f32 {
    let amplified = ctx.stun.is_active();
    let amount = base_amount * ctx.stun.outgoing_multiplier();
    let applied = damage_boss(boss, amount, amplified, &mut ctx.events);
    if applied > 0.0 {
        ctx.stun.contribute(amount * stun_fraction);
    }
    applied
}
