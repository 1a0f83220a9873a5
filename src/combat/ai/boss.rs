//! Combat domain: boss phase machine, attack selection and movement.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::attacks::{AttackInstance, AttackStage};
use crate::combat::components::Health;
use crate::combat::damage::{DamageKind, damage_boss};
use crate::combat::hazards::{HazardOwner, HazardSystem};
use crate::content::{BossVariantDef, PatternKind, PhaseDef};
use crate::core::{Arena, CombatEvent, SimulationContext};
use crate::player::PlayerController;

/// Used when a variant has no entry for the current phase number.
static NEUTRAL_PHASE: PhaseDef = PhaseDef {
    phase: 1,
    health_threshold: 1.0,
    speed_multiplier: 1.0,
    cooldown_multiplier: 1.0,
    damage_taken: 1.0,
    pattern_ids: Vec::new(),
    ranged_attack_chance: 0.0,
};

/// The boss: position, health, phase and every attack it has running.
///
/// Per tick the boss either seeks the player or progresses its attack:
/// Idle -> Windup -> Executed -> Recovering -> Idle. Phase tuning is looked up
/// by phase number from the variant tables, so reverting from the final phase
/// restores exactly the values the earlier phase had.
#[derive(Debug, Clone)]
pub struct BossController {
    pub variant: BossVariantDef,
    pub position: Vec2,
    pub radius: f32,
    pub health: Health,
    pub phase: u8,
    /// Cooldown before another attack may start
    pub attack_timer: f32,
    /// Grace after an attack ends; the boss neither moves nor attacks
    pub next_attack_timer: f32,
    pub current_attack: Option<AttackInstance>,
    /// Attacks started together on final-phase entry
    pub volley: Vec<AttackInstance>,
    pub hazards: HazardSystem,
    pub final_phase_timer: f32,
    pub final_phase_spent: bool,
    pub attacks_finished: u32,
    next_attack_id: u32,
}

impl BossController {
    pub fn new(variant: BossVariantDef, arena: &Arena) -> Self {
        let spawn = Vec2::new(variant.spawn.0, variant.spawn.1);
        Self {
            position: arena.clamp(spawn, variant.radius),
            radius: variant.radius,
            health: Health::new(variant.max_health),
            phase: 1,
            attack_timer: variant.attack_cooldown,
            next_attack_timer: variant.initial_attack_delay,
            current_attack: None,
            volley: Vec::new(),
            hazards: HazardSystem::default(),
            final_phase_timer: 0.0,
            final_phase_spent: false,
            attacks_finished: 0,
            next_attack_id: 0,
            variant,
        }
    }

    pub fn phase_tuning(&self) -> &PhaseDef {
        self.variant.phase(self.phase).unwrap_or(&NEUTRAL_PHASE)
    }

    pub fn in_final_phase(&self) -> bool {
        self.variant.final_phase.is_some() && self.phase == self.variant.final_phase_number()
    }

    pub fn speed(&self) -> f32 {
        self.variant.base_speed * self.phase_tuning().speed_multiplier
    }

    /// Cooldown without jitter for the current phase.
    pub fn base_cooldown(&self) -> f32 {
        self.variant.attack_cooldown * self.phase_tuning().cooldown_multiplier
    }

    /// No attack of any kind is running.
    pub fn is_idle(&self) -> bool {
        self.current_attack.is_none() && self.volley.is_empty()
    }

    pub fn stage(&self) -> AttackStage {
        if let Some(attack) = &self.current_attack {
            return attack.stage();
        }
        if !self.volley.is_empty() {
            if self.volley.iter().any(|a| a.executed) {
                return AttackStage::Executed;
            }
            return AttackStage::Windup;
        }
        if self.attacks_finished > 0 && self.next_attack_timer > 0.0 {
            return AttackStage::Recovering;
        }
        AttackStage::Idle
    }

    /// Telegraph progress of the attack being shown, 0 when idle.
    pub fn windup_progress(&self) -> f32 {
        self.current_attack
            .as_ref()
            .or_else(|| self.volley.first())
            .map(AttackInstance::windup_fraction)
            .unwrap_or(0.0)
    }

    /// Health at which the next phase starts, if any phase is left.
    pub fn next_phase_threshold(&self) -> Option<f32> {
        let fraction = self.health.percent();
        let regular = self
            .variant
            .phases
            .iter()
            .filter(|p| p.phase > self.phase && p.health_threshold < fraction);
        let final_threshold = self
            .variant
            .final_phase
            .as_ref()
            .filter(|_| !self.final_phase_spent)
            .map(|f| f.tuning.health_threshold)
            .filter(|t| *t < fraction);
        regular
            .map(|p| p.health_threshold)
            .chain(final_threshold)
            .reduce(f32::max)
            .map(|t| t * self.health.max)
    }

    pub fn take_damage(&mut self, amount: f32, amplified: bool, events: &mut Vec<CombatEvent>) -> f32 {
        damage_boss(self, amount, amplified, events)
    }

    pub fn update(&mut self, dt: f32, player: &mut PlayerController, ctx: &mut SimulationContext) {
        if self.health.is_dead() {
            return;
        }

        // Player damage landed earlier this tick
        self.check_phase_transition(ctx);

        if self.variant.stagger_freezes_boss && ctx.stun.is_active() {
            return;
        }

        self.tick_final_phase(dt, ctx);
        self.attack_timer = (self.attack_timer - dt).max(0.0);

        let was_attacking = !self.is_idle();
        if !was_attacking && self.next_attack_timer <= 0.0 {
            self.seek(player.position, dt, &ctx.arena);
            let distance = self.position.distance(player.position);
            if self.attack_timer <= 0.0 && self.wants_attack(distance, dt, ctx) {
                self.start_attack(ctx);
            }
        }

        self.advance_attacks(dt, player, ctx);

        if !was_attacking {
            self.next_attack_timer = (self.next_attack_timer - dt).max(0.0);
        }

        // Parry reflection may have pushed health past a threshold
        self.check_phase_transition(ctx);
    }

    fn seek(&mut self, target: Vec2, dt: f32, arena: &Arena) {
        let speed = self.speed();
        let direction = (target - self.position).normalize_or_zero();
        if speed <= 0.0 || direction == Vec2::ZERO {
            return;
        }
        self.position = arena.clamp(self.position + direction * speed * dt, self.radius);
    }

    fn wants_attack(&self, distance: f32, dt: f32, ctx: &mut SimulationContext) -> bool {
        if distance < self.variant.trigger_distance {
            return true;
        }
        let chance = self.phase_tuning().ranged_attack_chance;
        chance > 0.0 && ctx.rng.random::<f32>() < chance * dt
    }

    /// Pick a pattern uniformly from the current phase's set and begin its windup.
    pub fn start_attack(&mut self, ctx: &mut SimulationContext) -> bool {
        let pattern_id = {
            let ids = &self.phase_tuning().pattern_ids;
            if ids.is_empty() {
                return false;
            }
            ids[ctx.rng.random_range(0..ids.len())]
        };
        let Some(pattern) = self.variant.pattern(pattern_id).cloned() else {
            return false;
        };

        let attack = AttackInstance::new(self.allocate_attack_id(), &pattern, 1.0);
        debug!(
            "Boss starts {} ({}), windup {:.2}s",
            pattern.name,
            pattern.kind.label(),
            pattern.windup
        );
        ctx.emit(CombatEvent::AttackStarted { pattern_id });
        self.current_attack = Some(attack);
        true
    }

    fn allocate_attack_id(&mut self) -> u32 {
        let id = self.next_attack_id;
        self.next_attack_id = self.next_attack_id.wrapping_add(1);
        id
    }

    fn advance_attacks(&mut self, dt: f32, player: &mut PlayerController, ctx: &mut SimulationContext) {
        if let Some(mut attack) = self.current_attack.take() {
            let step = attack.advance(dt);
            if step.execute {
                self.execute_attack(&attack, player, ctx);
            }
            if step.finished {
                self.finish_attack(&attack, ctx);
            } else {
                self.current_attack = Some(attack);
            }
        }

        if self.volley.is_empty() {
            return;
        }
        let mut volley = std::mem::take(&mut self.volley);
        volley.retain_mut(|attack| {
            let step = attack.advance(dt);
            if step.execute {
                self.execute_attack(attack, player, ctx);
            }
            if step.finished {
                self.finish_attack(attack, ctx);
            }
            !step.finished
        });
        self.volley = volley;
    }

    /// Resolve an attack once its windup has elapsed: a distance-gated hit
    /// for melee, hazard creation for everything else.
    pub fn execute_attack(
        &mut self,
        attack: &AttackInstance,
        player: &mut PlayerController,
        ctx: &mut SimulationContext,
    ) {
        let pattern = &attack.pattern;
        ctx.emit(CombatEvent::AttackExecuted {
            pattern_id: pattern.id,
        });

        match pattern.kind {
            PatternKind::Melee => {
                let distance = self.position.distance(player.position);
                if distance >= self.radius + player.radius + pattern.shape_radius {
                    return;
                }
                let parried = player.take_damage(pattern.damage, DamageKind::Strike, &mut ctx.events);
                if parried {
                    let reflected = pattern.damage * self.variant.parry_reflect_factor;
                    let applied = damage_boss(self, reflected, false, &mut ctx.events);
                    info!("Parried {}! Boss takes {:.1}", pattern.name, applied);
                    ctx.emit(CombatEvent::Parried { reflected: applied });
                }
            }
            _ => {
                let owner = HazardOwner {
                    attack_id: attack.id,
                    pattern_id: pattern.id,
                };
                let count = self.hazards.spawn(
                    owner,
                    pattern,
                    self.position,
                    player.position,
                    attack.active_time(),
                );
                debug!("{} spawned {} hazard(s)", pattern.name, count);
                ctx.emit(CombatEvent::HazardsSpawned {
                    pattern_id: pattern.id,
                    count,
                });
            }
        }
    }

    fn finish_attack(&mut self, attack: &AttackInstance, ctx: &mut SimulationContext) {
        self.hazards.clear_owner(attack.id);
        self.attacks_finished += 1;
        self.next_attack_timer = self.variant.recovery_grace;
        self.attack_timer = self.jittered_cooldown(ctx);
        ctx.emit(CombatEvent::AttackEnded {
            pattern_id: attack.pattern_id(),
        });
    }

    fn jittered_cooldown(&self, ctx: &mut SimulationContext) -> f32 {
        let base = self.base_cooldown();
        let jitter = self.variant.cooldown_jitter;
        if !jitter.is_finite() || jitter <= 0.0 {
            return base;
        }
        base * (1.0 + ctx.rng.random_range(-jitter..=jitter))
    }

    /// Enter whichever phase the current health fraction calls for. Phases
    /// only move forward here; the final phase is entered at most once.
    pub fn check_phase_transition(&mut self, ctx: &mut SimulationContext) {
        if self.health.is_dead() || self.in_final_phase() {
            return;
        }
        let fraction = self.health.percent();

        let final_due = self
            .variant
            .final_phase
            .as_ref()
            .is_some_and(|f| fraction <= f.tuning.health_threshold);
        if final_due && !self.final_phase_spent {
            self.enter_final_phase(ctx);
            return;
        }

        let target = self
            .variant
            .phases
            .iter()
            .filter(|p| fraction <= p.health_threshold)
            .map(|p| p.phase)
            .max();
        if let Some(target) = target.filter(|t| *t > self.phase) {
            let from = self.phase;
            self.phase = target;
            info!(
                "Boss enters phase {} at {:.0}/{:.0} health",
                target, self.health.current, self.health.max
            );
            ctx.emit(CombatEvent::PhaseChanged { from, to: target });
        }
    }

    /// Recenter, cancel the running attack and launch the volley.
    pub fn enter_final_phase(&mut self, ctx: &mut SimulationContext) {
        let Some(final_def) = self.variant.final_phase.clone() else {
            return;
        };
        let from = self.phase;
        let to = self.variant.final_phase_number();

        self.phase = to;
        self.final_phase_spent = true;
        self.final_phase_timer = final_def.duration;
        self.position = ctx.arena.center();
        self.cancel_attacks(ctx);
        self.next_attack_timer = 0.0;

        info!(
            "Boss enters final phase for {:.1}s at {:.0}/{:.0} health",
            final_def.duration, self.health.current, self.health.max
        );
        ctx.emit(CombatEvent::PhaseChanged { from, to });

        for pattern_id in &final_def.volley_pattern_ids {
            let Some(pattern) = self.variant.pattern(*pattern_id).cloned() else {
                continue;
            };
            let attack = AttackInstance::new(
                self.allocate_attack_id(),
                &pattern,
                final_def.volley_duration_scale,
            );
            ctx.emit(CombatEvent::AttackStarted {
                pattern_id: *pattern_id,
            });
            self.volley.push(attack);
        }
    }

    fn tick_final_phase(&mut self, dt: f32, ctx: &mut SimulationContext) {
        if !self.in_final_phase() {
            return;
        }
        self.final_phase_timer -= dt;
        if self.final_phase_timer <= 0.0 {
            self.revert_final_phase(ctx);
        }
    }

    /// Time ran out: fall back to the last regular phase and drop every
    /// final-phase attack.
    pub fn revert_final_phase(&mut self, ctx: &mut SimulationContext) {
        let from = self.phase;
        let to = self.variant.last_regular_phase();

        self.phase = to;
        self.final_phase_timer = 0.0;
        self.cancel_attacks(ctx);
        self.hazards.clear();
        self.next_attack_timer = self.variant.recovery_grace;
        self.attack_timer = self.jittered_cooldown(ctx);

        info!("Final phase expired, boss returns to phase {}", to);
        ctx.emit(CombatEvent::FinalPhaseExpired);
        ctx.emit(CombatEvent::PhaseChanged { from, to });
    }

    fn cancel_attacks(&mut self, ctx: &mut SimulationContext) {
        let cancelled = self.current_attack.take().into_iter().chain(self.volley.drain(..));
        for attack in cancelled.collect::<Vec<_>>() {
            self.hazards.clear_owner(attack.id);
            ctx.emit(CombatEvent::AttackEnded {
                pattern_id: attack.pattern_id(),
            });
        }
    }
}
