//! Player domain: movement, roll, block/parry, melee and spell state machine.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::combat::components::{Health, Invulnerable, ParryState};
use crate::combat::damage::{DamageKind, damage_player, player_strikes_boss};
use crate::combat::hazards::circles_overlap;
use crate::combat::BossController;
use crate::content::{CombatDefaults, PlayerTuningDef};
use crate::core::{Arena, CombatEvent, InputIntents, SimulationContext};
use crate::player::stats::{DerivedStats, StatAllocation};

/// The player's single in-flight spell.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellProjectile {
    pub position: Vec2,
    /// Unit direction toward the cursor at cast time
    pub direction: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub damage: f32,
    pub remaining: f32,
}

#[derive(Debug, Clone)]
pub struct PlayerController {
    pub position: Vec2,
    pub radius: f32,
    pub stats: StatAllocation,
    pub derived: DerivedStats,
    pub tuning: PlayerTuningDef,
    pub health: Health,
    pub invulnerable: Invulnerable,
    pub rolling: bool,
    /// Remaining locked-direction time of the current roll
    pub roll_timer: f32,
    pub roll_cooldown_timer: f32,
    pub roll_direction: Vec2,
    pub blocking: bool,
    pub parry: ParryState,
    pub attack_timer: f32,
    pub spell_cooldown: f32,
    pub spell: Option<SpellProjectile>,
    /// Sprite rotation: angle toward the boss plus a quarter turn
    pub facing: f32,
    ability_was_pressed: bool,
}

impl PlayerController {
    /// `stats` must already be validated against the allocation rules.
    pub fn new(stats: StatAllocation, defaults: &CombatDefaults, position: Vec2) -> Self {
        let tuning = defaults.player.clone();
        let derived = DerivedStats::from_stats(&stats, &defaults.formulas, &tuning);
        Self {
            position,
            radius: tuning.radius,
            stats,
            derived,
            health: Health::new(derived.max_health),
            invulnerable: Invulnerable::default(),
            rolling: false,
            roll_timer: 0.0,
            roll_cooldown_timer: 0.0,
            roll_direction: Vec2::ZERO,
            blocking: false,
            parry: ParryState::new(tuning.parry_window, tuning.parry_cooldown),
            attack_timer: 0.0,
            spell_cooldown: 0.0,
            spell: None,
            facing: 0.0,
            ability_was_pressed: false,
            tuning,
        }
    }

    /// Walking speed after the block penalty.
    pub fn current_speed(&self) -> f32 {
        if self.blocking {
            self.derived.move_speed * self.tuning.block_speed_factor
        } else {
            self.derived.move_speed
        }
    }

    /// Apply incoming damage through the resolver. Returns whether the hit was parried.
    pub fn take_damage(&mut self, amount: f32, kind: DamageKind, events: &mut Vec<CombatEvent>) -> bool {
        damage_player(self, amount, kind, events).parried
    }

    pub fn update(
        &mut self,
        dt: f32,
        intents: &InputIntents,
        boss: &mut BossController,
        ctx: &mut SimulationContext,
    ) {
        self.tick_timers(dt);
        self.update_spell(dt, boss, ctx);

        let was_blocking = self.blocking;
        self.blocking = intents.secondary_action;
        if self.blocking && !was_blocking && self.tuning.parry_enabled {
            self.parry.open();
        }

        self.update_movement(dt, intents, &ctx.arena, &mut ctx.events);
        self.separate_from(boss);
        // The wall wins over the boss when the two disagree
        self.position = ctx.arena.clamp(self.position, self.radius);

        let to_boss = boss.position - self.position;
        if to_boss != Vec2::ZERO {
            self.facing = to_boss.y.atan2(to_boss.x) + FRAC_PI_2;
        }

        if intents.primary_action && self.attack_timer <= 0.0 && !self.rolling && !self.blocking {
            self.melee(boss, ctx);
        }

        let ability_edge = intents.ability_key_pressed && !self.ability_was_pressed;
        self.ability_was_pressed = intents.ability_key_pressed;
        if ability_edge && self.spell_cooldown <= 0.0 && !self.rolling {
            self.cast_spell(intents.cursor(), ctx);
        }
    }

    fn tick_timers(&mut self, dt: f32) {
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.roll_cooldown_timer = (self.roll_cooldown_timer - dt).max(0.0);
        self.spell_cooldown = (self.spell_cooldown - dt).max(0.0);
        self.invulnerable.tick(dt);
        self.parry.tick(dt);
    }

    fn update_spell(&mut self, dt: f32, boss: &mut BossController, ctx: &mut SimulationContext) {
        let Some(spell) = self.spell.as_mut() else {
            return;
        };
        spell.remaining -= dt;
        spell.position += spell.direction * spell.speed * dt;

        if circles_overlap(spell.position, spell.radius, boss.position, boss.radius) {
            let damage = spell.damage;
            self.spell = None;
            let applied = player_strikes_boss(boss, damage, self.tuning.spell_stun_fraction, ctx);
            debug!("Spell hit the boss for {:.1}", applied);
            ctx.emit(CombatEvent::SpellHit { damage: applied });
        } else if spell.remaining <= 0.0 {
            self.spell = None;
        }
    }

    fn update_movement(
        &mut self,
        dt: f32,
        intents: &InputIntents,
        arena: &Arena,
        events: &mut Vec<CombatEvent>,
    ) {
        let axis = intents.axis();
        let direction = if axis.length_squared() > 1.0 {
            axis.normalize()
        } else {
            axis
        };

        if !self.rolling
            && intents.dodge_pressed
            && self.roll_cooldown_timer <= 0.0
            && direction != Vec2::ZERO
        {
            self.rolling = true;
            self.roll_timer = self.tuning.roll_duration;
            self.roll_cooldown_timer = self.derived.roll_cooldown;
            self.roll_direction = direction.normalize_or_zero();
            self.invulnerable.grant(self.tuning.roll_iframes);
            events.push(CombatEvent::RollStarted);
        }

        let velocity = if self.rolling {
            self.roll_timer -= dt;
            let velocity = self.roll_direction * self.tuning.roll_speed;
            if self.roll_timer <= 0.0 {
                self.rolling = false;
                self.roll_timer = 0.0;
            }
            velocity
        } else {
            direction * self.current_speed()
        };

        self.position = arena.clamp(self.position + velocity * dt, self.radius);
    }

    /// Push the player out of the boss along the boss -> player axis.
    fn separate_from(&mut self, boss: &BossController) {
        let offset = self.position - boss.position;
        let min_distance = self.radius + boss.radius;
        let distance = offset.length();
        if distance < min_distance && distance > 0.0 {
            self.position = boss.position + offset / distance * min_distance;
        }
    }

    fn melee(&mut self, boss: &mut BossController, ctx: &mut SimulationContext) {
        self.attack_timer = self.derived.attack_cooldown;
        let reach = self.radius + boss.radius + self.tuning.melee_reach;
        if self.position.distance(boss.position) >= reach {
            return;
        }
        let applied = player_strikes_boss(
            boss,
            self.derived.attack_damage,
            self.tuning.melee_stun_fraction,
            ctx,
        );
        debug!("Player melee hit for {:.1}", applied);
    }

    /// Fire toward the cursor. The cooldown starts even when the cursor sits
    /// on the player and nothing is cast.
    fn cast_spell(&mut self, cursor: Vec2, ctx: &mut SimulationContext) {
        self.spell_cooldown = self.tuning.spell_cooldown;
        let direction = (cursor - self.position).normalize_or_zero();
        if direction == Vec2::ZERO {
            return;
        }
        self.spell = Some(SpellProjectile {
            position: self.position,
            direction,
            speed: self.tuning.spell_speed,
            radius: self.tuning.spell_radius,
            damage: self.derived.spell_damage,
            remaining: self.tuning.spell_lifetime,
        });
        debug!("Spell cast toward ({:.0}, {:.0})", cursor.x, cursor.y);
        ctx.emit(CombatEvent::SpellCast);
    }
}
