//! Combat domain: transient hazards spawned by boss attacks.
//!
//! Each hazard kind has its own kinematics and its own damage rule. Orbs
//! and pulse hits are discrete strikes; beams, pulsation bands and spinning
//! orbs deal damage every tick the player overlaps them.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::combat::damage::{DamageKind, damage_player};
use crate::content::{AttackPatternDef, PatternKind};
use crate::core::SimulationContext;
use crate::player::PlayerController;

/// The attack instance a hazard belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardOwner {
    pub attack_id: u32,
    pub pattern_id: u32,
}

/// Projectile flying outward in a straight line; consumed on hit.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialOrb {
    pub position: Vec2,
    /// Unit direction of travel
    pub direction: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub damage: f32,
}

/// Static beam along a ray from `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineBeam {
    pub origin: Vec2,
    pub angle: f32,
    pub length: f32,
    pub width: f32,
    pub damage_per_second: f32,
    pub remaining: f32,
}

/// Several beams sharing an origin, rotating together.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiBeam {
    pub origin: Vec2,
    pub angles: Vec<f32>,
    pub angular_speed: f32,
    pub length: f32,
    pub width: f32,
    pub damage_per_second: f32,
    pub remaining: f32,
}

/// Ring expanding from the boss. Goes dormant once it passes `max_radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct PulsationRing {
    pub center: Vec2,
    pub radius: f32,
    pub expansion_speed: f32,
    pub max_radius: f32,
    pub band_width: f32,
    pub pulse_interval: f32,
    pub pulse_timer: f32,
    pub pulse_damage: f32,
    pub damage_per_second: f32,
    pub active: bool,
}

impl PulsationRing {
    /// Inner and outer edge of the damaging band.
    pub fn band(&self) -> (f32, f32) {
        let half = self.band_width * 0.5;
        ((self.radius - half).max(0.0), self.radius + half)
    }
}

/// Orbs on a circle around the boss.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinningOrbRing {
    pub center: Vec2,
    pub orbit_radius: f32,
    pub orb_radius: f32,
    pub orbs: u32,
    pub angle: f32,
    pub angular_speed: f32,
    /// Dealt again on every tick an orb overlaps the player
    pub contact_damage: f32,
    pub remaining: f32,
}

impl SpinningOrbRing {
    pub fn orb_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        let count = self.orbs.max(1);
        (0..self.orbs).map(move |i| {
            let angle = self.angle + TAU * i as f32 / count as f32;
            self.center + Vec2::from_angle(angle) * self.orbit_radius
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HazardShape {
    RadialOrb(RadialOrb),
    LineBeam(LineBeam),
    MultiBeam(MultiBeam),
    PulsationRing(PulsationRing),
    SpinningOrbRing(SpinningOrbRing),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub owner: HazardOwner,
    pub shape: HazardShape,
}

/// Circle-circle overlap; touching exactly at the boundary is not a hit.
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Whether a body at `point` overlaps the beam ray starting at `origin`.
pub fn beam_hits(
    origin: Vec2,
    angle: f32,
    length: f32,
    half_width: f32,
    point: Vec2,
    body_radius: f32,
) -> bool {
    let direction = Vec2::from_angle(angle);
    let offset = point - origin;
    let along = offset.dot(direction);
    if along < 0.0 || along > length {
        return false;
    }
    direction.perp_dot(offset).abs() <= half_width + body_radius
}

/// Angle from `origin` toward `target`, 0 when they coincide.
fn aim_angle(origin: Vec2, target: Vec2) -> f32 {
    let offset = target - origin;
    if offset == Vec2::ZERO {
        0.0
    } else {
        offset.y.atan2(offset.x)
    }
}

/// Every live hazard, owned by the boss that spawned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardSystem {
    hazards: Vec<Hazard>,
}

impl HazardSystem {
    /// Create the hazards for one executed attack. Melee patterns spawn nothing.
    /// `active_time` is how long beams and rings persist.
    pub fn spawn(
        &mut self,
        owner: HazardOwner,
        pattern: &AttackPatternDef,
        origin: Vec2,
        target: Vec2,
        active_time: f32,
    ) -> usize {
        let aim = aim_angle(origin, target);
        let before = self.hazards.len();

        match pattern.kind {
            PatternKind::Melee => {}
            PatternKind::OrbBurst {
                count,
                speed,
                orb_radius,
            } => {
                for i in 0..count {
                    let angle = aim + TAU * i as f32 / count as f32;
                    self.push(
                        owner,
                        HazardShape::RadialOrb(RadialOrb {
                            position: origin,
                            direction: Vec2::from_angle(angle),
                            speed,
                            radius: orb_radius,
                            damage: pattern.damage,
                        }),
                    );
                }
            }
            PatternKind::Pulsation {
                expansion_speed,
                max_radius,
                band_width,
                pulse_interval,
                pulse_damage,
            } => self.push(
                owner,
                HazardShape::PulsationRing(PulsationRing {
                    center: origin,
                    radius: 0.0,
                    expansion_speed,
                    max_radius,
                    band_width,
                    pulse_interval,
                    pulse_timer: 0.0,
                    pulse_damage,
                    damage_per_second: pattern.damage,
                    active: true,
                }),
            ),
            PatternKind::LineBeam { length, width } => self.push(
                owner,
                HazardShape::LineBeam(LineBeam {
                    origin,
                    angle: aim,
                    length,
                    width,
                    damage_per_second: pattern.damage,
                    remaining: active_time,
                }),
            ),
            PatternKind::MultiBeam {
                beams,
                length,
                width,
                angular_speed,
            } => {
                let angles = (0..beams)
                    .map(|i| aim + TAU * i as f32 / beams as f32)
                    .collect();
                self.push(
                    owner,
                    HazardShape::MultiBeam(MultiBeam {
                        origin,
                        angles,
                        angular_speed,
                        length,
                        width,
                        damage_per_second: pattern.damage,
                        remaining: active_time,
                    }),
                );
            }
            PatternKind::SpinningRing {
                orbs,
                orbit_radius,
                orb_radius,
                angular_speed,
            } => self.push(
                owner,
                HazardShape::SpinningOrbRing(SpinningOrbRing {
                    center: origin,
                    orbit_radius,
                    orb_radius,
                    orbs,
                    angle: aim,
                    angular_speed,
                    contact_damage: pattern.damage,
                    remaining: active_time,
                }),
            ),
        }

        self.hazards.len() - before
    }

    pub fn push(&mut self, owner: HazardOwner, shape: HazardShape) {
        self.hazards.push(Hazard { owner, shape });
    }

    /// Remove every hazard spawned by the given attack instance.
    pub fn clear_owner(&mut self, attack_id: u32) {
        self.hazards.retain(|h| h.owner.attack_id != attack_id);
    }

    pub fn clear(&mut self) {
        self.hazards.clear();
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.iter()
    }

    /// Advance every hazard and resolve its collision against the player.
    pub fn update(
        &mut self,
        dt: f32,
        boss_center: Vec2,
        player: &mut PlayerController,
        ctx: &mut SimulationContext,
    ) {
        let arena = ctx.arena;
        let margin = ctx.hazard_cull_margin;
        let scale = ctx.continuous_damage_scale;
        let events = &mut ctx.events;
        let player_pos = player.position;
        let player_radius = player.radius;

        self.hazards.retain_mut(|hazard| match &mut hazard.shape {
            HazardShape::RadialOrb(orb) => {
                orb.position += orb.direction * orb.speed * dt;
                if circles_overlap(orb.position, orb.radius, player_pos, player_radius)
                    && !player.invulnerable.is_invulnerable()
                {
                    damage_player(player, orb.damage, DamageKind::Strike, events);
                    return false;
                }
                arena.within_margin(orb.position, margin)
            }
            HazardShape::LineBeam(beam) => {
                beam.remaining -= dt;
                if beam_hits(
                    beam.origin,
                    beam.angle,
                    beam.length,
                    beam.width * 0.5,
                    player_pos,
                    player_radius,
                ) {
                    let amount = beam.damage_per_second * dt * scale;
                    damage_player(player, amount, DamageKind::Continuous, events);
                }
                beam.remaining > 0.0
            }
            HazardShape::MultiBeam(beams) => {
                beams.remaining -= dt;
                let amount = beams.damage_per_second * dt * scale;
                for angle in &mut beams.angles {
                    *angle = (*angle + beams.angular_speed * dt).rem_euclid(TAU);
                    if beam_hits(
                        beams.origin,
                        *angle,
                        beams.length,
                        beams.width * 0.5,
                        player_pos,
                        player_radius,
                    ) {
                        damage_player(player, amount, DamageKind::Continuous, events);
                    }
                }
                beams.remaining > 0.0
            }
            HazardShape::PulsationRing(ring) => {
                if !ring.active {
                    return true;
                }
                ring.center = boss_center;
                ring.radius += ring.expansion_speed * dt;
                if ring.radius > ring.max_radius {
                    ring.radius = 0.0;
                    ring.pulse_timer = 0.0;
                    ring.active = false;
                    return true;
                }

                let distance = player_pos.distance(ring.center);
                ring.pulse_timer += dt;
                if ring.pulse_timer >= ring.pulse_interval {
                    ring.pulse_timer -= ring.pulse_interval;
                    if distance <= ring.radius + player_radius {
                        damage_player(player, ring.pulse_damage, DamageKind::Strike, events);
                    }
                }

                let (inner, outer) = ring.band();
                if distance > inner && distance < outer {
                    let amount = ring.damage_per_second * dt * scale;
                    damage_player(player, amount, DamageKind::Continuous, events);
                }
                true
            }
            HazardShape::SpinningOrbRing(ring) => {
                ring.center = boss_center;
                ring.angle = (ring.angle + ring.angular_speed * dt).rem_euclid(TAU);
                ring.remaining -= dt;
                let contacts = ring
                    .orb_positions()
                    .filter(|orb| circles_overlap(*orb, ring.orb_radius, player_pos, player_radius))
                    .count();
                for _ in 0..contacts {
                    damage_player(player, ring.contact_damage, DamageKind::Continuous, events);
                }
                ring.remaining > 0.0
            }
        });
    }
}
