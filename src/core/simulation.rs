//! Core domain: the per-tick orchestrator.

use bevy::prelude::*;

use crate::combat::BossController;
use crate::combat::stun::StunTransition;
use crate::content::{
    BossVariantDef, CombatDefaults, ContentRegistry, ValidationError, validate_boss,
    validate_defaults,
};
use crate::core::arena::Arena;
use crate::core::context::SimulationContext;
use crate::core::events::{CombatEvent, TerminalState};
use crate::core::input::InputIntents;
use crate::core::snapshot::{
    BossSnapshot, HazardView, PlayerSnapshot, SimulationSnapshot, SpellView, StunSnapshot,
};
use crate::player::{PlayerController, StatAllocation};

/// Why a fight could not be set up.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    UnknownBoss(String),
    InvalidContent(Vec<ValidationError>),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::UnknownBoss(id) => write!(f, "unknown boss variant '{}'", id),
            SetupError::InvalidContent(errors) => {
                write!(f, "{} content error(s)", errors.len())?;
                for error in errors {
                    write!(f, "; {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// One fight: player, boss and the shared context, advanced in a fixed
/// order every tick (player, boss, hazards, stagger, terminal check).
#[derive(Resource, Debug, Clone)]
pub struct CombatSimulation {
    ctx: SimulationContext,
    player: PlayerController,
    boss: BossController,
    terminal: Option<TerminalState>,
    elapsed: f32,
}

impl CombatSimulation {
    /// Stats are clamped to the allocation rules before anything is derived.
    pub fn new(
        variant: BossVariantDef,
        defaults: &CombatDefaults,
        stats: StatAllocation,
        seed: u64,
    ) -> Self {
        let arena = Arena::from(&variant.arena);
        let stats = stats.validated(&defaults.allocation);
        Self {
            ctx: SimulationContext::new(arena, seed, defaults),
            player: PlayerController::new(stats, defaults, arena.center()),
            boss: BossController::new(variant, &arena),
            terminal: None,
            elapsed: 0.0,
        }
    }

    /// Look up and validate a variant before starting the fight.
    pub fn from_registry(
        registry: &ContentRegistry,
        boss_id: &str,
        defaults: &CombatDefaults,
        stats: StatAllocation,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let variant = registry
            .boss(boss_id)
            .ok_or_else(|| SetupError::UnknownBoss(boss_id.to_string()))?;

        let mut problems = Vec::new();
        validate_boss(variant, &mut problems);
        problems.extend(validate_defaults(defaults));
        if !problems.is_empty() {
            return Err(SetupError::InvalidContent(problems));
        }

        Ok(Self::new(variant.clone(), defaults, stats, seed))
    }

    /// Advance the fight by `dt` seconds. Once a terminal state is reached
    /// further calls change nothing and keep returning it.
    pub fn tick(&mut self, dt: f32, intents: &InputIntents) -> Option<TerminalState> {
        if self.terminal.is_some() {
            return self.terminal;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;

        self.player.update(dt, intents, &mut self.boss, &mut self.ctx);
        self.boss.update(dt, &mut self.player, &mut self.ctx);

        let boss_center = self.boss.position;
        self.boss
            .hazards
            .update(dt, boss_center, &mut self.player, &mut self.ctx);

        match self.ctx.stun.update(dt) {
            Some(StunTransition::Started) => {
                info!("Boss staggered for {:.1}s", self.ctx.stun.remaining());
                self.ctx.emit(CombatEvent::StaggerStarted);
            }
            Some(StunTransition::Ended) => {
                debug!("Stagger window closed");
                self.ctx.emit(CombatEvent::StaggerEnded);
            }
            None => {}
        }

        self.terminal = if self.player.health.is_dead() {
            Some(TerminalState::Defeat)
        } else if self.boss.health.is_dead() {
            Some(TerminalState::Victory)
        } else {
            None
        };
        if let Some(result) = self.terminal {
            self.ctx.emit(CombatEvent::FightEnded(result));
        }
        self.terminal
    }

    /// Events collected since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.ctx.events)
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        let boss = &self.boss;
        let player = &self.player;
        let stun = &self.ctx.stun;

        SimulationSnapshot {
            elapsed: self.elapsed,
            seed: self.ctx.seed(),
            terminal: self.terminal,
            boss: BossSnapshot {
                position: boss.position.to_array(),
                radius: boss.radius,
                phase: boss.phase,
                health_fraction: boss.health.percent(),
                stage: boss.stage(),
                attack_pattern: boss.current_attack.as_ref().map(|a| a.pattern_id()),
                windup_progress: boss.windup_progress(),
                final_phase_remaining: boss.final_phase_timer.max(0.0),
                hazards: boss.hazards.iter().map(HazardView::from).collect(),
            },
            player: PlayerSnapshot {
                position: player.position.to_array(),
                radius: player.radius,
                facing: player.facing,
                health_fraction: player.health.percent(),
                invulnerable: player.invulnerable.is_invulnerable(),
                blocking: player.blocking,
                parry_open: player.parry.is_open(),
                rolling: player.rolling,
                spell: player.spell.as_ref().map(|s| SpellView {
                    position: s.position.to_array(),
                    radius: s.radius,
                }),
            },
            stun: StunSnapshot {
                fraction: stun.fraction(),
                active: stun.is_active(),
                remaining: stun.remaining(),
            },
        }
    }

    pub fn terminal(&self) -> Option<TerminalState> {
        self.terminal
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn boss(&self) -> &BossController {
        &self.boss
    }

    pub fn boss_mut(&mut self) -> &mut BossController {
        &mut self.boss
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SimulationContext {
        &mut self.ctx
    }

    /// Split borrow for callers driving a single component by hand.
    pub fn parts_mut(
        &mut self,
    ) -> (&mut PlayerController, &mut BossController, &mut SimulationContext) {
        (&mut self.player, &mut self.boss, &mut self.ctx)
    }
}
