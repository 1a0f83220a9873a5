//! Core domain: shared per-fight state handed to every component update.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::StunMeter;
use crate::content::CombatDefaults;
use crate::core::arena::Arena;
use crate::core::events::CombatEvent;

/// Arena bounds, the seeded RNG, the stagger meter and the event log.
///
/// Components never reach for global state; identical seeds and inputs
/// replay identical fights.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub arena: Arena,
    pub rng: ChaCha8Rng,
    pub stun: StunMeter,
    pub events: Vec<CombatEvent>,
    /// Scale on rate x dt for continuous hazard damage
    pub continuous_damage_scale: f32,
    /// Distance beyond the arena bound at which orbs are culled
    pub hazard_cull_margin: f32,
    seed: u64,
}

impl SimulationContext {
    pub fn new(arena: Arena, seed: u64, defaults: &CombatDefaults) -> Self {
        Self {
            arena,
            rng: ChaCha8Rng::seed_from_u64(seed),
            stun: StunMeter::new(&defaults.stun),
            events: Vec::new(),
            continuous_damage_scale: defaults.continuous_damage_scale,
            hazard_cull_margin: defaults.hazard_cull_margin,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }
}
