//! Core domain: fight configuration resources.

use bevy::prelude::*;
use rand::Rng;

use crate::content::DEFAULT_BOSS_ID;
use crate::player::StatAllocation;

/// What the next fight is started with.
#[derive(Resource, Debug, Clone)]
pub struct FightSetup {
    pub boss_id: String,
    pub stats: StatAllocation,
    pub seed: u64,
}

impl Default for FightSetup {
    fn default() -> Self {
        Self {
            boss_id: DEFAULT_BOSS_ID.to_string(),
            stats: StatAllocation::default(),
            seed: rand::rng().random(),
        }
    }
}

impl FightSetup {
    /// Pick a fresh random seed, returning it.
    pub fn reseed(&mut self) -> u64 {
        self.seed = rand::rng().random();
        self.seed
    }
}
