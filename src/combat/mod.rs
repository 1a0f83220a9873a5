//! Combat domain: boss behaviour, hazards, damage resolution and stagger.

pub mod ai;
pub mod attacks;
pub mod components;
pub mod damage;
pub mod events;
pub mod hazards;
pub mod stun;
mod systems;


pub use ai::BossController;
pub use attacks::{AttackInstance, AttackProgress, AttackStage};
pub use components::{Health, Invulnerable, ParryState};
pub use damage::{DamageKind, PlayerHit, boss_intake, damage_boss, damage_player, player_mitigation};
pub use events::{
    BossPhaseChangeEvent, FightEndedEvent, HealthChangedEvent, ParrySuccessEvent, StaggerEvent,
};
pub use hazards::{Hazard, HazardOwner, HazardShape, HazardSystem, beam_hits, circles_overlap};
pub use stun::{StunMeter, StunTransition};

use bevy::prelude::*;

use crate::combat::systems::publish_combat_events;
use crate::core::{CombatSimulation, SimulationSet};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<HealthChangedEvent>()
            .add_message::<BossPhaseChangeEvent>()
            .add_message::<ParrySuccessEvent>()
            .add_message::<StaggerEvent>()
            .add_message::<FightEndedEvent>()
            .add_systems(
                Update,
                publish_combat_events
                    .in_set(SimulationSet::Publish)
                    .run_if(resource_exists::<CombatSimulation>),
            );
    }
}
