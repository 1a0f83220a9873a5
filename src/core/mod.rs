//! Core domain: the deterministic fight engine and its Bevy wiring.

mod arena;
mod context;
mod events;
mod input;
mod resources;
mod simulation;
mod snapshot;

#[cfg(test)]
mod tests;

pub use arena::Arena;
pub use context::SimulationContext;
pub use events::{CombatEvent, Target, TerminalState};
pub use input::InputIntents;
pub use resources::FightSetup;
pub use simulation::{CombatSimulation, SetupError};
pub use snapshot::{
    BossSnapshot, HazardView, PlayerSnapshot, SimulationSnapshot, SpellView, StunSnapshot,
};

use bevy::prelude::*;

use crate::content::{BossVariantDef, ContentRegistry, LoadedDefaults};

/// Per-frame ordering: read devices, advance the engine, publish events.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Tick,
    Publish,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FightSetup>()
            .init_resource::<InputIntents>()
            .configure_sets(
                Update,
                (
                    SimulationSet::Input,
                    SimulationSet::Tick,
                    SimulationSet::Publish,
                )
                    .chain(),
            )
            .add_systems(Startup, setup_camera)
            // Content is loaded during Startup
            .add_systems(PostStartup, start_fight)
            .add_systems(
                Update,
                tick_simulation
                    .in_set(SimulationSet::Tick)
                    .run_if(resource_exists::<CombatSimulation>),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Build the fight described by `setup`, falling back to the built-in
/// reference boss when the configured one is missing or invalid.
pub fn build_fight(
    registry: &ContentRegistry,
    defaults: &LoadedDefaults,
    setup: &FightSetup,
) -> CombatSimulation {
    match CombatSimulation::from_registry(
        registry,
        &setup.boss_id,
        &defaults.0,
        setup.stats,
        setup.seed,
    ) {
        Ok(simulation) => simulation,
        Err(error) => {
            warn!("Cannot start fight against '{}': {}", setup.boss_id, error);
            CombatSimulation::new(
                BossVariantDef::warden(),
                &Default::default(),
                setup.stats,
                setup.seed,
            )
        }
    }
}

fn start_fight(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    defaults: Res<LoadedDefaults>,
    setup: Res<FightSetup>,
) {
    let simulation = build_fight(&registry, &defaults, &setup);
    info!(
        "Fight started: {} (seed {})",
        simulation.boss().variant.name,
        setup.seed
    );
    commands.insert_resource(simulation);
}

fn tick_simulation(
    time: Res<Time>,
    intents: Res<InputIntents>,
    mut simulation: ResMut<CombatSimulation>,
) {
    simulation.tick(time.delta_secs(), &intents);
}
