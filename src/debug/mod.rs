//! Debug hotkeys for fast iteration on boss tuning.
//!
//! - F1: dump the current snapshot as JSON
//! - F2: restart the fight with a fresh seed
//! - F3: drop the boss to its next phase threshold
//! - Ctrl+I: toggle player invincibility

use bevy::prelude::*;

use crate::content::{ContentRegistry, LoadedDefaults};
use crate::core::{CombatSimulation, FightSetup, SimulationSet, build_fight};

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the player ignores all damage
    pub invincible: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                dump_snapshot,
                restart_fight,
                force_next_phase,
                toggle_invincibility,
                apply_invincibility,
            )
                .chain()
                .before(SimulationSet::Tick)
                .run_if(resource_exists::<CombatSimulation>),
        );
    }
}

fn dump_snapshot(keyboard: Res<ButtonInput<KeyCode>>, simulation: Res<CombatSimulation>) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }
    match serde_json::to_string_pretty(&simulation.snapshot()) {
        Ok(json) => info!("[DEBUG] Snapshot:\n{}", json),
        Err(error) => warn!("[DEBUG] Snapshot serialization failed: {}", error),
    }
}

fn restart_fight(
    keyboard: Res<ButtonInput<KeyCode>>,
    registry: Res<ContentRegistry>,
    defaults: Res<LoadedDefaults>,
    mut setup: ResMut<FightSetup>,
    mut simulation: ResMut<CombatSimulation>,
) {
    if !keyboard.just_pressed(KeyCode::F2) {
        return;
    }
    let seed = setup.reseed();
    *simulation = build_fight(&registry, &defaults, &setup);
    info!("[DEBUG] Fight restarted with seed {}", seed);
}

fn force_next_phase(keyboard: Res<ButtonInput<KeyCode>>, mut simulation: ResMut<CombatSimulation>) {
    if !keyboard.just_pressed(KeyCode::F3) {
        return;
    }
    let boss = simulation.boss_mut();
    match boss.next_phase_threshold() {
        Some(health) => {
            boss.health.set(health);
            info!("[DEBUG] Boss health set to {:.0}", health);
        }
        None => info!("[DEBUG] Boss has no phase left"),
    }
}

fn toggle_invincibility(keyboard: Res<ButtonInput<KeyCode>>, mut debug_state: ResMut<DebugState>) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    if ctrl && keyboard.just_pressed(KeyCode::KeyI) {
        debug_state.invincible = !debug_state.invincible;
        let msg = if debug_state.invincible {
            "Invincibility ON"
        } else {
            "Invincibility OFF"
        };
        info!("[DEBUG] {}", msg);
    }
}

fn apply_invincibility(debug_state: Res<DebugState>, mut simulation: ResMut<CombatSimulation>) {
    if debug_state.invincible {
        // Long enough to cover the next tick at any frame rate
        simulation.player_mut().invulnerable.grant(1.0);
    }
}
