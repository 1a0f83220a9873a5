//! Player domain: stats, the player controller and keyboard/mouse input.

mod controller;
mod stats;


pub use controller::{PlayerController, SpellProjectile};
pub use stats::{DerivedStats, StatAllocation};

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::{InputIntents, SimulationSet};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, read_input_intents.in_set(SimulationSet::Input));
    }
}

/// Reduce raw devices to the intent snapshot the engine consumes.
pub(crate) fn read_input_intents(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut intents: ResMut<InputIntents>,
) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Screen coordinates: +y points down
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y += 1.0;
    }

    intents.move_x = x;
    intents.move_y = y;
    intents.primary_action = mouse.pressed(MouseButton::Left);
    intents.secondary_action = mouse.pressed(MouseButton::Right);
    intents.ability_key_pressed = keyboard.pressed(KeyCode::KeyQ);
    intents.dodge_pressed = keyboard.pressed(KeyCode::Space)
        || keyboard.pressed(KeyCode::ShiftLeft)
        || keyboard.pressed(KeyCode::ShiftRight);

    // Keep the last known cursor when it leaves the window
    if let Some(cursor) = windows.iter().next().and_then(Window::cursor_position) {
        intents.cursor_x = cursor.x;
        intents.cursor_y = cursor.y;
    }
}
