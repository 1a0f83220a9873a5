//! Core domain: the input-intent snapshot consumed once per tick.

use bevy::prelude::*;

/// Device-independent player intent for one tick.
///
/// Movement axes use screen orientation (+x right, +y down). Flags report
/// whether the control is held; edge detection happens in the engine.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntents {
    pub move_x: f32,
    pub move_y: f32,
    /// Melee attack
    pub primary_action: bool,
    /// Block (and parry on press)
    pub secondary_action: bool,
    /// Spell cast key
    pub ability_key_pressed: bool,
    /// Roll/dodge key
    pub dodge_pressed: bool,
    pub cursor_x: f32,
    pub cursor_y: f32,
}

impl InputIntents {
    pub fn axis(&self) -> Vec2 {
        Vec2::new(self.move_x, self.move_y)
    }

    pub fn cursor(&self) -> Vec2 {
        Vec2::new(self.cursor_x, self.cursor_y)
    }

    /// Intent with only movement set, handy for scripted input.
    pub fn moving(move_x: f32, move_y: f32) -> Self {
        Self {
            move_x,
            move_y,
            ..Default::default()
        }
    }
}
