//! Real-time boss fight engine: a deterministic, seedable combat simulation
//! with a thin Bevy plugin layer on top.

pub mod combat;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod player;

use bevy::prelude::*;

/// Every gameplay plugin in dependency order.
pub struct BossArenaPlugins;

impl Plugin for BossArenaPlugins {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            player::PlayerPlugin,
            combat::CombatPlugin,
        ));

        #[cfg(feature = "dev-tools")]
        app.add_plugins(debug::DebugPlugin);
    }
}
