use bevy::prelude::*;

use boss_arena::BossArenaPlugins;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Boss Arena".to_string(),
                resolution: (800, 600).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(BossArenaPlugins)
        .run();
}
