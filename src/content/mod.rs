//! Content domain: data-driven boss variants and combat tuning.

mod data;
mod loader;
mod registry;
mod validation;

#[cfg(test)]
mod tests;

pub use data::*;
pub use loader::{ContentLoadError, load_all_content, parse_ron};
pub use registry::{ContentRegistry, DEFAULT_BOSS_ID, LoadedDefaults};
pub use validation::{ValidationError, validate_boss, validate_content, validate_defaults};

use bevy::prelude::*;
use std::path::Path;

/// Directory holding bosses.ron and combat_defaults.ron
pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ContentRegistry::builtin())
            .init_resource::<LoadedDefaults>()
            .add_systems(Startup, load_content);
    }
}

/// Replace the built-in content with the RON files when they load and validate.
fn load_content(mut registry: ResMut<ContentRegistry>, mut defaults: ResMut<LoadedDefaults>) {
    let (loaded, loaded_defaults) = match load_all_content(Path::new(CONTENT_DIR)) {
        Ok(content) => content,
        Err(errors) => {
            for error in &errors {
                warn!("{}", error);
            }
            warn!("Falling back to built-in boss content");
            return;
        }
    };

    let mut problems = validate_content(&loaded);
    problems.extend(validate_defaults(&loaded_defaults));
    if !problems.is_empty() {
        for problem in &problems {
            warn!("Invalid content: {}", problem);
        }
        warn!("Falling back to built-in boss content");
        return;
    }

    info!("{}", loaded.summary());
    *registry = loaded;
    defaults.0 = loaded_defaults;
}
