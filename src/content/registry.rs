//! ContentRegistry resource providing HashMap lookups for loaded boss variants.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Default boss fought when no other variant is requested.
pub const DEFAULT_BOSS_ID: &str = "boss_warden";

/// Central registry for all loaded boss variants.
#[derive(Resource, Default, Debug, Clone)]
pub struct ContentRegistry {
    pub bosses: HashMap<String, BossVariantDef>,
}

impl ContentRegistry {
    /// Registry holding the variants compiled into the binary.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.insert(BossVariantDef::warden());
        registry.insert(BossVariantDef::colossus());
        registry
    }

    pub fn insert(&mut self, boss: BossVariantDef) {
        self.bosses.insert(boss.id.clone(), boss);
    }

    pub fn boss(&self, id: &str) -> Option<&BossVariantDef> {
        self.bosses.get(id)
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        let mut ids: Vec<&str> = self.bosses.keys().map(String::as_str).collect();
        ids.sort_unstable();
        format!(
            "ContentRegistry loaded:\n - Bosses: {} ({})\n - Attack patterns: {}",
            self.bosses.len(),
            ids.join(", "),
            self.bosses.values().map(|b| b.patterns.len()).sum::<usize>(),
        )
    }
}

/// Resource wrapper for the variant-independent tuning.
#[derive(Resource, Debug, Clone, Default)]
pub struct LoadedDefaults(pub CombatDefaults);
