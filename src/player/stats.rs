//! Player domain: base stat allocation and the attributes derived from it.

use serde::{Deserialize, Serialize};

use crate::content::{AllocationRulesDef, PlayerTuningDef, StatFormulaDef};

/// The five base stats, fixed when the fight starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatAllocation {
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
    pub dexterity: i32,
    pub intelligence: i32,
}

impl Default for StatAllocation {
    /// Bonus points spread evenly: 5 in every stat.
    fn default() -> Self {
        Self::uniform(5)
    }
}

impl StatAllocation {
    pub fn new(strength: i32, agility: i32, vitality: i32, dexterity: i32, intelligence: i32) -> Self {
        Self {
            strength,
            agility,
            vitality,
            dexterity,
            intelligence,
        }
    }

    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value, value)
    }

    fn values_mut(&mut self) -> [&mut i32; 5] {
        [
            &mut self.strength,
            &mut self.agility,
            &mut self.vitality,
            &mut self.dexterity,
            &mut self.intelligence,
        ]
    }

    pub fn values(&self) -> [i32; 5] {
        [
            self.strength,
            self.agility,
            self.vitality,
            self.dexterity,
            self.intelligence,
        ]
    }

    /// Points spent above the per-stat minimum.
    pub fn bonus_points_used(&self, rules: &AllocationRulesDef) -> i32 {
        self.values().iter().map(|v| v - rules.min_stat).sum()
    }

    pub fn is_valid(&self, rules: &AllocationRulesDef) -> bool {
        self.values()
            .iter()
            .all(|v| (rules.min_stat..=rules.max_stat).contains(v))
            && self.bonus_points_used(rules) <= rules.bonus_points
    }

    /// Clamp every stat to its bounds, then trim any points over budget
    /// starting from the first stat, the way the allocation form does.
    pub fn validated(mut self, rules: &AllocationRulesDef) -> Self {
        let min = rules.min_stat;
        let max = rules.max_stat.max(min);
        for value in self.values_mut() {
            *value = (*value).clamp(min, max);
        }

        let mut excess = self.bonus_points_used(rules) - rules.bonus_points.max(0);
        for value in self.values_mut() {
            if excess <= 0 {
                break;
            }
            let cut = (*value - min).min(excess);
            *value -= cut;
            excess -= cut;
        }
        self
    }
}

/// Attributes computed once from the stats. Never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedStats {
    pub max_health: f32,
    pub attack_damage: f32,
    pub attack_cooldown: f32,
    pub roll_cooldown: f32,
    pub spell_damage: f32,
    pub move_speed: f32,
}

impl DerivedStats {
    pub fn from_stats(
        stats: &StatAllocation,
        formulas: &StatFormulaDef,
        tuning: &PlayerTuningDef,
    ) -> Self {
        let strength = stats.strength as f32;
        let agility = stats.agility as f32;
        let vitality = stats.vitality as f32;
        let dexterity = stats.dexterity as f32;
        let intelligence = stats.intelligence as f32;

        Self {
            max_health: formulas.base_health + formulas.health_per_vitality * vitality,
            attack_damage: formulas.base_attack_damage + formulas.attack_damage_per_strength * strength,
            attack_cooldown: (formulas.base_attack_cooldown
                - formulas.attack_cooldown_per_dexterity * dexterity)
                .max(formulas.min_attack_cooldown),
            // The cooldown never ends before the roll itself does
            roll_cooldown: (formulas.base_roll_cooldown - formulas.roll_cooldown_per_agility * agility)
                .max(tuning.roll_duration),
            spell_damage: formulas.base_spell_damage
                + formulas.spell_damage_per_intelligence * intelligence,
            move_speed: tuning.base_speed * (1.0 + tuning.agility_speed_bonus * agility),
        }
    }
}
