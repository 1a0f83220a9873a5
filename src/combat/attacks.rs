//! Combat domain: live attack instances and their progression.

use serde::Serialize;

use crate::content::AttackPatternDef;

/// Observable stage of a boss attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AttackStage {
    #[default]
    Idle,
    /// Telegraph only, no damage yet
    Windup,
    /// Damage applied or hazards spawned, attack still running
    Executed,
    /// Grace period after an attack ended
    Recovering,
}

/// What happened to an attack during one advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackProgress {
    /// Progress crossed the windup this tick; fires at most once per instance
    pub execute: bool,
    pub finished: bool,
}

/// One running attack, built from a row of the pattern table.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackInstance {
    /// Unique per fight; hazards spawned by this attack carry it
    pub id: u32,
    pub pattern: AttackPatternDef,
    pub progress: f32,
    pub duration: f32,
    pub executed: bool,
}

impl AttackInstance {
    /// Start an attack. `duration_scale` stretches the active part of the
    /// attack; the windup is never stretched.
    pub fn new(id: u32, pattern: &AttackPatternDef, duration_scale: f32) -> Self {
        let windup = pattern.windup;
        let duration = windup + (pattern.duration - windup).max(0.0) * duration_scale.max(0.0);
        Self {
            id,
            pattern: pattern.clone(),
            progress: 0.0,
            duration,
            executed: false,
        }
    }

    pub fn pattern_id(&self) -> u32 {
        self.pattern.id
    }

    pub fn advance(&mut self, dt: f32) -> AttackProgress {
        self.progress += dt;
        let mut step = AttackProgress::default();
        if !self.executed && self.progress >= self.pattern.windup {
            self.executed = true;
            step.execute = true;
        }
        step.finished = self.progress >= self.duration;
        step
    }

    /// Telegraph progress in [0, 1], 1 once the windup has elapsed.
    pub fn windup_fraction(&self) -> f32 {
        if self.pattern.windup <= 0.0 {
            return 1.0;
        }
        (self.progress / self.pattern.windup).clamp(0.0, 1.0)
    }

    /// Time the attack stays active after executing.
    pub fn active_time(&self) -> f32 {
        (self.duration - self.pattern.windup).max(0.0)
    }

    pub fn stage(&self) -> AttackStage {
        if self.executed {
            AttackStage::Executed
        } else {
            AttackStage::Windup
        }
    }
}
