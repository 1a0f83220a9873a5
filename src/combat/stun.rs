//! Combat domain: the boss stagger meter.

use crate::content::StunTuningDef;

/// Change of the stagger window reported by [`StunMeter::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StunTransition {
    Started,
    Ended,
}

/// Stagger meter filled by player damage.
///
/// Contributions are collected during the tick and folded in by `update`,
/// which runs after every other component. Reaching the threshold opens an
/// amplification window; when it closes the meter drops back to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StunMeter {
    pub value: f32,
    pub active: bool,
    pub timer: f32,
    pending: f32,
    threshold: f32,
    duration: f32,
    damage_multiplier: f32,
}

impl StunMeter {
    pub fn new(tuning: &StunTuningDef) -> Self {
        Self {
            value: 0.0,
            active: false,
            timer: 0.0,
            pending: 0.0,
            threshold: tuning.threshold.max(f32::EPSILON),
            duration: tuning.duration,
            damage_multiplier: tuning.damage_multiplier,
        }
    }

    /// Queue stagger build-up for the end of the tick.
    pub fn contribute(&mut self, amount: f32) {
        if amount > 0.0 {
            self.pending += amount;
        }
    }

    pub fn update(&mut self, dt: f32) -> Option<StunTransition> {
        let pending = std::mem::take(&mut self.pending);

        if self.active {
            // Build-up during the window is discarded
            self.timer -= dt;
            if self.timer <= 0.0 {
                self.active = false;
                self.timer = 0.0;
                self.value = 0.0;
                return Some(StunTransition::Ended);
            }
            return None;
        }

        self.value = (self.value + pending).min(self.threshold);
        if self.value >= self.threshold {
            self.active = true;
            self.timer = self.duration;
            return Some(StunTransition::Started);
        }
        None
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Amplification applied to player damage, 1.0 outside the window.
    pub fn outgoing_multiplier(&self) -> f32 {
        if self.active {
            self.damage_multiplier
        } else {
            1.0
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn fraction(&self) -> f32 {
        (self.value / self.threshold).clamp(0.0, 1.0)
    }

    pub fn remaining(&self) -> f32 {
        if self.active { self.timer } else { 0.0 }
    }

    pub fn pending(&self) -> f32 {
        self.pending
    }

    /// Force the meter to a value, clamped to [0, threshold].
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.threshold);
    }
}
