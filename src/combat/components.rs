//! Combat domain: health, invulnerability and parry state shared by both sides.

/// Health pool, never below zero or above max.
#[derive(Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    /// Subtract damage, saturating at zero. Returns the amount actually removed.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    /// Overwrite the current value, clamped to [0, max].
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }
}

/// Invulnerability frames - the holder ignores all incoming damage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invulnerable {
    pub timer: f32,
}

impl Invulnerable {
    /// Extend the window to at least `duration` seconds.
    pub fn grant(&mut self, duration: f32) {
        self.timer = self.timer.max(duration);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer = (self.timer - dt).max(0.0);
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.timer > 0.0
    }
}

/// Parry timing window opened by pressing block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParryState {
    pub window_timer: f32,
    pub cooldown_timer: f32,
    pub window_duration: f32,
    pub cooldown_duration: f32,
}

impl ParryState {
    pub fn new(window_duration: f32, cooldown_duration: f32) -> Self {
        Self {
            window_timer: 0.0,
            cooldown_timer: 0.0,
            window_duration,
            cooldown_duration,
        }
    }

    /// Open the window unless a previous attempt is still cooling down.
    /// Returns whether the window opened.
    pub fn open(&mut self) -> bool {
        if self.cooldown_timer > 0.0 || self.is_open() {
            return false;
        }
        self.window_timer = self.window_duration;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if self.window_timer > 0.0 {
            self.window_timer -= dt;
            if self.window_timer <= 0.0 {
                self.window_timer = 0.0;
                self.cooldown_timer = self.cooldown_duration;
            }
        } else if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
        }
    }

    pub fn is_open(&self) -> bool {
        self.window_timer > 0.0
    }
}
