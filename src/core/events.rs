//! Core domain: engine-level combat events collected during a tick.

use serde::Serialize;

/// Which side of the fight an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Target {
    Player,
    Boss,
}

/// Outcome of a finished fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TerminalState {
    Victory,
    Defeat,
}

/// Everything observable that happened during a tick, in order.
///
/// Drained by the host after each tick; `HealthChanged` is the hook for
/// health-bar displays and fires after every applied damage instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CombatEvent {
    HealthChanged {
        target: Target,
        current: f32,
        max: f32,
    },
    AttackStarted {
        pattern_id: u32,
    },
    AttackExecuted {
        pattern_id: u32,
    },
    AttackEnded {
        pattern_id: u32,
    },
    HazardsSpawned {
        pattern_id: u32,
        count: usize,
    },
    PhaseChanged {
        from: u8,
        to: u8,
    },
    FinalPhaseExpired,
    Parried {
        reflected: f32,
    },
    StaggerStarted,
    StaggerEnded,
    RollStarted,
    SpellCast,
    SpellHit {
        damage: f32,
    },
    FightEnded(TerminalState),
}
